mod common;

use std::time::Duration;

use common::{ms, policy};
use uxcases::clock::SystemClock;
use uxcases::config::{PrimarySignal, VideoEvent};
use uxcases::splash::{GateSignal, SignalOutcome, SplashGate};
use uxcases::ui::splash::{DismissReason, SplashPhase};

fn gate() -> SplashGate {
    SplashGate::new(SystemClock::shared(), ms(100))
}

fn dismissal(phase: Option<SplashPhase>) -> (Duration, DismissReason) {
    match phase {
        Some(SplashPhase::Dismissed { elapsed, reason }) => (elapsed, reason),
        other => panic!("Expected dismissal, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn no_dismissal_before_min_duration() {
    let gate = gate();
    let session = gate.reset(policy(1000, 5000, false, PrimarySignal::Data));

    tokio::time::sleep(ms(100)).await;
    let outcome = gate.signal(session, GateSignal::DataSettled);
    assert_eq!(outcome, SignalOutcome::Applied(SplashPhase::Showing));

    tokio::time::sleep(ms(850)).await;
    assert!(gate.is_visible(), "Splash must stay up until min_duration");

    let (elapsed, reason) = dismissal(gate.dismissed(session).await);
    assert_eq!(reason, DismissReason::Ready);
    assert!(elapsed >= ms(1000) && elapsed < ms(1100), "elapsed = {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn off_grid_min_duration_dismisses_on_the_floor() {
    let gate = gate();
    // 1050ms falls between the 1000ms and 1100ms ticks.
    let session = gate.reset(policy(1050, 5000, false, PrimarySignal::Data));
    gate.signal(session, GateSignal::DataSettled);

    let (elapsed, reason) = dismissal(gate.dismissed(session).await);
    assert_eq!(reason, DismissReason::Ready);
    assert!(elapsed >= ms(1050) && elapsed < ms(1060), "elapsed = {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn max_duration_dismisses_without_signals() {
    let gate = gate();
    let session = gate.reset(policy(1000, 5000, false, PrimarySignal::Video));

    let (elapsed, reason) = dismissal(gate.dismissed(session).await);
    assert_eq!(reason, DismissReason::MaxDuration);
    assert!(elapsed >= ms(5000) && elapsed < ms(5100), "elapsed = {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn tick_dismisses_when_signals_land_early() {
    let gate = gate();
    let session = gate.reset(policy(1000, 5000, false, PrimarySignal::Video));

    gate.signal(session, GateSignal::Video(VideoEvent::Ended));
    assert!(gate.is_visible());

    let (elapsed, reason) = dismissal(gate.dismissed(session).await);
    assert_eq!(reason, DismissReason::Ready);
    assert!(elapsed >= ms(1000) && elapsed < ms(1100), "elapsed = {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn late_signal_dismisses_immediately() {
    let gate = gate();
    let session = gate.reset(policy(1000, 5000, false, PrimarySignal::Data));

    tokio::time::sleep(ms(2500)).await;
    assert!(gate.is_visible());
    match gate.signal(session, GateSignal::DataSettled) {
        SignalOutcome::Applied(SplashPhase::Dismissed { reason, .. }) => {
            assert_eq!(reason, DismissReason::Ready)
        }
        other => panic!("Expected immediate dismissal, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn signal_order_does_not_change_dismissal_time() {
    let arrivals = [300u64, 1500, 2200];
    let orders: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    let mut dismissals = Vec::new();
    for order in orders {
        let gate = gate();
        let session = gate.reset(policy(1000, 5000, true, PrimarySignal::Video));

        let signals = [
            GateSignal::Video(VideoEvent::Ended),
            GateSignal::DataSettled,
            GateSignal::ImagesSettled,
        ];
        for (signal, slot) in signals.into_iter().zip(order) {
            let gate = gate.clone();
            let at = ms(arrivals[slot]);
            tokio::spawn(async move {
                tokio::time::sleep(at).await;
                gate.signal(session, signal);
            });
        }

        let (elapsed, reason) = dismissal(gate.dismissed(session).await);
        assert_eq!(reason, DismissReason::Ready);
        dismissals.push(elapsed);
    }

    let earliest = *dismissals.iter().min().unwrap();
    let latest = *dismissals.iter().max().unwrap();
    assert!(latest - earliest <= ms(1), "dismissals = {:?}", dismissals);
    assert!(earliest >= ms(2200) && earliest < ms(2300), "dismissals = {:?}", dismissals);
}

#[tokio::test(start_paused = true)]
async fn reset_clears_flags_and_restarts_clock() {
    let gate = gate();
    let first = gate.reset(policy(1000, 5000, true, PrimarySignal::Video));
    gate.signal(first, GateSignal::Video(VideoEvent::Ended));
    gate.signal(first, GateSignal::DataSettled);

    tokio::time::sleep(ms(500)).await;
    let second = gate.reset(policy(1000, 5000, true, PrimarySignal::Video));
    assert!(second > first);

    let state = gate.state();
    assert_eq!(state.session, second);
    assert!(!state.video_ready);
    assert!(!state.data_ready);
    assert!(!state.images_ready);
    assert_eq!(state.phase, SplashPhase::Showing);
    assert_eq!(state.elapsed(tokio::time::Instant::now()), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn stale_session_signals_are_ignored() {
    let gate = gate();
    let first = gate.reset(policy(0, 5000, false, PrimarySignal::Data));
    let second = gate.reset(policy(0, 5000, false, PrimarySignal::Data));

    assert_eq!(gate.signal(first, GateSignal::DataSettled), SignalOutcome::Stale);
    assert!(gate.is_visible());
    assert!(!gate.state().data_ready);

    assert_eq!(gate.dismissed(first).await, None);

    match gate.signal(second, GateSignal::DataSettled) {
        SignalOutcome::Applied(phase) => assert!(phase.is_dismissed()),
        SignalOutcome::Stale => panic!("Current session must not be stale"),
    }
}

#[tokio::test(start_paused = true)]
async fn old_timers_do_not_fire_into_new_session() {
    let gate = gate();
    let _first = gate.reset(policy(0, 1000, false, PrimarySignal::Data));

    tokio::time::sleep(ms(800)).await;
    let second = gate.reset(policy(0, 5000, false, PrimarySignal::Data));

    // The first session's deadline would have fired at 1000ms.
    tokio::time::sleep(ms(1000)).await;
    assert!(gate.is_visible());

    let (elapsed, reason) = dismissal(gate.dismissed(second).await);
    assert_eq!(reason, DismissReason::MaxDuration);
    assert!(elapsed >= ms(5000) && elapsed < ms(5100), "elapsed = {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn timers_are_torn_down_on_dismissal() {
    let gate = gate();
    let session = gate.reset(policy(0, 5000, false, PrimarySignal::Data));
    assert!(gate.has_timers());

    gate.signal(session, GateSignal::DataSettled);
    assert!(!gate.is_visible());
    assert!(!gate.has_timers());
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_timers() {
    let gate = gate();
    let _session = gate.reset(policy(1000, 2000, false, PrimarySignal::Data));
    gate.shutdown();
    assert!(!gate.has_timers());

    tokio::time::sleep(ms(3000)).await;
    assert!(gate.is_visible(), "No timer left to enforce max_duration");
}

#[tokio::test(start_paused = true)]
async fn only_the_configured_video_event_counts() {
    let gate = gate();
    let session = gate.reset(policy(0, 5000, false, PrimarySignal::Video));

    gate.signal(session, GateSignal::Video(VideoEvent::CanPlay));
    assert!(gate.is_visible());
    assert!(!gate.state().video_ready);

    gate.signal(session, GateSignal::Video(VideoEvent::Ended));
    assert!(!gate.is_visible());
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_dismissal() {
    let gate = gate();
    let mut snapshots = gate.subscribe();
    let session = gate.reset(policy(0, 5000, false, PrimarySignal::Data));

    snapshots.changed().await.unwrap();
    assert_eq!(snapshots.borrow_and_update().session, session);

    gate.signal(session, GateSignal::DataSettled);
    snapshots.changed().await.unwrap();
    let snapshot = *snapshots.borrow_and_update();
    assert_eq!(snapshot.session, session);
    assert!(snapshot.phase.is_dismissed());
}
