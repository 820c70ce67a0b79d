mod common;

use std::sync::Arc;

use common::{ms, MockImageLoader};
use uxcases::placeholder::{
    ImageLoadingCase, ImagePhase, PlaceholderKind, PROFILE_IMAGES, REVEAL_DELAY_MAX_MS,
    REVEAL_DELAY_MIN_MS,
};
use uxcases::rng::SeededRng;
use uxcases::view::ViewMode;

fn case_with(view: ViewMode, seed: u64, loader: Arc<MockImageLoader>) -> ImageLoadingCase {
    ImageLoadingCase::new(view, loader, SeededRng::new(seed), ms(3000))
}

fn phases(case: &ImageLoadingCase) -> Vec<ImagePhase> {
    case.images().into_iter().map(|slot| slot.phase).collect()
}

#[tokio::test(start_paused = true)]
async fn placeholder_follows_the_view() {
    let mut dont = case_with(ViewMode::Dont, 1, Arc::new(MockImageLoader::new()));
    dont.start();
    let images = dont.images();
    assert_eq!(images.len(), PROFILE_IMAGES.len());
    assert!(images.iter().all(|slot| slot.placeholder == PlaceholderKind::Gray));

    let mut good = case_with(ViewMode::Do, 1, Arc::new(MockImageLoader::new()));
    good.start();
    for (slot, image) in good.images().iter().zip(PROFILE_IMAGES.iter()) {
        assert_eq!(slot.placeholder, PlaceholderKind::Blurhash(image.blurhash));
        assert_eq!(slot.image.url, image.url);
    }
}

#[tokio::test(start_paused = true)]
async fn reveal_delays_stay_within_bounds() {
    for seed in 0..50 {
        let mut case = case_with(ViewMode::Do, seed, Arc::new(MockImageLoader::new()));
        case.start();
        for slot in case.images() {
            assert!(
                slot.reveal_after >= ms(REVEAL_DELAY_MIN_MS)
                    && slot.reveal_after <= ms(REVEAL_DELAY_MAX_MS),
                "seed {seed}: reveal_after = {:?}",
                slot.reveal_after
            );
        }
    }
}

#[tokio::test(start_paused = true)]
async fn same_seed_same_delays() {
    let delays = |seed| {
        let mut case = case_with(ViewMode::Dont, seed, Arc::new(MockImageLoader::new()));
        case.start();
        case.images()
            .into_iter()
            .map(|slot| slot.reveal_after)
            .collect::<Vec<_>>()
    };
    assert_eq!(delays(42), delays(42));
}

#[tokio::test(start_paused = true)]
async fn nothing_is_requested_before_the_shortest_delay() {
    let loader = Arc::new(MockImageLoader::new());
    let mut case = case_with(ViewMode::Do, 3, loader.clone());
    case.start();

    tokio::time::sleep(ms(REVEAL_DELAY_MIN_MS - 1)).await;
    assert!(phases(&case).iter().all(|phase| *phase == ImagePhase::Placeholder));
    assert!(loader.calls().is_empty());

    case.finished().await;
    assert!(case.is_settled());
    assert!(phases(&case).iter().all(|phase| *phase == ImagePhase::Loaded));
    assert_eq!(loader.calls().len(), PROFILE_IMAGES.len());
}

#[tokio::test(start_paused = true)]
async fn images_reveal_then_load() {
    let loader = Arc::new(MockImageLoader::new().with_delay(ms(2000)));
    let mut case = case_with(ViewMode::Do, 9, loader.clone());
    case.start();

    // Every delay has elapsed, no load has finished.
    tokio::time::sleep(ms(REVEAL_DELAY_MAX_MS + 1)).await;
    assert!(phases(&case).iter().all(|phase| *phase == ImagePhase::Revealing));
    assert!(!case.is_settled());

    let started = tokio::time::Instant::now();
    case.finished().await;
    assert!(started.elapsed() < ms(2000), "elapsed = {:?}", started.elapsed());
    assert!(phases(&case).iter().all(|phase| *phase == ImagePhase::Loaded));
}

#[tokio::test(start_paused = true)]
async fn broken_image_keeps_its_placeholder() {
    let loader = Arc::new(MockImageLoader::new().broken("profile-3"));
    let mut case = case_with(ViewMode::Do, 4, loader);
    case.start();
    case.finished().await;

    let images = case.images();
    match &images[2].phase {
        ImagePhase::Failed(reason) => assert!(reason.contains("404"), "{}", reason),
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(images[2].placeholder, PlaceholderKind::Blurhash(PROFILE_IMAGES[2].blurhash));
    assert!(case.is_settled());
}

#[tokio::test(start_paused = true)]
async fn stalled_image_times_out() {
    let loader = Arc::new(MockImageLoader::new().slow("profile-1", ms(60_000)));
    let mut case = case_with(ViewMode::Dont, 5, loader);
    case.start();

    let started = tokio::time::Instant::now();
    case.finished().await;
    let elapsed = started.elapsed();
    assert!(
        elapsed <= ms(REVEAL_DELAY_MAX_MS + 3000),
        "elapsed = {:?}",
        elapsed
    );
    match &case.images()[0].phase {
        ImagePhase::Failed(reason) => {
            assert!(reason.contains("did not load within 3000ms"), "{}", reason)
        }
        other => panic!("Expected timeout, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn view_switch_remounts_every_image() {
    let loader = Arc::new(MockImageLoader::new().with_delay(ms(5000)));
    let mut case = case_with(ViewMode::Do, 11, loader.clone());
    case.start();

    tokio::time::sleep(ms(REVEAL_DELAY_MAX_MS + 100)).await;
    assert!(phases(&case).iter().all(|phase| *phase == ImagePhase::Revealing));

    assert!(case.set_view(ViewMode::Dont));
    assert!(!case.set_view(ViewMode::Dont));
    assert_eq!(case.view(), ViewMode::Dont);
    let images = case.images();
    assert!(images.iter().all(|slot| slot.phase == ImagePhase::Placeholder));
    assert!(images.iter().all(|slot| slot.placeholder == PlaceholderKind::Gray));

    // Reveals from the first mount cannot advance the new one.
    tokio::time::sleep(ms(REVEAL_DELAY_MIN_MS - 1)).await;
    assert!(phases(&case).iter().all(|phase| *phase == ImagePhase::Placeholder));

    case.finished().await;
    assert!(phases(&case).iter().all(|phase| *phase == ImagePhase::Loaded));
    assert_eq!(loader.calls().len(), 2 * PROFILE_IMAGES.len());
}
