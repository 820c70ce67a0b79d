use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::fetch::Latency;
use crate::preload::{ImageLoadError, ImageLoader};
use crate::rng::SeededRng;
use crate::view::ViewMode;

use super::{alt_text, reveal_delay, PlaceholderKind, ProfileImage, PROFILE_IMAGES};

/// Where one image slot is in its loading sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePhase {
    /// Only the placeholder is on screen; the image is not requested yet.
    Placeholder,
    /// The image has been requested and is fading in over the placeholder.
    Revealing,
    Loaded,
    /// The placeholder stays on screen.
    Failed(String),
}

impl ImagePhase {
    pub fn is_settled(&self) -> bool {
        matches!(self, ImagePhase::Loaded | ImagePhase::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderImage {
    pub image: ProfileImage,
    pub alt: String,
    pub placeholder: PlaceholderKind,
    /// Simulated wait before the image is requested.
    pub reveal_after: Duration,
    pub phase: ImagePhase,
}

struct Slots {
    generation: u64,
    images: Vec<PlaceholderImage>,
}

/// The blurhash case page: four profile images behind a per-view
/// placeholder, each revealed after its own sampled delay.
///
/// Switching views aborts the running loads and starts over. Updates from
/// an aborted generation are dropped.
pub struct ImageLoadingCase {
    view: ViewMode,
    loader: Arc<dyn ImageLoader>,
    rng: SeededRng,
    reveal_delay: Latency,
    image_timeout: Duration,
    slots: Arc<Mutex<Slots>>,
    tasks: Vec<JoinHandle<()>>,
}

impl ImageLoadingCase {
    pub fn new(
        view: ViewMode,
        loader: Arc<dyn ImageLoader>,
        rng: SeededRng,
        image_timeout: Duration,
    ) -> Self {
        Self {
            view,
            loader,
            rng,
            reveal_delay: reveal_delay(),
            image_timeout,
            slots: Arc::new(Mutex::new(Slots {
                generation: 0,
                images: Vec::new(),
            })),
            tasks: Vec::new(),
        }
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Mount the images for the current view and schedule their reveals.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.abort_tasks();

        let view = self.view;
        let images: Vec<_> = PROFILE_IMAGES
            .iter()
            .enumerate()
            .map(|(index, image)| PlaceholderImage {
                image: *image,
                alt: alt_text(view, index),
                placeholder: PlaceholderKind::for_view(view, image),
                reveal_after: self.reveal_delay.sample(&mut self.rng),
                phase: ImagePhase::Placeholder,
            })
            .collect();

        let generation = {
            let mut slots = self.slots.lock();
            slots.generation += 1;
            slots.images = images.clone();
            slots.generation
        };
        tracing::info!(%view, generation, "profile images mounted");

        self.tasks = images
            .into_iter()
            .enumerate()
            .map(|(index, slot)| self.spawn_reveal(generation, index, slot))
            .collect();
    }

    /// Switch views. A real change remounts every image; selecting the
    /// active view is a no-op. Returns whether the view changed.
    pub fn set_view(&mut self, view: ViewMode) -> bool {
        if view == self.view {
            return false;
        }
        self.view = view;
        self.start();
        true
    }

    pub fn images(&self) -> Vec<PlaceholderImage> {
        self.slots.lock().images.clone()
    }

    pub fn is_settled(&self) -> bool {
        let slots = self.slots.lock();
        !slots.images.is_empty() && slots.images.iter().all(|slot| slot.phase.is_settled())
    }

    /// Wait until every image of the current mount has settled.
    pub async fn finished(&mut self) {
        for task in std::mem::take(&mut self.tasks) {
            if let Err(err) = task.await {
                if !err.is_cancelled() {
                    tracing::warn!(error = %err, "image reveal task failed");
                }
            }
        }
    }

    fn spawn_reveal(&self, generation: u64, index: usize, slot: PlaceholderImage) -> JoinHandle<()> {
        let slots = self.slots.clone();
        let loader = self.loader.clone();
        let timeout = self.image_timeout;

        tokio::spawn(async move {
            tokio::time::sleep(slot.reveal_after).await;
            if !set_phase(&slots, generation, index, ImagePhase::Revealing) {
                return;
            }

            let url = slot.image.url;
            let phase = match tokio::time::timeout(timeout, loader.load(url)).await {
                Ok(Ok(())) => ImagePhase::Loaded,
                Ok(Err(err)) => ImagePhase::Failed(err.to_string()),
                Err(_) => ImagePhase::Failed(
                    ImageLoadError::Timeout {
                        url: url.to_string(),
                        after_ms: timeout.as_millis() as u64,
                    }
                    .to_string(),
                ),
            };
            if let ImagePhase::Failed(reason) = &phase {
                tracing::warn!(url, %reason, "profile image failed, keeping placeholder");
            }
            set_phase(&slots, generation, index, phase);
        })
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for ImageLoadingCase {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}

/// False when the slot belongs to a superseded mount.
fn set_phase(slots: &Mutex<Slots>, generation: u64, index: usize, phase: ImagePhase) -> bool {
    let mut slots = slots.lock();
    if slots.generation != generation {
        tracing::debug!(generation, "dropping image update for stale mount");
        return false;
    }
    match slots.images.get_mut(index) {
        Some(slot) => {
            slot.phase = phase;
            true
        }
        None => false,
    }
}
