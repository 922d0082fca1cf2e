use iced::widget::image::Handle;
use std::collections::{HashMap, HashSet};

use super::data::AnimalRecord;

/// Decoded image ready for display
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Downscaled copy shown on the card
    pub thumbnail: Handle,
    /// Original bytes, shown in the detail popup
    pub full: Handle,
}

/// Load state of one image URL
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Loading,
    Ready(LoadedImage),
    Failed,
}

/// Images keyed by URL, pruned to the records currently on screen
#[derive(Debug, Default)]
pub struct ImageCache {
    slots: HashMap<String, ImageSlot>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop images no longer referenced and return the URLs that still need
    /// downloading. Returned URLs are marked as loading.
    ///
    /// `pinned` is the record shown in the detail popup; its image is kept
    /// even when it is not part of `records`.
    pub fn sync(&mut self, records: &[AnimalRecord], pinned: Option<&AnimalRecord>) -> Vec<String> {
        let shown: Vec<&AnimalRecord> = records.iter().chain(pinned).collect();
        let wanted: HashSet<&str> = shown.iter().map(|r| r.image_url.as_str()).collect();
        self.slots.retain(|url, _| wanted.contains(url.as_str()));

        let mut missing = Vec::new();
        for record in shown {
            if !self.slots.contains_key(&record.image_url) {
                self.slots.insert(record.image_url.clone(), ImageSlot::Loading);
                missing.push(record.image_url.clone());
            }
        }
        missing
    }

    /// Store a finished download. Ignored if the URL was pruned meanwhile.
    pub fn finish(&mut self, url: &str, result: Result<LoadedImage, String>) {
        let Some(slot) = self.slots.get_mut(url) else {
            tracing::debug!(url, "dropping image for record no longer shown");
            return;
        };

        *slot = match result {
            Ok(image) => ImageSlot::Ready(image),
            Err(message) => {
                tracing::warn!(url, %message, "image failed to load");
                ImageSlot::Failed
            }
        };
    }

    pub fn get(&self, url: &str) -> Option<&ImageSlot> {
        self.slots.get(url)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}
