//! Rendered QR images keyed by short URL hash.

use dashmap::{DashMap, mapref::entry::Entry};
use std::sync::Arc;

/// Concurrent, insert-once image store.
///
/// The first image stored for a hash wins; later inserts for the same hash
/// are ignored so every reader sees identical bytes.
#[derive(Debug, Default)]
pub struct QrCache {
    images: DashMap<String, Arc<[u8]>>,
}

impl QrCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hash: &str) -> Option<Arc<[u8]>> {
        self.images.get(hash).map(|image| Arc::clone(image.value()))
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.images.contains_key(hash)
    }

    /// Stores `image` unless an image already exists for `hash`.
    ///
    /// Returns `true` if this call inserted the image.
    pub fn insert_if_absent(&self, hash: &str, image: Vec<u8>) -> bool {
        match self.images.entry(hash.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Arc::from(image));
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
