use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Mounted flag shared between a page and its in-flight loads.
///
/// A load checks it before committing results; leaving the page unmounts it
/// and later results are dropped.
#[derive(Debug, Clone)]
pub struct Mounted(Arc<AtomicBool>);

impl Mounted {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Apply `value` only while still mounted. Returns whether it was applied.
    pub fn commit<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_mounted() {
            apply(value);
            true
        } else {
            false
        }
    }
}

impl Default for Mounted {
    fn default() -> Self {
        Self::new()
    }
}
