//! Display-image lifecycle
//!
//! The image on screen is a locally owned resource that gets superseded
//! constantly: picking a file, receiving a processed result and clicking
//! a gallery entry all install a new preview. `PreviewSlot` makes the
//! lifecycle explicit: it holds at most one live `Preview`, installing a
//! new one releases the previous one, and tearing the slot down releases
//! the last. The live count is observable so tests can pin the
//! one-at-a-time invariant down.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Where the displayed bytes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSource {
    /// A file the user just picked.
    Selection,
    /// The response body of a process request.
    Processed,
    /// A previously processed image fetched from the gallery.
    Gallery,
}

/// One live display image.
#[derive(Debug)]
pub struct Preview {
    bytes: Vec<u8>,
    source: PreviewSource,
    live: Arc<AtomicUsize>,
}

impl Preview {
    fn new(bytes: Vec<u8>, source: PreviewSource, live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Preview { bytes, source, live }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn source(&self) -> PreviewSource {
        self.source
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Holds at most one live preview.
#[derive(Debug, Default)]
pub struct PreviewSlot {
    current: Option<Preview>,
    live: Arc<AtomicUsize>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        PreviewSlot::default()
    }

    /// Install a new preview, releasing whichever one was live before.
    pub fn install(&mut self, bytes: Vec<u8>, source: PreviewSource) {
        let next = Preview::new(bytes, source, Arc::clone(&self.live));
        self.current = Some(next);
    }

    pub fn current(&self) -> Option<&Preview> {
        self.current.as_ref()
    }

    /// Bytes of the live preview, if any.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|preview| preview.bytes())
    }

    /// Release the live preview without installing a replacement.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Number of previews currently alive. Never exceeds one.
    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}
