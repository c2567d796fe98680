//! Per-user gallery of previously processed images
//!
//! The list is owned by the server; the client only ever replaces its
//! copy wholesale with whatever the listing endpoint returned, in the
//! order it was returned. A failed refresh leaves the current list
//! untouched.
//!
//! Refreshes can overlap (every username keystroke fires one, and so
//! does every successful submission), so each request carries a
//! monotonically increasing token. A response is applied only if it
//! carries the most recently issued token; anything older is discarded,
//! which makes the outcome last-issued-wins regardless of network
//! reordering.

use chrono::{DateTime, Local};

/// Gallery list plus the refresh bookkeeping.
#[derive(Debug, Default)]
pub struct GalleryState {
    entries: Vec<String>,
    /// Most recently issued refresh token.
    issued: u64,
    last_refreshed: Option<DateTime<Local>>,
}

impl GalleryState {
    pub fn new() -> Self {
        GalleryState::default()
    }

    /// Filenames reported by the server, in server order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Local>> {
        self.last_refreshed
    }

    /// Start a refresh and get the token its response must carry.
    pub fn begin_refresh(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Apply a listing response.
    ///
    /// Replaces the list wholesale when `token` is the most recently
    /// issued one. Returns false (and changes nothing) for a stale
    /// response that was overtaken by a newer refresh.
    pub fn apply(&mut self, token: u64, entries: Vec<String>) -> bool {
        if token != self.issued {
            return false;
        }
        self.entries = entries;
        self.last_refreshed = Some(Local::now());
        true
    }

    /// Forget the list, e.g. when the username is cleared.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_refreshed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_apply_replaces_wholesale() {
        let mut gallery = GalleryState::new();
        let first = gallery.begin_refresh();
        assert!(gallery.apply(first, names(&["a.jpg", "b.jpg", "c.jpg"])));

        // A later, shorter listing replaces the list outright; nothing
        // from the previous one is merged in.
        let second = gallery.begin_refresh();
        assert!(gallery.apply(second, names(&["z.jpg"])));
        assert_eq!(gallery.entries(), &[String::from("z.jpg")]);
    }

    #[test]
    fn test_server_order_is_preserved() {
        let mut gallery = GalleryState::new();
        let token = gallery.begin_refresh();
        gallery.apply(token, names(&["b.jpg", "a.jpg"]));

        assert_eq!(gallery.entries()[0], "b.jpg");
        assert_eq!(gallery.entries()[1], "a.jpg");
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut gallery = GalleryState::new();
        let older = gallery.begin_refresh();
        let newer = gallery.begin_refresh();

        // The newer request resolves first.
        assert!(gallery.apply(newer, names(&["new.jpg"])));

        // The older response arrives late and must not win.
        assert!(!gallery.apply(older, names(&["old.jpg"])));
        assert_eq!(gallery.entries(), &[String::from("new.jpg")]);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut gallery = GalleryState::new();
        let token = gallery.begin_refresh();
        gallery.apply(token, names(&["a.jpg"]));

        gallery.clear();

        assert!(gallery.entries().is_empty());
        assert!(gallery.last_refreshed().is_none());
    }
}
