//! Paginated preview viewer state.
//!
//! ```text
//! Unloaded --open--> Loading --loaded(n)--> Loaded { page 1 of n }
//!                       |
//!                       +--failed--> Unloaded { error }
//! ```

/// Where the viewer is in loading its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    Unloaded {
        /// Why the last load failed, if it did
        error: Option<String>,
    },
    Loading {
        source: String,
    },
    Loaded {
        source: String,
        total_pages: usize,
        current_page: usize,
    },
}

/// Page-by-page viewer for a preview document.
#[derive(Debug, Clone)]
pub struct PdfViewer {
    state: ViewerState,
}

impl Default for PdfViewer {
    fn default() -> Self {
        Self {
            state: ViewerState::Unloaded { error: None },
        }
    }
}

impl PdfViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Start loading a new source, discarding whatever was shown before.
    pub fn open(&mut self, source: impl Into<String>) {
        self.state = ViewerState::Loading {
            source: source.into(),
        };
    }

    /// Document metadata resolved. Ignored unless a load is in progress.
    ///
    /// A document without pages counts as a failed load.
    pub fn loaded(&mut self, total_pages: usize) {
        let ViewerState::Loading { source } = &self.state else {
            return;
        };
        if total_pages == 0 {
            self.failed("document has no pages");
            return;
        }
        self.state = ViewerState::Loaded {
            source: source.clone(),
            total_pages,
            current_page: 1,
        };
    }

    /// The in-progress load failed. Ignored unless a load is in progress.
    pub fn failed(&mut self, message: impl Into<String>) {
        if matches!(self.state, ViewerState::Loading { .. }) {
            self.state = ViewerState::Unloaded {
                error: Some(message.into()),
            };
        }
    }

    /// Go forward one page. No-op on the last page or before loading.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Go back one page. No-op on the first page or before loading.
    pub fn previous(&mut self) -> bool {
        self.step(-1)
    }

    /// Jump to a page, clamped to the document.
    pub fn go_to(&mut self, page: usize) {
        if let ViewerState::Loaded {
            total_pages,
            current_page,
            ..
        } = &mut self.state
        {
            *current_page = page.clamp(1, *total_pages);
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(
            self.state,
            ViewerState::Loaded { total_pages, current_page, .. } if current_page < total_pages
        )
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.state, ViewerState::Loaded { current_page, .. } if current_page > 1)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewerState::Loading { .. })
    }

    pub fn current_page(&self) -> Option<usize> {
        match self.state {
            ViewerState::Loaded { current_page, .. } => Some(current_page),
            _ => None,
        }
    }

    pub fn total_pages(&self) -> Option<usize> {
        match self.state {
            ViewerState::Loaded { total_pages, .. } => Some(total_pages),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewerState::Unloaded { error } => error.as_deref(),
            _ => None,
        }
    }

    /// Status line as shown next to the navigation controls.
    pub fn status(&self) -> String {
        match &self.state {
            ViewerState::Unloaded { error: Some(e) } => format!("Failed to load PDF: {e}"),
            ViewerState::Unloaded { error: None } => "No document".to_string(),
            ViewerState::Loading { .. } => "Loading PDF...".to_string(),
            ViewerState::Loaded {
                total_pages,
                current_page,
                ..
            } => format!("Page {current_page} of {total_pages}"),
        }
    }

    fn step(&mut self, delta: isize) -> bool {
        let ViewerState::Loaded {
            total_pages,
            current_page,
            ..
        } = &mut self.state
        else {
            return false;
        };
        let target = current_page.saturating_add_signed(delta).clamp(1, *total_pages);
        let moved = target != *current_page;
        *current_page = target;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(pages: usize) -> PdfViewer {
        let mut viewer = PdfViewer::new();
        viewer.open("http://records.test/api/preview-pdf/22A91A6101");
        viewer.loaded(pages);
        viewer
    }

    #[test]
    fn open_moves_to_loading() {
        let mut viewer = PdfViewer::new();
        assert_eq!(viewer.state(), &ViewerState::Unloaded { error: None });

        viewer.open("http://records.test/x");
        assert!(viewer.is_loading());
        assert_eq!(viewer.status(), "Loading PDF...");
        assert!(!viewer.has_next());
        assert!(!viewer.next());
    }

    #[test]
    fn loaded_starts_at_first_page() {
        let viewer = loaded(3);
        assert_eq!(viewer.current_page(), Some(1));
        assert_eq!(viewer.total_pages(), Some(3));
        assert_eq!(viewer.status(), "Page 1 of 3");
    }

    #[test]
    fn next_at_last_page_is_noop() {
        let mut viewer = loaded(2);
        assert!(viewer.next());
        assert_eq!(viewer.current_page(), Some(2));
        assert!(!viewer.has_next());

        assert!(!viewer.next());
        assert_eq!(viewer.current_page(), Some(2));
    }

    #[test]
    fn previous_at_first_page_is_noop() {
        let mut viewer = loaded(2);
        assert!(!viewer.has_previous());
        assert!(!viewer.previous());
        assert_eq!(viewer.current_page(), Some(1));
    }

    #[test]
    fn single_page_disables_both_controls() {
        let viewer = loaded(1);
        assert!(!viewer.has_next());
        assert!(!viewer.has_previous());
    }

    #[test]
    fn go_to_clamps() {
        let mut viewer = loaded(4);
        viewer.go_to(10);
        assert_eq!(viewer.current_page(), Some(4));
        viewer.go_to(0);
        assert_eq!(viewer.current_page(), Some(1));
    }

    #[test]
    fn failure_returns_to_unloaded_with_message() {
        let mut viewer = PdfViewer::new();
        viewer.open("http://records.test/x");
        viewer.failed("HTTP 500");
        assert_eq!(viewer.error(), Some("HTTP 500"));
        assert_eq!(viewer.current_page(), None);
    }

    #[test]
    fn zero_pages_is_a_failure() {
        let viewer = loaded(0);
        assert!(viewer.error().is_some());
    }

    #[test]
    fn reopening_resets_page() {
        let mut viewer = loaded(3);
        viewer.next();
        viewer.open("http://records.test/other");
        viewer.loaded(5);
        assert_eq!(viewer.current_page(), Some(1));
    }

    #[test]
    fn metadata_without_open_is_ignored() {
        let mut viewer = PdfViewer::new();
        viewer.loaded(3);
        assert_eq!(viewer.state(), &ViewerState::Unloaded { error: None });
    }
}
