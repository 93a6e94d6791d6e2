use crate::data::filter::{FilterCriteria, LanguageFilter, filtered_indices};
use crate::data::model::BookDataset;

/// Slider default applied when a dataset is loaded.
pub const DEFAULT_MIN_PAGES: u32 = 100;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).  Read-only after
    /// load; every refresh derives views from it.
    pub dataset: Option<BookDataset>,

    /// Current widget selections.
    pub criteria: FilterCriteria,

    /// Indices of books passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Title chosen in the cover-preview selector.
    pub selected_title: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            selected_title: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset criteria to their defaults.
    pub fn set_dataset(&mut self, dataset: BookDataset) {
        self.criteria = FilterCriteria {
            min_pages: DEFAULT_MIN_PAGES.min(dataset.max_pages),
            language: LanguageFilter::All,
        };
        self.visible_indices = filtered_indices(&dataset, &self.criteria);
        self.dataset = Some(dataset);
        self.reset_selection();
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute `visible_indices` after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.criteria);
        }
        // Drop a selection that fell out of the view.
        if !self.selection_is_visible() {
            self.reset_selection();
        }
    }

    pub fn set_min_pages(&mut self, min_pages: u32) {
        self.criteria.min_pages = min_pages;
        self.refilter();
    }

    pub fn set_language_filter(&mut self, language: LanguageFilter) {
        self.criteria.language = language;
        self.refilter();
    }

    /// Titles currently offered by the cover-preview selector.
    pub fn visible_titles(&self) -> Vec<String> {
        match &self.dataset {
            Some(ds) => self
                .visible_indices
                .iter()
                .map(|&i| ds.books[i].title.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    fn selection_is_visible(&self) -> bool {
        let (Some(ds), Some(title)) = (&self.dataset, &self.selected_title) else {
            return false;
        };
        self.visible_indices
            .iter()
            .any(|&i| ds.books[i].title == *title)
    }

    /// Default the selection to the first visible book, if any.
    fn reset_selection(&mut self) {
        self.selected_title = self.dataset.as_ref().and_then(|ds| {
            self.visible_indices
                .first()
                .map(|&i| ds.books[i].title.clone())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Book;

    fn book(title: &str, pages: u32) -> Book {
        Book {
            title: title.into(),
            author: "a".into(),
            genre: "g".into(),
            language: Some("en".into()),
            pages,
            year: 2000,
            thumbnail: String::new(),
        }
    }

    #[test]
    fn set_dataset_applies_default_slider_and_selection() {
        let mut state = AppState::default();
        state.set_dataset(BookDataset::from_books(vec![
            book("thin", 40),
            book("thick", 500),
        ]));
        assert_eq!(state.criteria.min_pages, DEFAULT_MIN_PAGES);
        assert_eq!(state.visible_indices, vec![1]);
        assert_eq!(state.selected_title.as_deref(), Some("thick"));
    }

    #[test]
    fn refilter_drops_stale_selection() {
        let mut state = AppState::default();
        state.set_dataset(BookDataset::from_books(vec![
            book("thin", 40),
            book("thick", 500),
        ]));
        state.set_min_pages(0);
        state.selected_title = Some("thin".into());
        state.set_min_pages(100);
        assert_eq!(state.selected_title.as_deref(), Some("thick"));
    }

    #[test]
    fn empty_view_clears_selection() {
        let mut state = AppState::default();
        state.set_dataset(BookDataset::from_books(vec![book("thin", 40)]));
        state.set_min_pages(1000);
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.selected_title, None);
    }
}
