use super::model::{Book, BookDataset};

// ---------------------------------------------------------------------------
// Filter criteria: current widget selections
// ---------------------------------------------------------------------------

/// Language constraint; `All` disables the predicate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    All,
    Only(String),
}

/// The transient filter tuple read from the widgets each refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub min_pages: u32,
    pub language: LanguageFilter,
}

/// Whether a single book passes the criteria.
///
/// A book passes when:
/// * `pages >= min_pages`, and
/// * the language filter is `All`, or the book's language equals the
///   selected one. A null language never matches an `Only` filter.
pub fn matches(book: &Book, criteria: &FilterCriteria) -> bool {
    if book.pages < criteria.min_pages {
        return false;
    }
    match &criteria.language {
        LanguageFilter::All => true,
        LanguageFilter::Only(lang) => book.language.as_deref() == Some(lang.as_str()),
    }
}

/// Return indices of books that pass the criteria, in source order.
///
/// An empty result is a valid outcome, not an error.
pub fn filtered_indices(dataset: &BookDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .books
        .iter()
        .enumerate()
        .filter(|(_, book)| matches(book, criteria))
        .map(|(i, _)| i)
        .collect()
}
