use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// RawBook – one row as it comes off disk
// ---------------------------------------------------------------------------

/// A single row of the source table before cleaning.
///
/// `pages` and `published_date` stay as free text here because real exports
/// mix integers, float renderings and plain garbage in those columns; the
/// normalizer turns them into defined integers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    /// `None` when the source cell was empty or null.
    pub language: Option<String>,
    pub pages: String,
    pub published_date: String,
    pub thumbnail: String,
}

// ---------------------------------------------------------------------------
// Book – one normalized record
// ---------------------------------------------------------------------------

/// A book after normalization.
///
/// Invariant: `pages` and `year` are always defined integers; parse
/// failures were defaulted to 0 upstream and no missing values survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    /// `None` when the source cell was empty or null.
    pub language: Option<String>,
    /// Page count, 0 when the source value was unparseable.
    pub pages: u32,
    /// Publication year extracted from `published_date`, 0 when unknown.
    pub year: i32,
    /// Cover image URI, possibly empty.
    pub thumbnail: String,
}

// ---------------------------------------------------------------------------
// BookDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset with precomputed summary facts.
///
/// Immutable after construction; every refresh cycle derives filtered
/// views from it rather than mutating it.
#[derive(Debug, Clone)]
pub struct BookDataset {
    /// All books (rows), in source order.
    pub books: Vec<Book>,
    /// Sorted distinct languages (null cells excluded).
    pub languages: Vec<String>,
    /// Number of distinct genres.
    pub genre_count: usize,
    /// Largest page count in the dataset (upper bound for the slider).
    pub max_pages: u32,
    /// Latest publication year, 0 when no date in the dataset parsed.
    pub max_year: i32,
}

impl BookDataset {
    /// Build the dataset and its summary facts from normalized books.
    pub fn from_books(books: Vec<Book>) -> Self {
        let mut languages: BTreeSet<String> = BTreeSet::new();
        let mut genres: BTreeSet<&str> = BTreeSet::new();
        let mut max_pages = 0u32;
        let mut max_year = 0i32;

        for book in &books {
            if let Some(lang) = &book.language {
                languages.insert(lang.clone());
            }
            genres.insert(book.genre.as_str());
            max_pages = max_pages.max(book.pages);
            max_year = max_year.max(book.year);
        }
        let genre_count = genres.len();

        BookDataset {
            books,
            languages: languages.into_iter().collect(),
            genre_count,
            max_pages,
            max_year,
        }
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
