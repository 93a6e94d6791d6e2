use chrono::{Datelike, NaiveDate};

use super::model::{Book, BookDataset, RawBook};

// ---------------------------------------------------------------------------
// Field coercion: pages and publication year
// ---------------------------------------------------------------------------

/// Date layouts seen in book exports, most specific first.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y"];

/// Coerce a raw page-count cell into a non-negative integer.
///
/// Accepts plain integers and float renderings like `"320.0"` (columns
/// round-tripped through spreadsheets come back that way). Anything
/// unparseable, negative or absent maps to 0; no error escapes.
pub fn coerce_pages(raw: &str) -> u32 {
    let s = raw.trim();
    if s.is_empty() {
        return 0;
    }
    if let Ok(n) = s.parse::<i64>() {
        return u32::try_from(n).unwrap_or(0);
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() && f >= 0.0 && f <= u32::MAX as f64 {
            return f as u32;
        }
    }
    0
}

/// Extract a publication year from a raw date cell.
///
/// Tries full-date layouts first, then year-month and bare-year forms
/// (`"2004-07"`, `"2004"`). Unparseable or absent cells map to 0.
pub fn extract_year(raw: &str) -> i32 {
    let s = raw.trim();
    if s.is_empty() {
        return 0;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.year();
        }
    }
    // Partial dates: the leading dash/slash-separated field is the year
    // when it parses as a four-digit number.
    let lead = s.split(['-', '/']).next().unwrap_or(s).trim();
    if let Ok(year) = lead.parse::<i32>() {
        if (1000..=9999).contains(&year) {
            return year;
        }
    }
    0
}

// ---------------------------------------------------------------------------
// Record and dataset normalization
// ---------------------------------------------------------------------------

/// Normalize a single raw row into a [`Book`].
pub fn normalize(raw: RawBook) -> Book {
    let pages = coerce_pages(&raw.pages);
    let year = extract_year(&raw.published_date);
    Book {
        title: raw.title,
        author: raw.author,
        genre: raw.genre,
        language: raw.language.filter(|l| !l.trim().is_empty()),
        pages,
        year,
        thumbnail: raw.thumbnail,
    }
}

/// Normalize all rows and build the immutable dataset.
pub fn normalize_dataset(raw: Vec<RawBook>) -> BookDataset {
    BookDataset::from_books(raw.into_iter().map(normalize).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_plain_integer() {
        assert_eq!(coerce_pages("320"), 320);
        assert_eq!(coerce_pages("  42 "), 42);
    }

    #[test]
    fn pages_float_rendering() {
        assert_eq!(coerce_pages("320.0"), 320);
        assert_eq!(coerce_pages("99.7"), 99);
    }

    #[test]
    fn pages_garbage_defaults_to_zero() {
        assert_eq!(coerce_pages(""), 0);
        assert_eq!(coerce_pages("n/a"), 0);
        assert_eq!(coerce_pages("-12"), 0);
        assert_eq!(coerce_pages("NaN"), 0);
    }

    #[test]
    fn year_from_full_date() {
        assert_eq!(extract_year("2004-07-15"), 2004);
        assert_eq!(extract_year("1999/01/02"), 1999);
        assert_eq!(extract_year("07/15/2004"), 2004);
        assert_eq!(extract_year("July 15, 2004"), 2004);
    }

    #[test]
    fn year_from_partial_date() {
        assert_eq!(extract_year("2004-07"), 2004);
        assert_eq!(extract_year("2004"), 2004);
    }

    #[test]
    fn year_garbage_defaults_to_zero() {
        assert_eq!(extract_year(""), 0);
        assert_eq!(extract_year("unknown"), 0);
        assert_eq!(extract_year("07-15"), 0);
    }

    #[test]
    fn normalize_leaves_no_missing_values() {
        let raw = vec![
            RawBook {
                title: "A".into(),
                pages: "bad".into(),
                published_date: "???".into(),
                language: Some("  ".into()),
                ..RawBook::default()
            },
            RawBook {
                title: "B".into(),
                pages: "150".into(),
                published_date: "1987-03-01".into(),
                language: Some("en".into()),
                ..RawBook::default()
            },
        ];
        let ds = normalize_dataset(raw);
        for book in &ds.books {
            assert!(book.pages < u32::MAX);
            assert!(book.year >= 0);
        }
        assert_eq!(ds.books[0].pages, 0);
        assert_eq!(ds.books[0].year, 0);
        assert_eq!(ds.books[0].language, None);
        assert_eq!(ds.books[1].year, 1987);
        assert_eq!(ds.languages, vec!["en".to_string()]);
    }
}
