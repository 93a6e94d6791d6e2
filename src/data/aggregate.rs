use std::collections::BTreeMap;

use super::model::{Book, BookDataset};

/// Label used in counts and charts for rows whose language cell was null.
pub const NULL_LANGUAGE_LABEL: &str = "unknown";

// ---------------------------------------------------------------------------
// Value counts over a categorical field
// ---------------------------------------------------------------------------

/// Frequency table over a categorical accessor, restricted to `indices`.
///
/// Covers exactly the distinct values observed in the view (no zero-count
/// entries for absent categories). Keys are the field values themselves,
/// assigned explicitly rather than by positional column renaming. Sorted
/// count-descending, ties by value, so chart order is stable across runs.
pub fn value_counts<'a, F>(
    dataset: &'a BookDataset,
    indices: &[usize],
    field: F,
) -> Vec<(String, usize)>
where
    F: Fn(&'a Book) -> &'a str,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &i in indices {
        *counts.entry(field(&dataset.books[i])).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Books per genre within the view.
pub fn genre_counts(dataset: &BookDataset, indices: &[usize]) -> Vec<(String, usize)> {
    value_counts(dataset, indices, |b| b.genre.as_str())
}

/// Books per language within the view; null languages grouped under
/// [`NULL_LANGUAGE_LABEL`] so the counts still sum to the view size.
pub fn language_counts(dataset: &BookDataset, indices: &[usize]) -> Vec<(String, usize)> {
    value_counts(dataset, indices, |b| {
        b.language.as_deref().unwrap_or(NULL_LANGUAGE_LABEL)
    })
}

// ---------------------------------------------------------------------------
// Page-length histogram
// ---------------------------------------------------------------------------

/// Fixed-bin histogram of page counts over the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHistogram {
    pub bin_width: u32,
    /// `(bin start, count)` for every bin from 0 up to the observed max,
    /// including empty bins in between.
    pub bins: Vec<(u32, usize)>,
}

/// Bin the view's page counts into `n_bins` equal-width bins starting at 0.
pub fn page_histogram(dataset: &BookDataset, indices: &[usize], n_bins: u32) -> PageHistogram {
    let n_bins = n_bins.max(1);
    let max_pages = indices
        .iter()
        .map(|&i| dataset.books[i].pages)
        .max()
        .unwrap_or(0);

    let bin_width = (max_pages / n_bins + 1).max(1);
    let mut bins: Vec<(u32, usize)> = (0..n_bins).map(|b| (b * bin_width, 0)).collect();
    for &i in indices {
        let bin = (dataset.books[i].pages / bin_width).min(n_bins - 1) as usize;
        bins[bin].1 += 1;
    }

    PageHistogram { bin_width, bins }
}

// ---------------------------------------------------------------------------
// Year-vs-pages scatter series
// ---------------------------------------------------------------------------

/// One scatter series per language: `(year, pages)` points with hover labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub language: String,
    pub points: Vec<[f64; 2]>,
    /// `title — author`, parallel to `points`.
    pub labels: Vec<String>,
}

/// Group the view into per-language scatter series, ordered by language.
pub fn year_page_scatter(dataset: &BookDataset, indices: &[usize]) -> Vec<ScatterSeries> {
    let mut groups: BTreeMap<&str, ScatterSeries> = BTreeMap::new();
    for &i in indices {
        let book = &dataset.books[i];
        let lang = book.language.as_deref().unwrap_or(NULL_LANGUAGE_LABEL);
        let series = groups.entry(lang).or_insert_with(|| ScatterSeries {
            language: lang.to_string(),
            points: Vec::new(),
            labels: Vec::new(),
        });
        series.points.push([f64::from(book.year), f64::from(book.pages)]);
        series.labels.push(format!("{} — {}", book.title, book.author));
    }
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(genre: &str, language: Option<&str>, pages: u32) -> Book {
        Book {
            title: format!("{genre}-{pages}"),
            author: "a".into(),
            genre: genre.into(),
            language: language.map(String::from),
            pages,
            year: 2001,
            thumbnail: String::new(),
        }
    }

    fn dataset() -> BookDataset {
        BookDataset::from_books(vec![
            book("Fiction", Some("en"), 120),
            book("Fiction", Some("de"), 340),
            book("Poetry", None, 80),
            book("Fiction", Some("en"), 200),
        ])
    }

    #[test]
    fn counts_cover_only_observed_values_and_sum_to_view_size() {
        let ds = dataset();
        let view = vec![0, 1, 3];
        let counts = genre_counts(&ds, &view);
        assert_eq!(counts, vec![("Fiction".to_string(), 3)]);
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, view.len());
    }

    #[test]
    fn null_language_is_grouped_not_dropped() {
        let ds = dataset();
        let view: Vec<usize> = (0..ds.len()).collect();
        let counts = language_counts(&ds, &view);
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, view.len());
        assert!(counts.iter().any(|(l, c)| l == NULL_LANGUAGE_LABEL && *c == 1));
    }

    #[test]
    fn count_order_is_deterministic() {
        let ds = dataset();
        let view: Vec<usize> = (0..ds.len()).collect();
        let counts = language_counts(&ds, &view);
        assert_eq!(
            counts,
            vec![
                ("en".to_string(), 2),
                ("de".to_string(), 1),
                (NULL_LANGUAGE_LABEL.to_string(), 1),
            ]
        );
    }

    #[test]
    fn histogram_counts_every_row_once() {
        let ds = dataset();
        let view: Vec<usize> = (0..ds.len()).collect();
        let hist = page_histogram(&ds, &view, 20);
        let total: usize = hist.bins.iter().map(|(_, c)| c).sum();
        assert_eq!(total, view.len());
        assert_eq!(hist.bins.len(), 20);
    }

    #[test]
    fn histogram_of_empty_view_is_empty() {
        let ds = dataset();
        let hist = page_histogram(&ds, &[], 20);
        assert!(hist.bins.iter().all(|(_, c)| *c == 0));
    }

    #[test]
    fn scatter_groups_by_language() {
        let ds = dataset();
        let view: Vec<usize> = (0..ds.len()).collect();
        let series = year_page_scatter(&ds, &view);
        let langs: Vec<&str> = series.iter().map(|s| s.language.as_str()).collect();
        assert_eq!(langs, vec!["de", "en", NULL_LANGUAGE_LABEL]);
        let n_points: usize = series.iter().map(|s| s.points.len()).sum();
        assert_eq!(n_points, view.len());
    }
}
