use crate::data::aggregate::{
    PageHistogram, ScatterSeries, genre_counts, language_counts, page_histogram, year_page_scatter,
};
use crate::data::filter::{FilterCriteria, filtered_indices};
use crate::data::model::BookDataset;

/// Bin count for the page-length histogram.
pub const HISTOGRAM_BINS: u32 = 20;

// ---------------------------------------------------------------------------
// Declarative display calls
// ---------------------------------------------------------------------------

/// One instruction for the rendering surface.  The pipeline only produces
/// these; it never touches a widget or a plot directly.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Heading(String),
    Text(String),
    Table {
        title: String,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Chart(ChartSpec),
    Image {
        uri: String,
        caption: String,
    },
}

/// A chart with its data fully prepared; no widget state inside.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Scatter {
        title: String,
        x_label: String,
        y_label: String,
        series: Vec<ScatterSeries>,
    },
    Bar {
        title: String,
        x_label: String,
        y_label: String,
        bars: Vec<(String, usize)>,
    },
    Histogram {
        title: String,
        x_label: String,
        histogram: PageHistogram,
    },
}

// ---------------------------------------------------------------------------
// The dashboard pipeline
// ---------------------------------------------------------------------------

/// Run one full refresh cycle: filter, aggregate, project.
///
/// Stateless; the rendering surface calls this whenever it observes a new
/// widget value.  `selected_title` is the cover-preview selection; it is
/// only resolved when the filtered view is non-empty, so an empty view can
/// never produce a dangling image lookup.
pub fn render(
    dataset: &BookDataset,
    criteria: &FilterCriteria,
    selected_title: Option<&str>,
) -> Vec<DisplayCall> {
    let visible = filtered_indices(dataset, criteria);
    let mut calls = Vec::new();

    calls.push(DisplayCall::Heading("📚 Literary Compass 🧭".into()));
    calls.push(DisplayCall::Text(
        "Key insights from the Books dataset. Filter by page count and \
         language, then explore publication trends, genre and language \
         breakdowns, and individual covers."
            .into(),
    ));
    calls.push(DisplayCall::Text(summary_text(dataset)));

    // -- Filtered table --
    calls.push(DisplayCall::Heading("🗂️ Filtered Books".into()));
    if visible.is_empty() {
        calls.push(DisplayCall::Text(
            "No books match the current filters.".into(),
        ));
    } else {
        calls.push(books_table(dataset, &visible));
    }

    // -- Year vs. pages scatter --
    calls.push(DisplayCall::Heading("📈 Publication Year vs. Page Count".into()));
    calls.push(DisplayCall::Text(
        "How book lengths have trended over time, colored by language.".into(),
    ));
    calls.push(DisplayCall::Chart(ChartSpec::Scatter {
        title: "year_vs_pages".into(),
        x_label: "Year".into(),
        y_label: "Pages".into(),
        series: year_page_scatter(dataset, &visible),
    }));

    // -- Genre counts --
    calls.push(DisplayCall::Heading("🏷️ Books per Genre".into()));
    calls.push(DisplayCall::Chart(ChartSpec::Bar {
        title: "books_per_genre".into(),
        x_label: "Genre".into(),
        y_label: "Number of Books".into(),
        bars: genre_counts(dataset, &visible),
    }));

    // -- Page-length histogram --
    calls.push(DisplayCall::Heading("📊 Distribution of Book Lengths".into()));
    calls.push(DisplayCall::Chart(ChartSpec::Histogram {
        title: "page_lengths".into(),
        x_label: "Pages".into(),
        histogram: page_histogram(dataset, &visible, HISTOGRAM_BINS),
    }));

    // -- Language counts --
    calls.push(DisplayCall::Heading("🌐 Language Distribution".into()));
    calls.push(DisplayCall::Chart(ChartSpec::Bar {
        title: "books_per_language".into(),
        x_label: "Language".into(),
        y_label: "Number of Books".into(),
        bars: language_counts(dataset, &visible),
    }));

    // -- Cover preview: only for a non-empty view with a resolvable title --
    if !visible.is_empty() {
        calls.push(DisplayCall::Heading("🖼️ Book Cover Preview".into()));
        let selected = selected_title.and_then(|title| {
            visible
                .iter()
                .map(|&i| &dataset.books[i])
                .find(|b| b.title == title)
        });
        match selected {
            Some(book) if !book.thumbnail.is_empty() => {
                calls.push(DisplayCall::Image {
                    uri: book.thumbnail.clone(),
                    caption: book.title.clone(),
                });
            }
            Some(book) => {
                calls.push(DisplayCall::Text(format!("No cover on file for “{}”.", book.title)));
            }
            None => {
                calls.push(DisplayCall::Text("Select a book to view its cover.".into()));
            }
        }
    }

    calls
}

fn summary_text(dataset: &BookDataset) -> String {
    format!(
        "Dataset summary\n\
         • Total books: {}\n\
         • Genres covered: {}\n\
         • Languages represented: {}\n\
         • Publication span: up to {}",
        dataset.len(),
        dataset.genre_count,
        dataset.languages.len(),
        dataset.max_year,
    )
}

fn books_table(dataset: &BookDataset, visible: &[usize]) -> DisplayCall {
    let headers = vec![
        "Title".to_string(),
        "Author".to_string(),
        "Genre".to_string(),
        "Language".to_string(),
        "Pages".to_string(),
        "Year".to_string(),
    ];
    let rows = visible
        .iter()
        .map(|&i| {
            let b = &dataset.books[i];
            vec![
                b.title.clone(),
                b.author.clone(),
                b.genre.clone(),
                b.language.clone().unwrap_or_default(),
                b.pages.to_string(),
                b.year.to_string(),
            ]
        })
        .collect();
    DisplayCall::Table {
        title: "Filtered Books".into(),
        headers,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::LanguageFilter;
    use crate::data::model::Book;

    fn book(title: &str, pages: u32, thumbnail: &str) -> Book {
        Book {
            title: title.into(),
            author: "a".into(),
            genre: "Fiction".into(),
            language: Some("en".into()),
            pages,
            year: 1990,
            thumbnail: thumbnail.into(),
        }
    }

    fn dataset() -> BookDataset {
        BookDataset::from_books(vec![
            book("short", 50, "http://covers/short.png"),
            book("medium", 150, "http://covers/medium.png"),
            book("long", 300, ""),
        ])
    }

    fn criteria(min_pages: u32) -> FilterCriteria {
        FilterCriteria {
            min_pages,
            language: LanguageFilter::All,
        }
    }

    #[test]
    fn empty_view_emits_no_image_call() {
        let ds = dataset();
        let calls = render(&ds, &criteria(1000), Some("short"));
        assert!(!calls.iter().any(|c| matches!(c, DisplayCall::Image { .. })));
        assert!(calls.iter().any(
            |c| matches!(c, DisplayCall::Text(t) if t.contains("No books match"))
        ));
    }

    #[test]
    fn selection_outside_the_view_is_not_resolved() {
        let ds = dataset();
        // "short" fails min_pages=100, so it must not be shown even though
        // it exists in the dataset.
        let calls = render(&ds, &criteria(100), Some("short"));
        assert!(!calls.iter().any(|c| matches!(c, DisplayCall::Image { .. })));
    }

    #[test]
    fn selected_book_with_cover_produces_an_image_call() {
        let ds = dataset();
        let calls = render(&ds, &criteria(100), Some("medium"));
        let image = calls.iter().find_map(|c| match c {
            DisplayCall::Image { uri, caption } => Some((uri.clone(), caption.clone())),
            _ => None,
        });
        assert_eq!(
            image,
            Some(("http://covers/medium.png".to_string(), "medium".to_string()))
        );
    }

    #[test]
    fn table_contains_exactly_the_filtered_rows() {
        let ds = dataset();
        let calls = render(&ds, &criteria(100), None);
        let rows = calls
            .iter()
            .find_map(|c| match c {
                DisplayCall::Table { rows, .. } => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "medium");
        assert_eq!(rows[1][0], "long");
    }

    #[test]
    fn render_is_idempotent() {
        let ds = dataset();
        let c = criteria(100);
        assert_eq!(render(&ds, &c, Some("medium")), render(&ds, &c, Some("medium")));
    }

    #[test]
    fn csv_to_display_calls_end_to_end() {
        use std::io::Write;
        let path = std::env::temp_dir().join("literary_compass_pipeline.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(
            b"title,author,genre,language,pages,published_date,thumbnail\n\
              Solaris,S. Lem,Science Fiction,en,204,1961-06-01,http://covers/solaris.png\n\
              Broken,Nobody,Mystery,,oops,never,\n",
        )
        .unwrap();

        let ds = crate::data::loader::load_file(&path).unwrap();
        let calls = render(
            &ds,
            &FilterCriteria {
                min_pages: 100,
                language: LanguageFilter::Only("en".into()),
            },
            Some("Solaris"),
        );

        // The malformed row was normalized (pages 0, year 0) and then
        // filtered out; Solaris survives with its cover.
        assert!(calls.iter().any(|c| matches!(
            c,
            DisplayCall::Image { uri, .. } if uri == "http://covers/solaris.png"
        )));
        let rows = calls
            .iter()
            .find_map(|c| match c {
                DisplayCall::Table { rows, .. } => Some(rows.len()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows, 1);
    }
}
