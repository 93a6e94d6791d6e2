use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{BookDataset, RawBook};
use super::normalize::normalize_dataset;

/// Loader failures worth distinguishing in the status line.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalize a books dataset from a file.  Dispatch by extension.
///
/// Every format must provide the columns
/// `title, author, genre, language, pages, published_date, thumbnail`.
///
/// Supported formats:
/// * `.parquet` – flat scalar columns
/// * `.json`    – `[{ "title": ..., "pages": ..., ... }, ...]`
/// * `.csv`     – header row with the column names
pub fn load_file(path: &Path) -> Result<BookDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }?;

    Ok(normalize_dataset(raw))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "title": "The Left Hand of Darkness",
///     "author": "Ursula K. Le Guin",
///     "genre": "Science Fiction",
///     "language": "en",
///     "pages": "304",
///     "published_date": "1969-03-01",
///     "thumbnail": "https://covers.example/lhod.jpg"
///   },
///   ...
/// ]
/// ```
///
/// `pages` may be a JSON number or a string; both are kept as text for the
/// normalizer to coerce.
fn load_json(path: &Path) -> Result<Vec<RawBook>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut books = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        books.push(RawBook {
            title: json_cell(obj.get("title")),
            author: json_cell(obj.get("author")),
            genre: json_cell(obj.get("genre")),
            language: non_empty(json_cell(obj.get("language"))),
            pages: json_cell(obj.get("pages")),
            published_date: json_cell(obj.get("published_date")),
            thumbnail: json_cell(obj.get("thumbnail")),
        });
    }

    Ok(books)
}

/// Render a JSON cell as text; nulls and missing keys become "".
fn json_cell(val: Option<&JsonValue>) -> String {
    match val {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the required column names; extra columns
/// are ignored.  Empty `language` cells become null.
fn load_csv(path: &Path) -> Result<Vec<RawBook>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let title_idx = col("title")?;
    let author_idx = col("author")?;
    let genre_idx = col("genre")?;
    let language_idx = col("language")?;
    let pages_idx = col("pages")?;
    let date_idx = col("published_date")?;
    let thumbnail_idx = col("thumbnail")?;

    let mut books = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();

        books.push(RawBook {
            title: cell(title_idx),
            author: cell(author_idx),
            genre: cell(genre_idx),
            language: non_empty(cell(language_idx)),
            pages: cell(pages_idx),
            published_date: cell(date_idx),
            thumbnail: cell(thumbnail_idx),
        });
    }

    Ok(books)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet books table.
///
/// Columns are flat scalars.  `pages` may be a string or any integer/float
/// type; every cell is rendered to text for the normalizer.  Works with
/// files written by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawBook>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut books = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let col = |name: &'static str| -> Result<Arc<dyn Array>> {
            let idx = schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name))?;
            Ok(batch.column(idx).clone())
        };
        let title = col("title")?;
        let author = col("author")?;
        let genre = col("genre")?;
        let language = col("language")?;
        let pages = col("pages")?;
        let published_date = col("published_date")?;
        let thumbnail = col("thumbnail")?;

        for row in 0..batch.num_rows() {
            books.push(RawBook {
                title: cell_text(&title, row)?.unwrap_or_default(),
                author: cell_text(&author, row)?.unwrap_or_default(),
                genre: cell_text(&genre, row)?.unwrap_or_default(),
                language: cell_text(&language, row)?.and_then(non_empty),
                pages: cell_text(&pages, row)?.unwrap_or_default(),
                published_date: cell_text(&published_date, row)?.unwrap_or_default(),
                thumbnail: cell_text(&thumbnail, row)?.unwrap_or_default(),
            });
        }
    }

    Ok(books)
}

// -- Parquet / Arrow helpers --

/// Render a scalar Arrow cell as text; nulls become `None`.
fn cell_text(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            arr.value(row).to_string()
        }
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            arr.value(row).to_string()
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            arr.value(row).to_string()
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            arr.value(row).to_string()
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            arr.value(row).to_string()
        }
        DataType::Boolean => {
            let arr = col
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("expected BooleanArray")?;
            arr.value(row).to_string()
        }
        other => bail!("Unsupported column type {other:?}"),
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_round_trip_through_normalizer() {
        let path = write_temp(
            "literary_compass_loader_test.csv",
            "title,author,genre,language,pages,published_date,thumbnail\n\
             Dune,Frank Herbert,Science Fiction,en,412,1965-08-01,http://covers/dune.png\n\
             Mystery,Unknown,Thriller,,not-a-number,garbage,\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.books[0].pages, 412);
        assert_eq!(ds.books[0].year, 1965);
        assert_eq!(ds.books[1].pages, 0);
        assert_eq!(ds.books[1].year, 0);
        assert_eq!(ds.books[1].language, None);
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let path = write_temp(
            "literary_compass_loader_missing.csv",
            "title,author,genre,language,published_date,thumbnail\na,b,c,d,e,f\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("pages"));
    }

    #[test]
    fn json_numbers_and_nulls_are_accepted() {
        let path = write_temp(
            "literary_compass_loader_test.json",
            r#"[{"title":"T","author":"A","genre":"G","language":null,"pages":320,"published_date":"2001-05","thumbnail":""}]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.books[0].pages, 320);
        assert_eq!(ds.books[0].year, 2001);
        assert_eq!(ds.books[0].language, None);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_file(Path::new("books.xlsx")).unwrap_err();
        assert!(err.to_string().contains("xlsx"));
    }
}
