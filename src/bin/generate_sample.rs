use std::sync::Arc;

use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `[lo, hi)`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo)
    }
}

struct SampleBook {
    title: String,
    author: String,
    genre: &'static str,
    language: Option<&'static str>,
    pages: String,
    published_date: String,
    thumbnail: String,
}

fn generate_books(rng: &mut SimpleRng) -> Vec<SampleBook> {
    let subjects = [
        "Garden", "Harbor", "Cipher", "Orchard", "Lantern", "Meridian", "Archive", "Voyage",
    ];
    let qualifiers = [
        "Forgotten", "Silent", "Last", "Glass", "Winter", "Burning",
    ];
    let authors = [
        "I. Calvino", "A. Munro", "S. Lem", "C. Fuentes", "T. Morrison", "H. Murakami",
        "W. Szymborska", "J. Saramago",
    ];
    let genres = [
        "Fiction", "Science Fiction", "Mystery", "Poetry", "History", "Biography",
    ];
    let languages: [Option<&'static str>; 6] =
        [Some("en"), Some("en"), Some("es"), Some("de"), Some("ja"), None];

    let mut books = Vec::new();
    for i in 0..48u64 {
        let title = format!(
            "The {} {}",
            qualifiers[rng.range(0, qualifiers.len() as u64) as usize],
            subjects[rng.range(0, subjects.len() as u64) as usize],
        );
        let author = authors[rng.range(0, authors.len() as u64) as usize];
        let genre = genres[rng.range(0, genres.len() as u64) as usize];
        let language = languages[rng.range(0, languages.len() as u64) as usize];

        // Every 8th row gets deliberately dirty cells so the normalizer's
        // default-to-zero path is exercised end to end.
        let (pages, published_date) = if i % 8 == 7 {
            ("n/a".to_string(), "date unknown".to_string())
        } else {
            let pages = rng.range(60, 720).to_string();
            let year = rng.range(1950, 2021);
            let month = rng.range(1, 13);
            // Mix full dates with year-month and bare-year forms.
            let date = match i % 3 {
                0 => format!("{year}-{month:02}-{:02}", rng.range(1, 29)),
                1 => format!("{year}-{month:02}"),
                _ => format!("{year}"),
            };
            (pages, date)
        };

        let thumbnail = if i % 5 == 4 {
            String::new()
        } else {
            format!("https://covers.example.org/books/{i:03}.png")
        };

        books.push(SampleBook {
            title: format!("{title} #{i}"),
            author: author.to_string(),
            genre,
            language,
            pages,
            published_date,
            thumbnail,
        });
    }
    books
}

fn write_csv(books: &[SampleBook], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            "title",
            "author",
            "genre",
            "language",
            "pages",
            "published_date",
            "thumbnail",
        ])
        .expect("Failed to write CSV header");
    for book in books {
        writer
            .write_record([
                book.title.as_str(),
                book.author.as_str(),
                book.genre,
                book.language.unwrap_or(""),
                book.pages.as_str(),
                book.published_date.as_str(),
                book.thumbnail.as_str(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_parquet(books: &[SampleBook], path: &str) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, false),
        Field::new("author", DataType::Utf8, false),
        Field::new("genre", DataType::Utf8, false),
        Field::new("language", DataType::Utf8, true),
        Field::new("pages", DataType::Utf8, false),
        Field::new("published_date", DataType::Utf8, false),
        Field::new("thumbnail", DataType::Utf8, false),
    ]));

    let title_array = StringArray::from(books.iter().map(|b| b.title.as_str()).collect::<Vec<_>>());
    let author_array =
        StringArray::from(books.iter().map(|b| b.author.as_str()).collect::<Vec<_>>());
    let genre_array = StringArray::from(books.iter().map(|b| b.genre).collect::<Vec<_>>());
    let language_array = StringArray::from(books.iter().map(|b| b.language).collect::<Vec<_>>());
    let pages_array = StringArray::from(books.iter().map(|b| b.pages.as_str()).collect::<Vec<_>>());
    let date_array = StringArray::from(
        books
            .iter()
            .map(|b| b.published_date.as_str())
            .collect::<Vec<_>>(),
    );
    let thumbnail_array = StringArray::from(
        books
            .iter()
            .map(|b| b.thumbnail.as_str())
            .collect::<Vec<_>>(),
    );

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(title_array),
            Arc::new(author_array),
            Arc::new(genre_array),
            Arc::new(language_array),
            Arc::new(pages_array),
            Arc::new(date_array),
            Arc::new(thumbnail_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let books = generate_books(&mut rng);

    write_csv(&books, "books.csv");
    write_parquet(&books, "books.parquet");

    println!("Wrote {} books to books.csv and books.parquet", books.len());
}
