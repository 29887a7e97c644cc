//! Row builders for tests.

use crate::catalog::HackRow;

/// A minimal catalog row.
pub fn hack_row(id: u32, name: &str) -> HackRow {
    HackRow {
        id,
        name: name.to_string(),
        file_path: None,
        authors: None,
        release_date: None,
        description: None,
        images: None,
        tags: None,
        rating: None,
        downloads: None,
        difficulty: None,
        hack_type: None,
        download_url: None,
    }
}

/// A row with the fields the query filters care about.
pub fn hack_row_full(
    id: u32,
    name: &str,
    difficulty: Option<&str>,
    hack_type: Option<&str>,
    rating: Option<f64>,
    authors: Option<&str>,
) -> HackRow {
    HackRow {
        difficulty: difficulty.map(str::to_string),
        hack_type: hack_type.map(str::to_string),
        rating,
        authors: authors.map(str::to_string),
        ..hack_row(id, name)
    }
}
