//! SQLite-backed hack catalog implementation.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension};

use crate::filters::{SortDirection, SortKey, SortSpec};

use super::{
    CatalogError, CatalogFilters, CatalogQuery, CatalogStore, FilterOptions, HackRow, HackStatus,
};

/// SQLite-backed hack catalog.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn new(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path).map_err(|e| CatalogError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite catalog (useful for testing).
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn =
            Connection::open_in_memory().map_err(|e| CatalogError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), CatalogError> {
        conn.execute_batch(
            r#"
            -- Cached remote catalog (one row per hack id)
            CREATE TABLE IF NOT EXISTS hacks (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                file_path TEXT,
                authors TEXT,
                release_date INTEGER,
                description TEXT,
                images TEXT,
                tags TEXT,
                rating REAL,
                downloads INTEGER,
                difficulty TEXT,
                hack_type TEXT,
                download_url TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_hacks_name ON hacks(name);
            CREATE INDEX IF NOT EXISTS idx_hacks_difficulty ON hacks(difficulty);
            CREATE INDEX IF NOT EXISTS idx_hacks_rating ON hacks(rating);
            "#,
        )
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(())
    }

    /// Build the WHERE clause for a filter set.
    ///
    /// Difficulty selections combine with OR, hack-type selections with
    /// AND. A hack-type match covers the four placements a value can take
    /// inside the stored comma-separated list.
    fn build_where(filters: &CatalogFilters) -> (String, Vec<Box<dyn ToSql>>) {
        let mut clauses: Vec<String> = Vec::new();
        let mut args: Vec<Box<dyn ToSql>> = Vec::new();

        match filters.status {
            Some(HackStatus::Patched) => clauses.push("file_path IS NOT NULL".to_string()),
            Some(HackStatus::Unpatched) => clauses.push("file_path IS NULL".to_string()),
            None => {}
        }

        if !filters.difficulties.is_empty() {
            let ors = vec!["difficulty = ?"; filters.difficulties.len()].join(" OR ");
            clauses.push(format!("({ors})"));
            for difficulty in &filters.difficulties {
                args.push(Box::new(difficulty.clone()));
            }
        } else if let Some(difficulty) = &filters.difficulty {
            clauses.push("difficulty = ?".to_string());
            args.push(Box::new(difficulty.clone()));
        }

        for hack_type in &filters.hack_types {
            clauses.push(
                "(hack_type = ? OR hack_type LIKE ? OR hack_type LIKE ? OR hack_type LIKE ?)"
                    .to_string(),
            );
            args.push(Box::new(hack_type.clone()));
            args.push(Box::new(format!("{hack_type}, %")));
            args.push(Box::new(format!("%, {hack_type}, %")));
            args.push(Box::new(format!("%, {hack_type}")));
        }

        if let Some(author) = &filters.author {
            // authors holds JSON text, so match on the serialized name field
            clauses.push("authors LIKE ?".to_string());
            args.push(Box::new(format!("%\"name\":\"{author}\"%")));
        }

        if let Some(min_rating) = filters.min_rating {
            clauses.push("rating >= ?".to_string());
            args.push(Box::new(min_rating));
        }

        if clauses.is_empty() {
            (String::new(), args)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), args)
        }
    }

    fn order_clause(sort: SortSpec) -> String {
        let direction = match sort.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        match sort.key {
            SortKey::Name => format!(" ORDER BY name COLLATE NOCASE {direction}"),
            SortKey::Date => format!(" ORDER BY release_date {direction} NULLS LAST"),
            SortKey::Rating => format!(" ORDER BY rating {direction} NULLS LAST"),
            SortKey::Downloads => format!(" ORDER BY downloads {direction} NULLS LAST"),
        }
    }

    fn row_to_hack(row: &rusqlite::Row) -> rusqlite::Result<HackRow> {
        Ok(HackRow {
            id: row.get(0)?,
            name: row.get(1)?,
            file_path: row.get(2)?,
            authors: row.get(3)?,
            release_date: row.get(4)?,
            description: row.get(5)?,
            images: row.get(6)?,
            tags: row.get(7)?,
            rating: row.get(8)?,
            downloads: row.get(9)?,
            difficulty: row.get(10)?,
            hack_type: row.get(11)?,
            download_url: row.get(12)?,
        })
    }
}

const SELECT_COLUMNS: &str = "id, name, file_path, authors, release_date, description, \
     images, tags, rating, downloads, difficulty, hack_type, download_url";

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn query(&self, query: &CatalogQuery) -> Result<Vec<HackRow>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let (where_clause, mut args) = Self::build_where(&query.filters);
        let order_clause = Self::order_clause(query.sort);
        let (limit, offset) = query.pagination.limit_offset();

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM hacks{where_clause}{order_clause} LIMIT ? OFFSET ?"
        );
        args.push(Box::new(limit));
        args.push(Box::new(offset));

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let params: Vec<&dyn ToSql> = args.iter().map(|a| a.as_ref()).collect();
        let rows = stmt
            .query_map(params.as_slice(), Self::row_to_hack)
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| CatalogError::Database(e.to_string()))?);
        }
        Ok(results)
    }

    async fn filter_options(&self) -> Result<FilterOptions, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT difficulty FROM hacks
                 WHERE difficulty IS NOT NULL AND difficulty != ''
                 ORDER BY difficulty",
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        let mut difficulties = Vec::new();
        for row in rows {
            difficulties.push(row.map_err(|e| CatalogError::Database(e.to_string()))?);
        }

        // hack_type stores comma-separated lists, so split and dedupe in code
        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT hack_type FROM hacks
                 WHERE hack_type IS NOT NULL AND hack_type != ''",
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut hack_types: Vec<String> = Vec::new();
        for row in rows {
            let list = row.map_err(|e| CatalogError::Database(e.to_string()))?;
            for part in list.split(',') {
                let part = part.trim();
                if !part.is_empty() && !hack_types.iter().any(|t| t == part) {
                    hack_types.push(part.to_string());
                }
            }
        }
        hack_types.sort();

        Ok(FilterOptions {
            difficulties,
            hack_types,
        })
    }

    async fn store_rows(&self, rows: &[HackRow]) -> Result<u32, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let mut new_count = 0;

        for row in rows {
            let exists: bool = conn
                .query_row("SELECT 1 FROM hacks WHERE id = ?", params![row.id], |_| {
                    Ok(true)
                })
                .optional()
                .map_err(|e| CatalogError::Database(e.to_string()))?
                .unwrap_or(false);

            if exists {
                // file_path is local-only state, never overwritten by sync
                conn.execute(
                    "UPDATE hacks SET name = ?, authors = ?, release_date = ?, description = ?,
                        images = ?, tags = ?, rating = ?, downloads = ?, difficulty = ?,
                        hack_type = ?, download_url = ?
                     WHERE id = ?",
                    params![
                        &row.name,
                        &row.authors,
                        row.release_date,
                        &row.description,
                        &row.images,
                        &row.tags,
                        row.rating,
                        row.downloads,
                        &row.difficulty,
                        &row.hack_type,
                        &row.download_url,
                        row.id,
                    ],
                )
                .map_err(|e| CatalogError::Database(e.to_string()))?;
            } else {
                conn.execute(
                    "INSERT INTO hacks (id, name, file_path, authors, release_date, description,
                        images, tags, rating, downloads, difficulty, hack_type, download_url)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                    params![
                        row.id,
                        &row.name,
                        &row.file_path,
                        &row.authors,
                        row.release_date,
                        &row.description,
                        &row.images,
                        &row.tags,
                        row.rating,
                        row.downloads,
                        &row.difficulty,
                        &row.hack_type,
                        &row.download_url,
                    ],
                )
                .map_err(|e| CatalogError::Database(e.to_string()))?;
                new_count += 1;
            }
        }

        Ok(new_count)
    }
}
