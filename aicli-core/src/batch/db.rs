//! SQLite table source for the batch pipeline.
//!
//! The table must have `id` (integer), `content`, `prompt` and `result`
//! columns. Only rows whose `result` is NULL or empty are selected, in pages
//! ordered by `id`. A row's `prompt` and `result` are written back only when
//! the model call succeeds, so failed rows stay pending for the next run.

use std::path::Path;

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OpenFlags, params};
use tracing::{error, info, warn};

use super::{BatchProcessor, BatchSummary, RowOutcome};

/// Rows fetched per query
pub const DB_PAGE_SIZE: usize = 100;

static TABLE_NAME_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").ok());

/// A pending row read from the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbRow {
    pub id: i64,
    pub content: String,
    pub prompt: String,
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
pub fn is_valid_table_name(table: &str) -> bool {
    TABLE_NAME_RE
        .as_ref()
        .is_some_and(|re| re.is_match(table))
}

/// Open an existing database file for reading and writing.
pub fn open_database(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
        .with_context(|| format!("Failed to open database: {}", path.display()))
}

fn fetch_page(conn: &Connection, table: &str, after_id: i64, limit: usize) -> Result<Vec<DbRow>> {
    let sql = format!(
        "SELECT id, content, prompt FROM \"{table}\" \
         WHERE (result IS NULL OR result = '') AND id > ?1 \
         ORDER BY id ASC LIMIT ?2"
    );
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("Failed to query table '{table}'"))?;

    let rows = stmt
        .query_map(params![after_id, limit as i64], |row| {
            Ok(DbRow {
                id: row.get(0)?,
                content: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                prompt: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read rows from '{table}'"))?;
    Ok(rows)
}

fn write_back(conn: &Connection, table: &str, row: &DbRow, prompt: &str, result: &str) -> Result<()> {
    let sql = format!("UPDATE \"{table}\" SET prompt = ?1, result = ?2 WHERE id = ?3");
    conn.execute(&sql, params![prompt, result, row.id])?;
    Ok(())
}

impl BatchProcessor<'_> {
    /// Prompt for a table row: the global template when one is set, else the
    /// row's `prompt` column as-is. A template failure falls back to the
    /// raw row prompt.
    pub fn build_table_prompt(&self, content: &str, row_prompt: &str) -> String {
        let Some(template) = &self.global_template else {
            return row_prompt.to_string();
        };

        template
            .render_pairs(&[("Content", content)])
            .unwrap_or_else(|err| {
                warn!(error = %err, "prompt template failed, using the raw row prompt");
                row_prompt.to_string()
            })
    }

    /// Process every pending row of `table`.
    pub async fn process_table(&self, conn: &Connection, table: &str) -> Result<BatchSummary> {
        self.process_table_paged(conn, table, DB_PAGE_SIZE).await
    }

    /// [`BatchProcessor::process_table`] with an explicit page size.
    pub async fn process_table_paged(
        &self,
        conn: &Connection,
        table: &str,
        page_size: usize,
    ) -> Result<BatchSummary> {
        if !is_valid_table_name(table) {
            bail!("Invalid table name '{table}': use letters, digits and underscores");
        }
        if page_size == 0 {
            bail!("Page size must be at least 1");
        }

        let mut summary = BatchSummary::default();
        let mut last_id = 0_i64;
        let mut page = 0_usize;

        loop {
            let rows = fetch_page(conn, table, last_id, page_size)?;
            if rows.is_empty() {
                break;
            }
            page += 1;

            for row in rows {
                last_id = row.id;
                summary.processed += 1;
                info!(page, id = row.id, total = summary.processed, "processing row");

                let prompt = self.build_table_prompt(&row.content, &row.prompt);
                match self.run_row(&prompt).await {
                    RowOutcome::Reply(reply) => {
                        match write_back(conn, table, &row, &prompt, &reply) {
                            Ok(()) => {
                                summary.succeeded += 1;
                                info!(id = row.id, "row updated");
                            }
                            Err(err) => {
                                summary.failed += 1;
                                error!(id = row.id, error = %err, "failed to update row");
                            }
                        }
                    }
                    RowOutcome::Failed(err) => {
                        summary.failed += 1;
                        error!(id = row.id, error = %err, "failed to generate reply");
                    }
                    RowOutcome::TimedOut => {
                        summary.failed += 1;
                        error!(id = row.id, timeout_secs = self.row_timeout.as_secs(), "row timed out");
                    }
                }
            }
            info!(page, processed = summary.processed, "page complete");
        }

        info!(processed = summary.processed, updated = summary.succeeded, "no more pending rows");
        Ok(summary)
    }

    /// Open `path` and process `table` in it.
    pub async fn process_db_file(&self, path: impl AsRef<Path>, table: &str) -> Result<BatchSummary> {
        let conn = open_database(path.as_ref())?;
        self.process_table(&conn, table).await
    }
}
