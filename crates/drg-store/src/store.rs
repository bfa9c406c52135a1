//! SQLite-backed table storage.

use std::path::{Path, PathBuf};

use drg_model::TableKind;
use rusqlite::{Connection, OptionalExtension, params_from_iter};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::filter::RowFilter;
use crate::record::{ColumnDef, StoredRecord};

/// One named table per [`TableKind`], each fully replaced on upload.
///
/// Reads of a table that was never written return no rows.
pub struct TabularStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl TabularStore {
    /// Opens (or creates) a database file.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened store");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: None,
        })
    }

    /// Database file path, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replaces the whole table for `R` with `rows`.
    ///
    /// Runs in one transaction. On any failure the previous table content
    /// is left untouched.
    pub fn replace_table<R: StoredRecord>(&mut self, rows: &[R]) -> Result<usize> {
        let table = R::KIND.table_name();
        let columns = R::columns();
        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS \"{table}\""))?;
        tx.execute_batch(&create_table_sql(table, columns))?;
        {
            let mut insert = tx.prepare(&insert_sql(table, columns))?;
            for (idx, row) in rows.iter().enumerate() {
                let values = row.to_values();
                if values.len() != columns.len() {
                    return Err(StoreError::RowShape {
                        table,
                        row: idx,
                        expected: columns.len(),
                        actual: values.len(),
                    });
                }
                insert.execute(params_from_iter(values.iter()))?;
            }
        }
        tx.commit()?;
        info!(table, rows = rows.len(), "replaced table");
        Ok(rows.len())
    }

    /// Drops a table. Returns whether it existed.
    pub fn drop_table(&mut self, kind: TableKind) -> Result<bool> {
        let existed = self.table_exists(kind)?;
        self.conn
            .execute_batch(&format!("DROP TABLE IF EXISTS \"{}\"", kind.table_name()))?;
        if existed {
            info!(table = kind.table_name(), "dropped table");
        }
        Ok(existed)
    }

    /// Rows of `R` matching `filter`, in insertion order.
    pub fn select<R: StoredRecord>(&self, filter: &RowFilter) -> Result<Vec<R>> {
        let table = R::KIND.table_name();
        let columns = R::columns();
        for (column, _) in filter.conditions() {
            if !columns.iter().any(|def| def.name == *column) {
                return Err(StoreError::UnknownColumn {
                    table,
                    column: (*column).to_string(),
                });
            }
        }
        if !self.table_exists(R::KIND)? {
            debug!(table, "table not loaded");
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM \"{table}\"{} ORDER BY rowid",
            column_list(columns),
            filter.where_clause()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let values = filter.conditions().iter().map(|(_, value)| value);
        let rows = stmt
            .query_map(params_from_iter(values), |row| R::from_row(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Every row of `R`.
    pub fn load<R: StoredRecord>(&self) -> Result<Vec<R>> {
        self.select(&RowFilter::all())
    }

    pub fn table_exists(&self, kind: TableKind) -> Result<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [kind.table_name()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn row_count(&self, kind: TableKind) -> Result<usize> {
        if !self.table_exists(kind)? {
            return Ok(0);
        }
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM \"{}\"", kind.table_name()),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

fn column_list(columns: &[ColumnDef]) -> String {
    columns
        .iter()
        .map(|def| format!("\"{}\"", def.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn create_table_sql(table: &str, columns: &[ColumnDef]) -> String {
    let defs = columns
        .iter()
        .map(|def| format!("\"{}\" {}", def.name, def.sql_type.as_sql()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE \"{table}\" ({defs})")
}

fn insert_sql(table: &str, columns: &[ColumnDef]) -> String {
    let placeholders = (1..=columns.len())
        .map(|idx| format!("?{idx}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO \"{table}\" ({}) VALUES ({placeholders})",
        column_list(columns)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SqlType;

    const COLUMNS: &[ColumnDef] = &[
        ColumnDef {
            name: "a",
            sql_type: SqlType::Text,
        },
        ColumnDef {
            name: "b",
            sql_type: SqlType::Real,
        },
    ];

    #[test]
    fn builds_create_and_insert_statements() {
        assert_eq!(
            create_table_sql("t", COLUMNS),
            "CREATE TABLE \"t\" (\"a\" TEXT, \"b\" REAL)"
        );
        assert_eq!(
            insert_sql("t", COLUMNS),
            "INSERT INTO \"t\" (\"a\", \"b\") VALUES (?1, ?2)"
        );
    }
}
