use rusqlite::{params_from_iter, types::Value, Connection};

use crate::{Error, PatchResult};

/// Scoped session handle handed to a patch while it runs.
///
/// Borrows the connection (or the runner's transaction, which derefs to one)
/// for the duration of a single `apply` call, so the handle cannot outlive
/// the patch application.
pub struct DataSetup<'conn> {
    conn: &'conn Connection,
    table_prefix: Option<String>,
}

impl<'conn> DataSetup<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            table_prefix: None,
        }
    }

    /// A handle that resolves table names with the given prefix.
    pub fn with_prefix(conn: &'conn Connection, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            table_prefix: Some(prefix.into()),
        }
    }

    /// Raw access to the underlying connection, for DDL and one-off
    /// statements the helpers don't cover.
    pub fn connection(&self) -> &Connection {
        self.conn
    }

    /// Resolves a logical table name to its physical name.
    pub fn table(&self, name: &str) -> String {
        match &self.table_prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }

    /// Marks the start of setup work.
    ///
    /// Defers foreign key enforcement until the enclosing transaction
    /// commits. SQLite resets the pragma at commit or rollback, so the
    /// suspension cannot leak past the patch on any exit path.
    pub fn start_setup(&self) -> PatchResult<()> {
        self.conn.pragma_update(None, "defer_foreign_keys", true)?;
        Ok(())
    }

    /// Marks the end of setup work, restoring immediate FK enforcement.
    pub fn end_setup(&self) -> PatchResult<()> {
        self.conn.pragma_update(None, "defer_foreign_keys", false)?;
        Ok(())
    }

    /// Inserts all `rows` into `table` with a single multi-row INSERT
    /// statement. Returns the number of rows inserted.
    ///
    /// The statement is one call to the storage engine, so its atomicity is
    /// the engine's single-statement guarantee: all rows or none. An empty
    /// row set is a no-op.
    pub fn insert_multiple(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
    ) -> PatchResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        for row in rows {
            if row.len() != columns.len() {
                return Err(Error::ArityMismatch {
                    columns: columns.len(),
                    values: row.len(),
                });
            }
        }

        let tuple = format!("({})", vec!["?"; columns.len()].join(", "));
        let tuples = vec![tuple; rows.len()].join(", ");
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES {}",
            columns.join(", "),
            tuples
        );

        let mut statement = self.conn.prepare(&sql)?;
        let inserted = statement.execute(params_from_iter(rows.iter().flatten()))?;
        Ok(inserted)
    }
}
