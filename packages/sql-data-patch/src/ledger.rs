use rusqlite::Connection;
use std::collections::HashSet;

use crate::PatchResult;

/// Ensures the patch tracking table exists in the database.
///
/// Creates a `_patches` table if it doesn't exist, which tracks:
/// - `id`: The unique identifier of each applied patch
/// - `applied_at`: Timestamp when the patch was applied
pub fn ensure_ledger_table(conn: &Connection) -> PatchResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _patches (
            id TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

/// Retrieves the set of already applied patch ids from the ledger.
pub fn applied_patches(conn: &Connection) -> PatchResult<HashSet<String>> {
    let mut statement = conn.prepare("SELECT id FROM _patches")?;

    let patch_ids = statement.query_map([], |row| row.get::<_, String>(0))?;

    let mut applied_set = HashSet::new();
    for id in patch_ids.into_iter().flatten() {
        applied_set.insert(id);
    }

    Ok(applied_set)
}

/// Returns whether the ledger already holds an entry for `id`.
pub fn has_applied(conn: &Connection, id: &str) -> PatchResult<bool> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM _patches WHERE id = ?1", [id], |row| {
        row.get(0)
    })?;
    Ok(count > 0)
}

/// Records `id` as applied.
///
/// The ledger's primary key enforces at-most-once: recording the same id
/// twice fails with the underlying constraint error.
pub fn record_applied(conn: &Connection, id: &str) -> PatchResult<()> {
    conn.execute("INSERT INTO _patches(id) VALUES (?1)", [id])?;
    Ok(())
}
