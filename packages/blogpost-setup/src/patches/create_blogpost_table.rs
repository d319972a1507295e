use sql_data_patch::{DataPatch, DataSetup, PatchResult};

use crate::BLOGPOST_TABLE;

/// Creates the blog post table. The store assigns row ids.
pub struct CreateBlogPostTable;

impl DataPatch for CreateBlogPostTable {
    fn id(&self) -> &'static str {
        "create_blogpost_table"
    }

    fn apply(&self, setup: &mut DataSetup<'_>) -> PatchResult<()> {
        setup.start_setup()?;
        setup.connection().execute(
            &format!(
                "CREATE TABLE {} (
                    blogpost_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    content TEXT,
                    author TEXT,
                    status INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                setup.table(BLOGPOST_TABLE)
            ),
            [],
        )?;
        setup.end_setup()?;
        Ok(())
    }
}
