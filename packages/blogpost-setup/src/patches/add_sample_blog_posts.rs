use sql_data_patch::{DataPatch, DataSetup, PatchResult, Value};

use crate::BLOGPOST_TABLE;

/// One sample post, built as a literal at apply time.
struct SamplePost {
    title: &'static str,
    content: &'static str,
    author: &'static str,
    status: i64,
}

impl SamplePost {
    fn into_row(self) -> Vec<Value> {
        vec![
            Value::from(self.title.to_string()),
            Value::from(self.content.to_string()),
            Value::from(self.author.to_string()),
            Value::from(self.status),
        ]
    }
}

/// Seeds the blog post table with sample content: two published posts and
/// one draft.
///
/// Performs no existence check; calling `apply` on a table that already holds
/// the samples inserts them again. At-most-once execution is owed by the
/// runner's ledger, not by this patch.
pub struct AddSampleBlogPosts;

impl DataPatch for AddSampleBlogPosts {
    fn id(&self) -> &'static str {
        "add_sample_blog_posts"
    }

    fn apply(&self, setup: &mut DataSetup<'_>) -> PatchResult<()> {
        setup.start_setup()?;

        let samples = [
            SamplePost {
                title: "First Blog Post",
                content: "This is the content of the first blog post. It demonstrates how to create and manage blog posts in Magento 2.",
                author: "John Doe",
                status: 1,
            },
            SamplePost {
                title: "Second Blog Post",
                content: "This is the content of the second blog post. It shows how to work with the admin grid in Magento 2.",
                author: "Jane Smith",
                status: 1,
            },
            SamplePost {
                title: "Draft Blog Post",
                content: "This is a draft blog post that is not published yet.",
                author: "Admin User",
                status: 0,
            },
        ];

        let rows: Vec<Vec<Value>> = samples.into_iter().map(SamplePost::into_row).collect();
        setup.insert_multiple(
            &setup.table(BLOGPOST_TABLE),
            &["title", "content", "author", "status"],
            &rows,
        )?;

        setup.end_setup()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patches::CreateBlogPostTable;
    use rusqlite::Connection;

    fn conn_with_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        let mut setup = DataSetup::new(&conn);
        CreateBlogPostTable.apply(&mut setup).unwrap();
        conn
    }

    #[test]
    fn test_apply_inserts_exactly_three_rows() {
        let conn = conn_with_schema();
        let mut setup = DataSetup::new(&conn);

        AddSampleBlogPosts.apply(&mut setup).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM itcforu_blogpost", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_two_published_one_draft() {
        let conn = conn_with_schema();
        let mut setup = DataSetup::new(&conn);
        AddSampleBlogPosts.apply(&mut setup).unwrap();

        let published: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM itcforu_blogpost WHERE status = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        let drafts: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM itcforu_blogpost WHERE status = 0",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(published, 2);
        assert_eq!(drafts, 1);
    }

    #[test]
    fn test_rows_match_source_literals() {
        let conn = conn_with_schema();
        let mut setup = DataSetup::new(&conn);
        AddSampleBlogPosts.apply(&mut setup).unwrap();

        let rows: Vec<(String, String, String, i64)> = conn
            .prepare(
                "SELECT title, content, author, status FROM itcforu_blogpost ORDER BY blogpost_id",
            )
            .unwrap()
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            rows,
            vec![
                (
                    "First Blog Post".to_string(),
                    "This is the content of the first blog post. It demonstrates how to create and manage blog posts in Magento 2.".to_string(),
                    "John Doe".to_string(),
                    1,
                ),
                (
                    "Second Blog Post".to_string(),
                    "This is the content of the second blog post. It shows how to work with the admin grid in Magento 2.".to_string(),
                    "Jane Smith".to_string(),
                    1,
                ),
                (
                    "Draft Blog Post".to_string(),
                    "This is a draft blog post that is not published yet.".to_string(),
                    "Admin User".to_string(),
                    0,
                ),
            ]
        );
    }

    #[test]
    fn test_no_declared_dependencies_or_aliases() {
        assert!(AddSampleBlogPosts.dependencies().is_empty());
        assert!(AddSampleBlogPosts.aliases().is_empty());
    }

    #[test]
    fn test_missing_table_fails_and_inserts_nothing() {
        let conn = Connection::open_in_memory().unwrap();
        let mut setup = DataSetup::new(&conn);

        let result = AddSampleBlogPosts.apply(&mut setup);
        assert!(result.is_err());

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='itcforu_blogpost'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 0);
    }

    #[test]
    fn test_second_apply_duplicates_rows() {
        let conn = conn_with_schema();
        let mut setup = DataSetup::new(&conn);

        // Deduplication is the runner's responsibility, not the patch's.
        AddSampleBlogPosts.apply(&mut setup).unwrap();
        AddSampleBlogPosts.apply(&mut setup).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM itcforu_blogpost", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 6);
    }
}
