//! Setup patches for the blog post module.
//!
//! `install` brings a database up to date: it creates the blog post table and
//! seeds it with sample content, each step exactly once per database.

pub mod patches;

pub use patches::{AddSampleBlogPosts, CreateBlogPostTable};

use rusqlite::Connection;
use sql_data_patch::{apply_all, DataPatch, PatchResult};
use tracing::info;

/// Logical name of the blog post table.
pub const BLOGPOST_TABLE: &str = "itcforu_blogpost";

/// Runs the module's pending setup patches.
///
/// The seed patch declares no dependency on the schema patch; its position in
/// the registration list is what runs table creation first.
pub fn install(conn: &mut Connection) -> PatchResult<()> {
    let patches: &[&dyn DataPatch] = &[&CreateBlogPostTable, &AddSampleBlogPosts];
    apply_all(conn, patches)?;
    info!("blog post module setup complete");
    Ok(())
}
