mod add_sample_blog_posts;
mod create_blogpost_table;

pub use add_sample_blog_posts::AddSampleBlogPosts;
pub use create_blogpost_table::CreateBlogPostTable;
