mod domain;
mod infrastructure;

// Persisted blog post table and field names

pub const BLOG_POSTS_TABLE: &str = "blog_posts";

pub const ID_FIELD_NAME: &str = "id";
pub const SEQ_FIELD_NAME: &str = "seq";
pub const TITLE_FIELD_NAME: &str = "title";
pub const SLUG_FIELD_NAME: &str = "slug";
pub const SUMMARY_FIELD_NAME: &str = "summary";
pub const CONTENT_FIELD_NAME: &str = "content";
pub const TAGS_FIELD_NAME: &str = "tags";
pub const SEO_TITLE_FIELD_NAME: &str = "seo_title";
pub const SEO_DESCRIPTION_FIELD_NAME: &str = "seo_description";
pub const PUBLISHED_FIELD_NAME: &str = "published";

pub const CREATED_FIELD_NAME: &str = "created_at";
pub const UPDATED_FIELD_NAME: &str = "updated_at";

// expose domain module

pub use domain::*;

// expose database module

pub use infrastructure::database;
