use std::borrow::Cow;

use inkpost_common::{
    BLOG_POSTS_TABLE, CONTENT_FIELD_NAME, CREATED_FIELD_NAME, ID_FIELD_NAME, PUBLISHED_FIELD_NAME,
    SEO_DESCRIPTION_FIELD_NAME, SEO_TITLE_FIELD_NAME, SEQ_FIELD_NAME, SLUG_FIELD_NAME,
    SUMMARY_FIELD_NAME, TAGS_FIELD_NAME, TITLE_FIELD_NAME, UPDATED_FIELD_NAME,
};

// Represents a table in database
#[derive(Debug, Clone)]
pub struct Table<'a> {
    pub name: &'a str,
    pub alias: &'static str,
}

impl Table<'_> {
    /// Get qualified table name with alias
    pub fn qualified(&self) -> String {
        format!("\"{}\" AS \"{}\"", self.name, self.alias)
    }
}

/// Represents one column in the database table
#[derive(Debug, Clone)]
pub struct Column<'a> {
    pub qualifier: &'static str,
    pub name: &'a str,
}

impl Column<'_> {
    /// Get qualified column name
    pub fn qualified(&self) -> String {
        format!("\"{}\".\"{}\"", self.qualifier, self.name)
    }
}

/// Column reference which can be either borrowed or owned
pub type ColumnRef<'a> = Cow<'a, Column<'a>>;

pub const POSTS_TABLE: Table<'static> = Table {
    name: BLOG_POSTS_TABLE,
    alias: "p",
};

const fn post_column(name: &'static str) -> Column<'static> {
    Column {
        qualifier: "p",
        name,
    }
}

pub const ID_COLUMN: Column<'static> = post_column(ID_FIELD_NAME);
pub const SEQ_COLUMN: Column<'static> = post_column(SEQ_FIELD_NAME);
pub const TITLE_COLUMN: Column<'static> = post_column(TITLE_FIELD_NAME);
pub const SLUG_COLUMN: Column<'static> = post_column(SLUG_FIELD_NAME);
pub const SUMMARY_COLUMN: Column<'static> = post_column(SUMMARY_FIELD_NAME);
pub const CONTENT_COLUMN: Column<'static> = post_column(CONTENT_FIELD_NAME);
pub const TAGS_COLUMN: Column<'static> = post_column(TAGS_FIELD_NAME);
pub const SEO_TITLE_COLUMN: Column<'static> = post_column(SEO_TITLE_FIELD_NAME);
pub const SEO_DESCRIPTION_COLUMN: Column<'static> = post_column(SEO_DESCRIPTION_FIELD_NAME);
pub const PUBLISHED_COLUMN: Column<'static> = post_column(PUBLISHED_FIELD_NAME);
pub const CREATED_COLUMN: Column<'static> = post_column(CREATED_FIELD_NAME);
pub const UPDATED_COLUMN: Column<'static> = post_column(UPDATED_FIELD_NAME);

/// Every column a `BlogPost` is read from
pub fn post_columns() -> Vec<ColumnRef<'static>> {
    [
        &ID_COLUMN,
        &TITLE_COLUMN,
        &SLUG_COLUMN,
        &SUMMARY_COLUMN,
        &CONTENT_COLUMN,
        &TAGS_COLUMN,
        &SEO_TITLE_COLUMN,
        &SEO_DESCRIPTION_COLUMN,
        &PUBLISHED_COLUMN,
        &CREATED_COLUMN,
        &UPDATED_COLUMN,
    ]
    .into_iter()
    .map(Cow::Borrowed)
    .collect()
}

/// Unqualified column list, for `RETURNING` clauses
pub fn returning_list() -> String {
    post_columns()
        .iter()
        .map(|c| format!("\"{}\"", c.name))
        .collect::<Vec<_>>()
        .join(", ")
}
