use inkpost_common::{
    BLOG_POSTS_TABLE, CONTENT_FIELD_NAME, CREATED_FIELD_NAME, ID_FIELD_NAME,
    PUBLISHED_FIELD_NAME, SEO_DESCRIPTION_FIELD_NAME, SEO_TITLE_FIELD_NAME, SEQ_FIELD_NAME,
    SLUG_FIELD_NAME, SUMMARY_FIELD_NAME, TAGS_FIELD_NAME, TITLE_FIELD_NAME, UPDATED_FIELD_NAME,
};

use crate::domain::tables::{Column, Index, Table};

pub mod migration;
pub mod persistence;
pub mod tables;

/// Tables the blog needs, in creation order.
pub fn required_tables() -> Vec<Table> {
    vec![blog_posts_table()]
}

/// The one table holding every post, published or not.
fn blog_posts_table() -> Table {
    Table::new(BLOG_POSTS_TABLE)
        .column(Column::key(ID_FIELD_NAME, "UUID"))
        .column(Column::required(SEQ_FIELD_NAME, "BIGSERIAL"))
        .column(Column::required(TITLE_FIELD_NAME, "TEXT"))
        .column(Column::required(SLUG_FIELD_NAME, "TEXT"))
        .column(Column::required(SUMMARY_FIELD_NAME, "TEXT"))
        .column(Column::required(CONTENT_FIELD_NAME, "TEXT"))
        .column(Column::required(TAGS_FIELD_NAME, "JSONB").default_to("'[]'::jsonb"))
        .column(Column::optional(SEO_TITLE_FIELD_NAME, "TEXT"))
        .column(Column::optional(SEO_DESCRIPTION_FIELD_NAME, "TEXT"))
        .column(Column::required(PUBLISHED_FIELD_NAME, "BOOLEAN").default_to("TRUE"))
        .column(Column::required(CREATED_FIELD_NAME, "TIMESTAMPTZ"))
        .column(Column::required(UPDATED_FIELD_NAME, "TIMESTAMPTZ"))
        // slug uniqueness is global, published or not
        .index(Index::unique(vec![SLUG_FIELD_NAME]))
        .index(Index::lookup(vec![PUBLISHED_FIELD_NAME, CREATED_FIELD_NAME]))
}
