use std::borrow::Cow;

use chrono::{DateTime, Utc};
use futures::{TryStreamExt, future};
use inkpost_common::{
    BLOG_POSTS_TABLE, CONTENT_FIELD_NAME, CREATED_FIELD_NAME, ID_FIELD_NAME, PUBLISHED_FIELD_NAME,
    PostContent, PostSummary, PostTitle, SEO_DESCRIPTION_FIELD_NAME, SEO_TITLE_FIELD_NAME,
    SLUG_FIELD_NAME, SUMMARY_FIELD_NAME, Slug, TAGS_FIELD_NAME, TITLE_FIELD_NAME, Tag,
    UPDATED_FIELD_NAME, database::Database,
};
use sqlx::{Row, postgres::PgRow, types::Json};
use uuid::Uuid;

use crate::{
    domain::{
        post::{BlogPost, NewPost, PostChanges, PostId},
        repository::{PostRepository, RepositoryError},
    },
    infrastructure::persistence::{
        query::{Condition, ConditionValue, QueryBuilder, SortDirection},
        schema::{
            CREATED_COLUMN, ID_COLUMN, POSTS_TABLE, PUBLISHED_COLUMN, SEQ_COLUMN, SLUG_COLUMN,
            post_columns, returning_list,
        },
    },
};

#[derive(Clone)]
pub struct PostgresPostRepository {
    database: Database,
}

impl PostgresPostRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    async fn fetch_posts(&self, builder: QueryBuilder<'_>) -> Result<Vec<BlogPost>, RepositoryError> {
        let (sql, params) = builder.build();
        tracing::debug!(%sql, "generated SQL");

        let mut query_object = sqlx::query(&sql);
        for param in params {
            query_object = param.bind_to_query(query_object);
        }

        query_object
            .fetch(self.database.database_pool())
            .map_err(map_sqlx_error)
            .and_then(|row| future::ready(row_to_post(&row)))
            .try_collect()
            .await
    }

    async fn fetch_one(&self, builder: QueryBuilder<'_>) -> Result<Option<BlogPost>, RepositoryError> {
        let posts = self.fetch_posts(builder.limit(1)).await?;
        Ok(posts.into_iter().next())
    }

    /// Newest first; `seq` keeps insertion order among equal timestamps
    fn ordered(builder: QueryBuilder<'_>) -> QueryBuilder<'_> {
        builder
            .order_by(Cow::Borrowed(&CREATED_COLUMN), SortDirection::Descending)
            .order_by(Cow::Borrowed(&SEQ_COLUMN), SortDirection::Ascending)
    }
}

impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepositoryError> {
        let now = Utc::now();
        let post = post.into_post(PostId::generate(), now);
        let tags: Vec<String> = post.tags.iter().map(|t| t.to_string()).collect();

        let sql = insert_sql();
        let row = sqlx::query(&sql)
            .bind(post.id.0)
            .bind(post.title.as_ref())
            .bind(post.slug.as_ref())
            .bind(post.summary.as_ref())
            .bind(post.content.as_ref())
            .bind(Json(tags))
            .bind(post.seo_title.as_deref())
            .bind(post.seo_description.as_deref())
            .bind(post.published)
            .bind(post.created_at)
            .bind(post.updated_at)
            .fetch_one(self.database.database_pool())
            .await
            .map_err(map_sqlx_error)?;

        row_to_post(&row)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<BlogPost>, RepositoryError> {
        let builder = QueryBuilder::from(POSTS_TABLE)
            .select(post_columns())
            .where_condition(Condition::Equals {
                column: Cow::Borrowed(&ID_COLUMN),
                value: ConditionValue::Uuid(id.0),
            });
        self.fetch_one(builder).await
    }

    async fn find_published_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        let builder = QueryBuilder::from(POSTS_TABLE)
            .select(post_columns())
            .where_condition(Condition::Equals {
                column: Cow::Borrowed(&SLUG_COLUMN),
                value: ConditionValue::Text(slug.to_string()),
            })
            .where_condition(Condition::Equals {
                column: Cow::Borrowed(&PUBLISHED_COLUMN),
                value: ConditionValue::Boolean(true),
            });
        self.fetch_one(builder).await
    }

    async fn find_id_by_slug(&self, slug: &Slug) -> Result<Option<PostId>, RepositoryError> {
        let (sql, params) = QueryBuilder::from(POSTS_TABLE)
            .select(vec![Cow::Borrowed(&ID_COLUMN)])
            .where_condition(Condition::Equals {
                column: Cow::Borrowed(&SLUG_COLUMN),
                value: ConditionValue::Text(slug.to_string()),
            })
            .limit(1)
            .build();

        let mut query_object = sqlx::query(&sql);
        for param in params {
            query_object = param.bind_to_query(query_object);
        }

        let row = query_object
            .fetch_optional(self.database.database_pool())
            .await
            .map_err(map_sqlx_error)?;

        row.map(|row| {
            row.try_get::<Uuid, _>(ID_FIELD_NAME)
                .map(PostId)
                .map_err(|e| column_error(ID_FIELD_NAME, e))
        })
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        let builder = QueryBuilder::from(POSTS_TABLE).select(post_columns());
        self.fetch_posts(Self::ordered(builder)).await
    }

    async fn list_published(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        let builder = QueryBuilder::from(POSTS_TABLE)
            .select(post_columns())
            .where_condition(Condition::Equals {
                column: Cow::Borrowed(&PUBLISHED_COLUMN),
                value: ConditionValue::Boolean(true),
            });
        self.fetch_posts(Self::ordered(builder)).await
    }

    async fn update(
        &self,
        id: PostId,
        changes: PostChanges,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        let tags = changes
            .tags
            .map(|tags| Json(tags.iter().map(|t| t.to_string()).collect::<Vec<_>>()));

        let sql = update_sql();
        let row = sqlx::query(&sql)
            .bind(id.0)
            .bind(changes.title.map(PostTitle::into_inner))
            .bind(changes.slug.map(Slug::into_inner))
            .bind(changes.summary.map(PostSummary::into_inner))
            .bind(changes.content.map(PostContent::into_inner))
            .bind(tags)
            .bind(changes.seo_title)
            .bind(changes.seo_description)
            .bind(changes.published)
            .bind(Utc::now())
            .fetch_optional(self.database.database_pool())
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_post).transpose()
    }

    async fn delete(&self, id: PostId) -> Result<bool, RepositoryError> {
        let sql = format!(
            "DELETE FROM \"{}\" WHERE \"{}\" = $1",
            BLOG_POSTS_TABLE, ID_FIELD_NAME
        );
        let result = sqlx::query(&sql)
            .bind(id.0)
            .execute(self.database.database_pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn insert_sql() -> String {
    let columns = [
        ID_FIELD_NAME,
        TITLE_FIELD_NAME,
        SLUG_FIELD_NAME,
        SUMMARY_FIELD_NAME,
        CONTENT_FIELD_NAME,
        TAGS_FIELD_NAME,
        SEO_TITLE_FIELD_NAME,
        SEO_DESCRIPTION_FIELD_NAME,
        PUBLISHED_FIELD_NAME,
        CREATED_FIELD_NAME,
        UPDATED_FIELD_NAME,
    ];
    let names: Vec<String> = columns.iter().map(|c| format!("\"{c}\"")).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();

    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({}) RETURNING {}",
        BLOG_POSTS_TABLE,
        names.join(", "),
        placeholders.join(", "),
        returning_list()
    )
}

/// Partial update: a NULL parameter keeps the stored value
fn update_sql() -> String {
    let coalesced = [
        TITLE_FIELD_NAME,
        SLUG_FIELD_NAME,
        SUMMARY_FIELD_NAME,
        CONTENT_FIELD_NAME,
        TAGS_FIELD_NAME,
        SEO_TITLE_FIELD_NAME,
        SEO_DESCRIPTION_FIELD_NAME,
        PUBLISHED_FIELD_NAME,
    ];
    let mut assignments: Vec<String> = coalesced
        .iter()
        .enumerate()
        .map(|(i, c)| format!("\"{c}\" = COALESCE(${}, \"{c}\")", i + 2))
        .collect();
    assignments.push(format!(
        "\"{u}\" = GREATEST(${}, \"{u}\")",
        coalesced.len() + 2,
        u = UPDATED_FIELD_NAME
    ));

    format!(
        "UPDATE \"{}\" SET {} WHERE \"{}\" = $1 RETURNING {}",
        BLOG_POSTS_TABLE,
        assignments.join(", "),
        ID_FIELD_NAME,
        returning_list()
    )
}

fn map_sqlx_error(error: sqlx::Error) -> RepositoryError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            RepositoryError::UniqueViolation(db_error.message().to_string())
        }
        _ => RepositoryError::DatabaseError(error.to_string()),
    }
}

fn column_error(column: &str, error: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::DatabaseError(format!("Failed to parse {}: {}", column, error))
}

fn row_to_post(row: &PgRow) -> Result<BlogPost, RepositoryError> {
    fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, RepositoryError>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        row.try_get(column).map_err(|e| column_error(column, e))
    }

    let id: Uuid = get(row, ID_FIELD_NAME)?;
    let title = PostTitle::try_new(get::<String>(row, TITLE_FIELD_NAME)?)
        .map_err(|e| column_error(TITLE_FIELD_NAME, e))?;
    let slug = Slug::try_new(get::<String>(row, SLUG_FIELD_NAME)?)
        .map_err(|e| column_error(SLUG_FIELD_NAME, e))?;
    let summary = PostSummary::try_new(get::<String>(row, SUMMARY_FIELD_NAME)?)
        .map_err(|e| column_error(SUMMARY_FIELD_NAME, e))?;
    let content = PostContent::try_new(get::<String>(row, CONTENT_FIELD_NAME)?)
        .map_err(|e| column_error(CONTENT_FIELD_NAME, e))?;

    // stored tags were validated on the way in; skip anything that no longer is
    let Json(raw_tags): Json<Vec<String>> = get(row, TAGS_FIELD_NAME)?;
    let tags = raw_tags
        .into_iter()
        .filter_map(|tag| Tag::try_new(tag).ok())
        .collect();

    let created_at: DateTime<Utc> = get(row, CREATED_FIELD_NAME)?;
    let updated_at: DateTime<Utc> = get(row, UPDATED_FIELD_NAME)?;

    Ok(BlogPost {
        id: PostId(id),
        title,
        slug,
        summary,
        content,
        tags,
        seo_title: get(row, SEO_TITLE_FIELD_NAME)?,
        seo_description: get(row, SEO_DESCRIPTION_FIELD_NAME)?,
        published: get(row, PUBLISHED_FIELD_NAME)?,
        created_at,
        updated_at,
    })
}
