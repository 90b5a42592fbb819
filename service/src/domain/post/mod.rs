pub mod error;
pub mod input;
pub mod view;

use std::fmt;

use chrono::{DateTime, Utc};
use inkpost_common::{PostContent, PostSummary, PostTitle, Slug, Tag};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::post::error::ContentError;

/// Opaque identifier of a post, assigned by the store at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for PostId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// An id that does not parse cannot name an existing post.
impl TryFrom<&str> for PostId {
    type Error = ContentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| ContentError::NotFound)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored blog post. `id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: PostId,
    pub title: PostTitle,
    pub slug: Slug,
    pub summary: PostSummary,
    pub content: PostContent,
    pub tags: Vec<Tag>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields of a post about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: PostTitle,
    pub slug: Slug,
    pub summary: PostSummary,
    pub content: PostContent,
    pub tags: Vec<Tag>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub published: bool,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<PostTitle>,
    pub slug: Option<Slug>,
    pub summary: Option<PostSummary>,
    pub content: Option<PostContent>,
    pub tags: Option<Vec<Tag>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub published: Option<bool>,
}

impl NewPost {
    pub fn into_post(self, id: PostId, now: DateTime<Utc>) -> BlogPost {
        BlogPost {
            id,
            title: self.title,
            slug: self.slug,
            summary: self.summary,
            content: self.content,
            tags: self.tags,
            seo_title: self.seo_title,
            seo_description: self.seo_description,
            published: self.published,
            created_at: now,
            updated_at: now,
        }
    }
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl BlogPost {
    /// Overwrites the supplied fields and refreshes `updated_at`.
    pub fn apply(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(slug) = changes.slug {
            self.slug = slug;
        }
        if let Some(summary) = changes.summary {
            self.summary = summary;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(seo_title) = changes.seo_title {
            self.seo_title = Some(seo_title);
        }
        if let Some(seo_description) = changes.seo_description {
            self.seo_description = Some(seo_description);
        }
        if let Some(published) = changes.published {
            self.published = published;
        }
        self.updated_at = now;
    }

    /// Title used for page metadata.
    pub fn meta_title(&self) -> &str {
        self.seo_title.as_deref().unwrap_or(self.title.as_ref())
    }

    /// Description used for page metadata.
    pub fn meta_description(&self) -> &str {
        self.seo_description
            .as_deref()
            .unwrap_or(self.summary.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn sample_post() -> BlogPost {
        NewPost {
            title: PostTitle::try_new("Hello World").unwrap(),
            slug: Slug::try_new("Hello World").unwrap(),
            summary: PostSummary::try_new("S").unwrap(),
            content: PostContent::try_new("C").unwrap(),
            tags: vec![Tag::try_new("rust").unwrap()],
            seo_title: None,
            seo_description: None,
            published: true,
        }
        .into_post(PostId::generate(), Utc::now())
    }

    #[test]
    fn test_new_post_sets_both_timestamps() {
        let post = sample_post();
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut post = sample_post();
        let before = post.clone();
        let later = post.updated_at + Duration::seconds(5);

        post.apply(
            PostChanges {
                published: Some(false),
                ..Default::default()
            },
            later,
        );

        assert!(!post.published);
        assert_eq!(post.updated_at, later);
        assert_eq!(post.created_at, before.created_at);
        assert_eq!(post.id, before.id);
        assert_eq!(post.title, before.title);
        assert_eq!(post.slug, before.slug);
        assert_eq!(post.tags, before.tags);
    }

    #[test]
    fn test_meta_fields_fall_back() {
        let mut post = sample_post();
        assert_eq!(post.meta_title(), "Hello World");
        assert_eq!(post.meta_description(), "S");

        post.seo_title = Some("Custom".to_string());
        assert_eq!(post.meta_title(), "Custom");
    }

    #[test]
    fn test_unparseable_id_is_not_found() {
        assert_eq!(PostId::try_from("not-an-id"), Err(ContentError::NotFound));
        let id = PostId::generate();
        assert_eq!(PostId::try_from(id.to_string().as_str()), Ok(id));
    }
}
