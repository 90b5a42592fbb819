use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::post::{BlogPost, PostId};

/// Listing entry and the echo of every successful create or update.
/// Leaves out `content` and `tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOverview {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Every field of a post, as the editor loads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetails {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub tags: Vec<String>,
    pub seo_title: String,
    pub seo_description: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A published post as served to anonymous readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPost {
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub tags: Vec<String>,
    pub meta_title: String,
    pub meta_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&BlogPost> for PostOverview {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title.to_string(),
            slug: post.slug.to_string(),
            summary: post.summary.to_string(),
            published: post.published,
            created_at: post.created_at,
        }
    }
}

impl From<&BlogPost> for PostDetails {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title.to_string(),
            slug: post.slug.to_string(),
            summary: post.summary.to_string(),
            content: post.content.clone().into_inner(),
            tags: post.tags.iter().map(|tag| tag.to_string()).collect(),
            seo_title: post.seo_title.clone().unwrap_or_default(),
            seo_description: post.seo_description.clone().unwrap_or_default(),
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<&BlogPost> for PublicPost {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.to_string(),
            slug: post.slug.to_string(),
            summary: post.summary.to_string(),
            content: post.content.clone().into_inner(),
            tags: post.tags.iter().map(|tag| tag.to_string()).collect(),
            meta_title: post.meta_title().to_string(),
            meta_description: post.meta_description().to_string(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
