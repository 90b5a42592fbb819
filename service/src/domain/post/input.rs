//! Parsing of loosely-typed post input.
//!
//! Requests carry a [`PostPayload`] in which every field is optional and
//! values of the wrong JSON type are dropped instead of rejected. Nothing
//! reaches the store before it is turned into a [`NewPost`] or
//! [`PostChanges`].

use inkpost_common::{PostContent, PostSummary, PostTitle, Slug, Tag};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::post::{
    NewPost, PostChanges,
    error::{ContentError, EMPTY_SLUG_MESSAGE},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags", skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagsInput>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    /// Only an explicit boolean counts; anything else is treated as absent.
    #[serde(default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

/// Tags arrive either as one comma-separated string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    Joined(String),
    List(Vec<String>),
}

impl TagsInput {
    /// Trimmed, blank entries dropped, order and duplicates preserved.
    pub fn into_tags(self) -> Vec<Tag> {
        match self {
            TagsInput::Joined(joined) => joined
                .split(',')
                .filter_map(|tag| Tag::try_new(tag).ok())
                .collect(),
            TagsInput::List(list) => list
                .into_iter()
                .filter_map(|tag| Tag::try_new(tag).ok())
                .collect(),
        }
    }
}

impl TryFrom<PostPayload> for NewPost {
    type Error = ContentError;

    fn try_from(payload: PostPayload) -> Result<Self, Self::Error> {
        let title = payload.title.and_then(|v| PostTitle::try_new(v).ok());
        let summary = payload.summary.and_then(|v| PostSummary::try_new(v).ok());
        let content = payload.content.and_then(|v| PostContent::try_new(v).ok());

        let (Some(title), Some(summary), Some(content)) = (title, summary, content) else {
            return Err(ContentError::required_fields());
        };

        // an explicit slug wins, otherwise it is derived from the title
        let slug = match non_blank(payload.slug) {
            Some(raw) => parse_slug(raw)?,
            None => parse_slug(title.to_string())?,
        };

        Ok(NewPost {
            title,
            slug,
            summary,
            content,
            tags: payload.tags.map(TagsInput::into_tags).unwrap_or_default(),
            seo_title: non_blank(payload.seo_title),
            seo_description: non_blank(payload.seo_description),
            published: payload.published.unwrap_or(true),
        })
    }
}

impl TryFrom<PostPayload> for PostChanges {
    type Error = ContentError;

    fn try_from(payload: PostPayload) -> Result<Self, Self::Error> {
        let slug = non_blank(payload.slug).map(parse_slug).transpose()?;

        Ok(PostChanges {
            title: payload.title.and_then(|v| PostTitle::try_new(v).ok()),
            slug,
            summary: payload.summary.and_then(|v| PostSummary::try_new(v).ok()),
            content: payload.content.and_then(|v| PostContent::try_new(v).ok()),
            tags: payload.tags.map(TagsInput::into_tags),
            seo_title: non_blank(payload.seo_title),
            seo_description: non_blank(payload.seo_description),
            published: payload.published,
        })
    }
}

fn parse_slug(raw: impl Into<String>) -> Result<Slug, ContentError> {
    Slug::try_new(raw).map_err(|_| ContentError::Validation(EMPTY_SLUG_MESSAGE.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(flag)) => Some(flag),
        _ => None,
    })
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<TagsInput>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(joined)) => Some(TagsInput::Joined(joined)),
        Some(Value::Array(items)) => Some(TagsInput::List(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(tag) => tag,
                    _ => String::new(),
                })
                .collect(),
        )),
        _ => None,
    })
}
