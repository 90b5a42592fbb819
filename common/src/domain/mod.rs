use nutype::nutype;

pub mod slug;

/// A slug must carry at least one letter or digit to be addressable.
pub fn is_routable_slug(slug: &str) -> bool {
    slug.chars().any(|c| c.is_ascii_alphanumeric())
}

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(
        Clone,
        Debug,
        Display,
        AsRef,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize
    )
)]
pub struct PostTitle(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(
        Clone,
        Debug,
        Display,
        AsRef,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize
    )
)]
pub struct PostSummary(String);

/// Post body. May contain markup, which is stored as is.
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Clone, Debug, AsRef, PartialEq, Eq, Hash, Serialize, Deserialize)
)]
pub struct PostContent(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(
        Clone,
        Debug,
        Display,
        AsRef,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize
    )
)]
pub struct Tag(String);

/// URL-safe identifier of a post. Any input is run through [`slug::normalize`]
/// first, so `Slug::try_new("Hello World")` yields `hello-world`.
#[nutype(
    sanitize(with = |raw: String| slug::normalize(&raw)),
    validate(predicate = is_routable_slug),
    derive(
        Clone,
        Debug,
        Display,
        AsRef,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize,
        Deserialize
    )
)]
pub struct Slug(String);
