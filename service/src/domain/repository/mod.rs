use std::future::Future;

use inkpost_common::Slug;
use thiserror::Error;

use crate::domain::post::{BlogPost, NewPost, PostChanges, PostId};

/// Persistence of blog posts. Every call is a single-document operation and
/// relies on the store's own atomicity.
pub trait PostRepository: Clone + Send + Sync + 'static {
    /// Persist a new post with a fresh id and `created_at = updated_at = now`.
    /// Fails with `UniqueViolation` when the slug is already taken.
    fn create(
        &self,
        post: NewPost,
    ) -> impl Future<Output = Result<BlogPost, RepositoryError>> + Send;

    /// Find a post regardless of its published flag
    fn find_by_id(
        &self,
        id: PostId,
    ) -> impl Future<Output = Result<Option<BlogPost>, RepositoryError>> + Send;

    /// Find a post by slug, only if it is published
    fn find_published_by_slug(
        &self,
        slug: &Slug,
    ) -> impl Future<Output = Result<Option<BlogPost>, RepositoryError>> + Send;

    /// Which post, published or not, currently owns the slug
    fn find_id_by_slug(
        &self,
        slug: &Slug,
    ) -> impl Future<Output = Result<Option<PostId>, RepositoryError>> + Send;

    /// All posts, newest first; ties keep insertion order
    fn list_all(&self) -> impl Future<Output = Result<Vec<BlogPost>, RepositoryError>> + Send;

    /// Published posts, same ordering as `list_all`
    fn list_published(
        &self,
    ) -> impl Future<Output = Result<Vec<BlogPost>, RepositoryError>> + Send;

    /// Apply a partial update and refresh `updated_at`. Slug uniqueness is
    /// not checked here. `None` when the post does not exist.
    fn update(
        &self,
        id: PostId,
        changes: PostChanges,
    ) -> impl Future<Output = Result<Option<BlogPost>, RepositoryError>> + Send;

    /// Remove the post for good. `false` when it did not exist.
    fn delete(&self, id: PostId) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("database error: {0}")]
    DatabaseError(String),
}
