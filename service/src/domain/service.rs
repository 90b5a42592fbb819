use inkpost_common::Slug;
use tracing::{debug, info, warn};

use crate::domain::{
    access::{AccessGate, RequestContext},
    post::{BlogPost, NewPost, PostChanges, PostId, error::ContentError, input::PostPayload},
    repository::PostRepository,
};

/// Blog content operations. Mutations and admin reads pass the access gate
/// first; the public reads never consult it.
#[derive(Clone)]
pub struct ContentService<R: PostRepository, G: AccessGate> {
    repository: R,
    gate: G,
}

impl<R: PostRepository, G: AccessGate> ContentService<R, G> {
    pub fn new(repository: R, gate: G) -> Self {
        Self { repository, gate }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn authorize(&self, request: &RequestContext) -> Result<(), ContentError> {
        if self.gate.is_authorized(request) {
            Ok(())
        } else {
            warn!("request rejected by access gate");
            Err(ContentError::Unauthorized)
        }
    }

    pub async fn create(
        &self,
        request: &RequestContext,
        payload: PostPayload,
    ) -> Result<BlogPost, ContentError> {
        self.authorize(request)?;
        let new_post = NewPost::try_from(payload)?;

        if self.repository.find_id_by_slug(&new_post.slug).await?.is_some() {
            debug!(slug = %new_post.slug, "slug already taken");
            return Err(ContentError::slug_taken());
        }

        let post = self.repository.create(new_post).await?;
        info!(id = %post.id, slug = %post.slug, published = post.published, "post created");
        Ok(post)
    }

    pub async fn list_all(&self, request: &RequestContext) -> Result<Vec<BlogPost>, ContentError> {
        self.authorize(request)?;
        Ok(self.repository.list_all().await?)
    }

    pub async fn list_published(&self) -> Result<Vec<BlogPost>, ContentError> {
        Ok(self.repository.list_published().await?)
    }

    pub async fn get_by_id(
        &self,
        request: &RequestContext,
        id: &str,
    ) -> Result<BlogPost, ContentError> {
        self.authorize(request)?;
        let id = PostId::try_from(id)?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ContentError::NotFound)
    }

    pub async fn get_published_by_slug(&self, slug: &str) -> Result<BlogPost, ContentError> {
        // a slug that cannot be normalized names nothing
        let slug = Slug::try_new(slug).map_err(|_| ContentError::NotFound)?;

        self.repository
            .find_published_by_slug(&slug)
            .await?
            .ok_or(ContentError::NotFound)
    }

    pub async fn update(
        &self,
        request: &RequestContext,
        id: &str,
        payload: PostPayload,
    ) -> Result<BlogPost, ContentError> {
        self.authorize(request)?;
        let id = PostId::try_from(id)?;
        let changes = PostChanges::try_from(payload)?;

        if let Some(slug) = &changes.slug {
            self.ensure_slug_available(id, slug).await?;
        }

        let post = self
            .repository
            .update(id, changes)
            .await?
            .ok_or(ContentError::NotFound)?;

        info!(id = %post.id, slug = %post.slug, published = post.published, "post updated");
        Ok(post)
    }

    pub async fn delete(&self, request: &RequestContext, id: &str) -> Result<(), ContentError> {
        self.authorize(request)?;
        let id = PostId::try_from(id)?;

        if self.repository.delete(id).await? {
            info!(%id, "post deleted");
            Ok(())
        } else {
            Err(ContentError::NotFound)
        }
    }

    /// A slug change must not collide with any other post. Keeping the
    /// current slug is always allowed.
    async fn ensure_slug_available(&self, id: PostId, slug: &Slug) -> Result<(), ContentError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ContentError::NotFound);
        }

        match self.repository.find_id_by_slug(slug).await? {
            Some(owner) if owner != id => {
                debug!(%id, %owner, %slug, "slug change collides");
                Err(ContentError::slug_taken())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::infrastructure::persistence::memory::InMemoryPostRepository;
    use crate::test_utils::{FixedGate, admin, payload};

    fn service() -> ContentService<InMemoryPostRepository, FixedGate> {
        ContentService::new(InMemoryPostRepository::default(), FixedGate::allow())
    }

    fn changes(value: serde_json::Value) -> PostPayload {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_with_defaults() {
        let service = service();

        let post = service
            .create(&admin(), payload("Hello World", "S", "C"))
            .await
            .unwrap();

        assert_eq!(post.slug.as_ref(), "hello-world");
        assert!(post.published);
        assert_eq!(post.created_at, post.updated_at);
        assert!(post.tags.is_empty());
    }

    #[tokio::test]
    async fn test_second_create_with_same_slug_conflicts() {
        let service = service();

        service
            .create(&admin(), payload("Hello World", "S", "C"))
            .await
            .unwrap();
        let second = service
            .create(&admin(), payload("hello   world!", "S2", "C2"))
            .await;

        assert_eq!(second, Err(ContentError::slug_taken()));

        let all = service.list_all(&admin()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].summary.as_ref(), "S");
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_store() {
        let service = service();

        let result = service.create(&admin(), payload("Title", "  ", "C")).await;

        assert_eq!(result, Err(ContentError::required_fields()));
        assert_eq!(service.repository().len().await, 0);
    }

    #[tokio::test]
    async fn test_gate_blocks_mutations_and_admin_reads() {
        let service = ContentService::new(InMemoryPostRepository::default(), FixedGate::deny());
        let anyone = RequestContext::anonymous();

        assert_eq!(
            service.create(&anyone, payload("T", "S", "C")).await,
            Err(ContentError::Unauthorized)
        );
        assert_eq!(service.list_all(&anyone).await, Err(ContentError::Unauthorized));
        assert_eq!(
            service.get_by_id(&anyone, "whatever").await,
            Err(ContentError::Unauthorized)
        );
        assert_eq!(
            service.update(&anyone, "whatever", PostPayload::default()).await,
            Err(ContentError::Unauthorized)
        );
        assert_eq!(
            service.delete(&anyone, "whatever").await,
            Err(ContentError::Unauthorized)
        );

        // public reads do not ask the gate
        assert_eq!(service.list_published().await, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_gate_is_checked_before_validation() {
        let service = ContentService::new(InMemoryPostRepository::default(), FixedGate::deny());

        let result = service
            .create(&RequestContext::anonymous(), PostPayload::default())
            .await;

        assert_eq!(result, Err(ContentError::Unauthorized));
    }

    #[tokio::test]
    async fn test_blank_title_update_keeps_title() {
        let service = service();
        let post = service
            .create(&admin(), payload("Original", "S", "C"))
            .await
            .unwrap();

        let updated = service
            .update(&admin(), &post.id.to_string(), changes(json!({ "title": "  " })))
            .await
            .unwrap();

        assert_eq!(updated.title.as_ref(), "Original");
    }

    #[tokio::test]
    async fn test_unpublish_changes_only_published() {
        let service = service();
        let post = service
            .create(&admin(), payload("Original", "S", "C"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = service
            .update(
                &admin(),
                &post.id.to_string(),
                changes(json!({ "published": false })),
            )
            .await
            .unwrap();

        assert!(!updated.published);
        assert!(updated.updated_at > post.updated_at);

        let expected = BlogPost {
            published: false,
            updated_at: updated.updated_at,
            ..post
        };
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let service = service();

        let missing = PostId::generate().to_string();
        assert_eq!(
            service
                .update(&admin(), &missing, changes(json!({ "title": "New" })))
                .await,
            Err(ContentError::NotFound)
        );
        assert_eq!(
            service
                .update(&admin(), "garbage", changes(json!({ "title": "New" })))
                .await,
            Err(ContentError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_update_slug_collision_is_conflict() {
        let service = service();
        service.create(&admin(), payload("First", "S", "C")).await.unwrap();
        let second = service.create(&admin(), payload("Second", "S", "C")).await.unwrap();

        let result = service
            .update(&admin(), &second.id.to_string(), changes(json!({ "slug": "First" })))
            .await;
        assert_eq!(result, Err(ContentError::slug_taken()));

        // re-submitting the post's own slug is fine
        let same = service
            .update(&admin(), &second.id.to_string(), changes(json!({ "slug": "second" })))
            .await
            .unwrap();
        assert_eq!(same.slug.as_ref(), "second");
    }

    #[tokio::test]
    async fn test_update_slug_is_normalized() {
        let service = service();
        let post = service.create(&admin(), payload("First", "S", "C")).await.unwrap();

        let updated = service
            .update(&admin(), &post.id.to_string(), changes(json!({ "slug": " Brand New Slug " })))
            .await
            .unwrap();

        assert_eq!(updated.slug.as_ref(), "brand-new-slug");
    }

    #[tokio::test]
    async fn test_list_published_hides_drafts() {
        let service = service();
        service.create(&admin(), payload("Visible", "S", "C")).await.unwrap();
        let mut draft = payload("Hidden", "S", "C");
        draft.published = Some(false);
        let draft = service.create(&admin(), draft).await.unwrap();

        let published = service.list_published().await.unwrap();
        assert_eq!(published.len(), 1);
        assert!(published.iter().all(|p| p.published));

        assert_eq!(
            service.get_published_by_slug("hidden").await,
            Err(ContentError::NotFound)
        );
        assert_eq!(
            service.get_by_id(&admin(), &draft.id.to_string()).await.unwrap().id,
            draft.id
        );
    }

    #[tokio::test]
    async fn test_delete_frees_slug() {
        let service = service();
        let post = service.create(&admin(), payload("Reusable", "S", "C")).await.unwrap();
        let id = post.id.to_string();

        service.delete(&admin(), &id).await.unwrap();

        assert_eq!(service.get_by_id(&admin(), &id).await, Err(ContentError::NotFound));
        assert_eq!(service.delete(&admin(), &id).await, Err(ContentError::NotFound));

        let again = service.create(&admin(), payload("Reusable", "S", "C")).await.unwrap();
        assert_eq!(again.slug, post.slug);
        assert_ne!(again.id, post.id);
    }

    #[tokio::test]
    async fn test_public_slug_lookup_normalizes_input() {
        let service = service();
        service.create(&admin(), payload("Hello World", "S", "C")).await.unwrap();

        let post = service.get_published_by_slug("Hello World").await.unwrap();
        assert_eq!(post.slug.as_ref(), "hello-world");

        assert_eq!(
            service.get_published_by_slug("???").await,
            Err(ContentError::NotFound)
        );
    }
}
