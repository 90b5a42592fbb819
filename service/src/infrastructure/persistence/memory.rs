use std::sync::Arc;

use chrono::Utc;
use inkpost_common::Slug;
use tokio::sync::RwLock;

use crate::domain::{
    post::{BlogPost, NewPost, PostChanges, PostId},
    repository::{PostRepository, RepositoryError},
};

/// Process-local post store. Same contract as the Postgres store; contents
/// are lost when the process exits.
#[derive(Clone, Default)]
pub struct InMemoryPostRepository {
    store: Arc<RwLock<Store>>,
}

#[derive(Default)]
struct Store {
    next_seq: u64,
    rows: Vec<StoredPost>,
}

struct StoredPost {
    seq: u64,
    post: BlogPost,
}

impl InMemoryPostRepository {
    pub async fn len(&self) -> usize {
        self.store.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn list_filtered(&self, published_only: bool) -> Vec<BlogPost> {
        let store = self.store.read().await;
        let mut rows: Vec<&StoredPost> = store
            .rows
            .iter()
            .filter(|row| !published_only || row.post.published)
            .collect();
        rows.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then(a.seq.cmp(&b.seq))
        });
        rows.into_iter().map(|row| row.post.clone()).collect()
    }
}

impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepositoryError> {
        let mut store = self.store.write().await;
        if store.rows.iter().any(|row| row.post.slug == post.slug) {
            return Err(RepositoryError::UniqueViolation(post.slug.to_string()));
        }

        let post = post.into_post(PostId::generate(), Utc::now());
        let seq = store.next_seq;
        store.next_seq += 1;
        store.rows.push(StoredPost {
            seq,
            post: post.clone(),
        });
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<BlogPost>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .iter()
            .find(|row| row.post.id == id)
            .map(|row| row.post.clone()))
    }

    async fn find_published_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .iter()
            .find(|row| row.post.published && &row.post.slug == slug)
            .map(|row| row.post.clone()))
    }

    async fn find_id_by_slug(&self, slug: &Slug) -> Result<Option<PostId>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .iter()
            .find(|row| &row.post.slug == slug)
            .map(|row| row.post.id))
    }

    async fn list_all(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        Ok(self.list_filtered(false).await)
    }

    async fn list_published(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        Ok(self.list_filtered(true).await)
    }

    async fn update(
        &self,
        id: PostId,
        changes: PostChanges,
    ) -> Result<Option<BlogPost>, RepositoryError> {
        let mut store = self.store.write().await;
        let Some(row) = store.rows.iter_mut().find(|row| row.post.id == id) else {
            return Ok(None);
        };

        // never move backwards even if the wall clock does
        let now = Utc::now().max(row.post.updated_at);
        row.post.apply(changes, now);
        Ok(Some(row.post.clone()))
    }

    async fn delete(&self, id: PostId) -> Result<bool, RepositoryError> {
        let mut store = self.store.write().await;
        let before = store.rows.len();
        store.rows.retain(|row| row.post.id != id);
        Ok(store.rows.len() < before)
    }
}
