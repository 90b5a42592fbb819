use std::future::Future;

use crate::domain::{
    access::{AccessGate, RequestContext},
    post::{
        PostId,
        error::ContentError,
        input::PostPayload,
        view::{PostDetails, PostOverview},
    },
    repository::PostRepository,
    service::ContentService,
};

/// The admin content API as seen by the editor.
pub trait ContentClient: Send + Sync {
    fn list_posts(&self) -> impl Future<Output = Result<Vec<PostOverview>, ContentError>> + Send;

    fn fetch_post(
        &self,
        id: PostId,
    ) -> impl Future<Output = Result<PostDetails, ContentError>> + Send;

    fn create_post(
        &self,
        payload: PostPayload,
    ) -> impl Future<Output = Result<PostOverview, ContentError>> + Send;

    fn update_post(
        &self,
        id: PostId,
        payload: PostPayload,
    ) -> impl Future<Output = Result<PostOverview, ContentError>> + Send;

    fn delete_post(&self, id: PostId) -> impl Future<Output = Result<(), ContentError>> + Send;
}

/// Talks to a [`ContentService`] in the same process, presenting a fixed
/// set of credentials on every call.
#[derive(Clone)]
pub struct LocalContentClient<R: PostRepository, G: AccessGate> {
    service: ContentService<R, G>,
    request: RequestContext,
}

impl<R: PostRepository, G: AccessGate> LocalContentClient<R, G> {
    pub fn new(service: ContentService<R, G>, request: RequestContext) -> Self {
        Self { service, request }
    }

    pub fn service(&self) -> &ContentService<R, G> {
        &self.service
    }
}

impl<R: PostRepository, G: AccessGate> ContentClient for LocalContentClient<R, G> {
    async fn list_posts(&self) -> Result<Vec<PostOverview>, ContentError> {
        let posts = self.service.list_all(&self.request).await?;
        Ok(posts.iter().map(PostOverview::from).collect())
    }

    async fn fetch_post(&self, id: PostId) -> Result<PostDetails, ContentError> {
        let post = self.service.get_by_id(&self.request, &id.to_string()).await?;
        Ok(PostDetails::from(&post))
    }

    async fn create_post(&self, payload: PostPayload) -> Result<PostOverview, ContentError> {
        let post = self.service.create(&self.request, payload).await?;
        Ok(PostOverview::from(&post))
    }

    async fn update_post(
        &self,
        id: PostId,
        payload: PostPayload,
    ) -> Result<PostOverview, ContentError> {
        let post = self
            .service
            .update(&self.request, &id.to_string(), payload)
            .await?;
        Ok(PostOverview::from(&post))
    }

    async fn delete_post(&self, id: PostId) -> Result<(), ContentError> {
        self.service.delete(&self.request, &id.to_string()).await
    }
}
