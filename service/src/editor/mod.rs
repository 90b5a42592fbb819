//! Admin editor session.
//!
//! A client-side state machine for the blog admin screen: which post is
//! being edited, the unsaved form, the locally reconciled listing, and the
//! in-flight markers that keep a user from firing the same action twice.
//!
//! Every user action is split in two. A `begin_*` transition checks the
//! guards, marks the action in flight and hands out a request ticket; the
//! matching `finish_*` transition takes the ticket back together with the
//! outcome and reconciles local state. The async drivers ([`EditorSession::submit`]
//! and friends) simply chain the two around a [`ContentClient`] call.

use std::collections::HashSet;

use thiserror::Error;

use crate::domain::post::{
    PostId,
    error::{ContentError, REQUIRED_FIELDS_MESSAGE},
    input::{PostPayload, TagsInput},
    view::{PostDetails, PostOverview},
};

pub mod client;
pub mod http;

pub use client::{ContentClient, LocalContentClient};
pub use http::HttpContentClient;

pub const CREATED_NOTICE: &str = "Blog post created.";
pub const UPDATED_NOTICE: &str = "Blog post updated.";
pub const DELETED_NOTICE: &str = "Blog post deleted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Nothing loaded; a submit creates a new post.
    #[default]
    Idle,
    /// A submit updates this post.
    Editing(PostId),
}

/// Unsaved form contents. Tags are edited as one comma-separated line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorForm {
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub tags: String,
    pub seo_title: String,
    pub seo_description: String,
    pub published: bool,
}

impl Default for EditorForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            summary: String::new(),
            content: String::new(),
            tags: String::new(),
            seo_title: String::new(),
            seo_description: String::new(),
            published: true,
        }
    }
}

impl From<&PostDetails> for EditorForm {
    fn from(post: &PostDetails) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            summary: post.summary.clone(),
            content: post.content.clone(),
            tags: post.tags.join(", "),
            seo_title: post.seo_title.clone(),
            seo_description: post.seo_description.clone(),
            published: post.published,
        }
    }
}

impl EditorForm {
    pub fn has_required_fields(&self) -> bool {
        [&self.title, &self.summary, &self.content]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// The whole form goes out; blank optional fields are ignored server side.
    pub fn to_payload(&self) -> PostPayload {
        PostPayload {
            title: Some(self.title.clone()),
            slug: Some(self.slug.clone()),
            summary: Some(self.summary.clone()),
            content: Some(self.content.clone()),
            tags: Some(TagsInput::Joined(self.tags.clone())),
            seo_title: Some(self.seo_title.clone()),
            seo_description: Some(self.seo_description.clone()),
            published: Some(self.published),
        }
    }
}

/// User-facing feedback produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("a request for this form is already in flight")]
    Busy,
    #[error("post {0} is already being deleted")]
    DeleteInFlight(PostId),
    #[error("deletion was not confirmed")]
    Cancelled,
    #[error("{0}")]
    Invalid(String),
    #[error("session is signed out")]
    SignedOut,
    #[error(transparent)]
    Failed(#[from] ContentError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(PostId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub id: PostId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub target: SubmitTarget,
    pub payload: PostPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: PostId,
}

impl LoadRequest {
    pub async fn send<C: ContentClient>(&self, client: &C) -> Result<PostDetails, ContentError> {
        client.fetch_post(self.id).await
    }
}

impl SubmitRequest {
    pub async fn send<C: ContentClient>(&self, client: &C) -> Result<PostOverview, ContentError> {
        match self.target {
            SubmitTarget::Create => client.create_post(self.payload.clone()).await,
            SubmitTarget::Update(id) => client.update_post(id, self.payload.clone()).await,
        }
    }
}

impl DeleteRequest {
    pub async fn send<C: ContentClient>(&self, client: &C) -> Result<(), ContentError> {
        client.delete_post(self.id).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    mode: EditorMode,
    form: EditorForm,
    posts: Vec<PostOverview>,
    submitting: bool,
    loading: bool,
    deleting: HashSet<PostId>,
    signed_out: bool,
    notices: Vec<Notice>,
}

impl EditorSession {
    pub fn new(posts: Vec<PostOverview>) -> Self {
        Self {
            posts,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn form(&self) -> &EditorForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EditorForm {
        &mut self.form
    }

    pub fn posts(&self) -> &[PostOverview] {
        &self.posts
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_deleting(&self, id: PostId) -> bool {
        self.deleting.contains(&id)
    }

    /// Set once the server rejects the session; the screen is blocked from then on.
    pub fn is_signed_out(&self) -> bool {
        self.signed_out
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Drop whatever is loaded and start an empty form.
    pub fn start_create(&mut self) -> Result<(), EditorError> {
        self.ensure_signed_in()?;
        if self.submitting || self.loading {
            return Err(EditorError::Busy);
        }
        self.reset();
        Ok(())
    }

    pub fn begin_load(&mut self, id: PostId) -> Result<LoadRequest, EditorError> {
        self.ensure_signed_in()?;
        if self.submitting || self.loading {
            return Err(EditorError::Busy);
        }
        self.loading = true;
        Ok(LoadRequest { id })
    }

    /// On failure the previous mode and form are left as they were.
    pub fn finish_load(
        &mut self,
        request: LoadRequest,
        outcome: Result<PostDetails, ContentError>,
    ) -> Result<(), EditorError> {
        self.loading = false;
        let post = self.check(outcome)?;

        tracing::debug!(id = %request.id, "post loaded for editing");
        self.form = EditorForm::from(&post);
        self.mode = EditorMode::Editing(post.id);
        Ok(())
    }

    pub fn begin_submit(&mut self) -> Result<SubmitRequest, EditorError> {
        self.ensure_signed_in()?;
        if self.submitting || self.loading {
            return Err(EditorError::Busy);
        }
        if !self.form.has_required_fields() {
            self.notices
                .push(Notice::Error(REQUIRED_FIELDS_MESSAGE.to_string()));
            return Err(EditorError::Invalid(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        self.submitting = true;
        let target = match self.mode {
            EditorMode::Idle => SubmitTarget::Create,
            EditorMode::Editing(id) => SubmitTarget::Update(id),
        };
        Ok(SubmitRequest {
            target,
            payload: self.form.to_payload(),
        })
    }

    /// Success reconciles the listing from the echoed summary and returns to
    /// `Idle`. Failure keeps the form exactly as the user left it.
    pub fn finish_submit(
        &mut self,
        request: SubmitRequest,
        outcome: Result<PostOverview, ContentError>,
    ) -> Result<(), EditorError> {
        self.submitting = false;
        let post = self.check(outcome)?;

        match request.target {
            SubmitTarget::Create => {
                self.posts.insert(0, post);
                self.notices.push(Notice::Success(CREATED_NOTICE.to_string()));
            }
            SubmitTarget::Update(id) => {
                if let Some(entry) = self.posts.iter_mut().find(|entry| entry.id == id) {
                    *entry = post;
                }
                self.notices.push(Notice::Success(UPDATED_NOTICE.to_string()));
            }
        }
        self.reset();
        Ok(())
    }

    /// `confirmed` is the answer to the "are you sure" prompt.
    pub fn begin_delete(&mut self, id: PostId, confirmed: bool) -> Result<DeleteRequest, EditorError> {
        self.ensure_signed_in()?;
        if self.deleting.contains(&id) {
            return Err(EditorError::DeleteInFlight(id));
        }
        if !confirmed {
            return Err(EditorError::Cancelled);
        }
        self.deleting.insert(id);
        Ok(DeleteRequest { id })
    }

    pub fn finish_delete(
        &mut self,
        request: DeleteRequest,
        outcome: Result<(), ContentError>,
    ) -> Result<(), EditorError> {
        self.deleting.remove(&request.id);
        self.check(outcome)?;

        self.posts.retain(|entry| entry.id != request.id);
        if self.mode == EditorMode::Editing(request.id) {
            self.reset();
        }
        self.notices.push(Notice::Success(DELETED_NOTICE.to_string()));
        Ok(())
    }

    /// A failed refresh keeps the current listing.
    pub fn finish_refresh(
        &mut self,
        outcome: Result<Vec<PostOverview>, ContentError>,
    ) -> Result<(), EditorError> {
        self.posts = self.check(outcome)?;
        Ok(())
    }

    pub async fn load_for_edit<C: ContentClient>(
        &mut self,
        client: &C,
        id: PostId,
    ) -> Result<(), EditorError> {
        let request = self.begin_load(id)?;
        let outcome = request.send(client).await;
        self.finish_load(request, outcome)
    }

    pub async fn submit<C: ContentClient>(&mut self, client: &C) -> Result<(), EditorError> {
        let request = self.begin_submit()?;
        let outcome = request.send(client).await;
        self.finish_submit(request, outcome)
    }

    pub async fn delete<C: ContentClient>(
        &mut self,
        client: &C,
        id: PostId,
        confirmed: bool,
    ) -> Result<(), EditorError> {
        let request = self.begin_delete(id, confirmed)?;
        let outcome = request.send(client).await;
        self.finish_delete(request, outcome)
    }

    pub async fn refresh<C: ContentClient>(&mut self, client: &C) -> Result<(), EditorError> {
        self.ensure_signed_in()?;
        let outcome = client.list_posts().await;
        self.finish_refresh(outcome)
    }

    fn ensure_signed_in(&self) -> Result<(), EditorError> {
        if self.signed_out {
            Err(EditorError::SignedOut)
        } else {
            Ok(())
        }
    }

    fn reset(&mut self) {
        self.form = EditorForm::default();
        self.mode = EditorMode::Idle;
    }

    /// Turns a failed outcome into a notice; an auth failure also blocks the session.
    fn check<T>(&mut self, outcome: Result<T, ContentError>) -> Result<T, EditorError> {
        outcome.map_err(|error| {
            tracing::warn!(%error, "editor request failed");
            if error == ContentError::Unauthorized {
                self.signed_out = true;
            }
            self.notices.push(Notice::Error(error.user_message()));
            EditorError::Failed(error)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::RequestContext;
    use crate::domain::service::ContentService;
    use crate::infrastructure::persistence::memory::InMemoryPostRepository;
    use crate::test_utils::{FixedGate, admin, memory_service, payload};

    type Client = LocalContentClient<InMemoryPostRepository, FixedGate>;

    async fn seeded(titles: &[&str]) -> (Client, EditorSession) {
        let service = memory_service();
        for title in titles {
            service
                .create(&admin(), payload(title, "Summary", "Content"))
                .await
                .unwrap();
        }
        let client = LocalContentClient::new(service, admin());
        let mut session = EditorSession::default();
        session.refresh(&client).await.unwrap();
        (client, session)
    }

    fn fill(session: &mut EditorSession, title: &str) {
        let form = session.form_mut();
        form.title = title.to_string();
        form.summary = "Summary".to_string();
        form.content = "Content".to_string();
    }

    #[test]
    fn test_fresh_form_defaults_to_published() {
        let session = EditorSession::default();

        assert_eq!(session.mode(), EditorMode::Idle);
        assert!(session.form().published);
        assert!(session.form().title.is_empty());
    }

    #[tokio::test]
    async fn test_create_prepends_and_resets() {
        let (client, mut session) = seeded(&["Older"]).await;
        fill(&mut session, "Newer");
        session.form_mut().tags = "a, b".to_string();

        session.submit(&client).await.unwrap();

        assert_eq!(session.posts().len(), 2);
        assert_eq!(session.posts()[0].slug, "newer");
        assert_eq!(session.form(), &EditorForm::default());
        assert_eq!(session.mode(), EditorMode::Idle);
        assert_eq!(
            session.notices(),
            &[Notice::Success(CREATED_NOTICE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_double_submit_mutates_once() {
        let (client, mut session) = seeded(&[]).await;
        fill(&mut session, "Only Once");

        let first = session.begin_submit().unwrap();
        assert_eq!(session.begin_submit(), Err(EditorError::Busy));

        let outcome = first.send(&client).await;
        session.finish_submit(first, outcome).unwrap();

        assert_eq!(client.service().repository().len().await, 1);
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn test_missing_fields_issue_no_request() {
        let (client, mut session) = seeded(&[]).await;
        session.form_mut().title = "Title".to_string();

        let result = session.submit(&client).await;

        assert_eq!(
            result,
            Err(EditorError::Invalid(REQUIRED_FIELDS_MESSAGE.to_string()))
        );
        assert!(!session.is_submitting());
        assert!(client.service().repository().is_empty().await);
    }

    #[tokio::test]
    async fn test_load_then_update_replaces_listing_entry() {
        let (client, mut session) = seeded(&["Draft Title"]).await;
        let id = session.posts()[0].id;

        session.load_for_edit(&client, id).await.unwrap();
        assert_eq!(session.mode(), EditorMode::Editing(id));
        assert_eq!(session.form().title, "Draft Title");

        session.form_mut().title = "Final Title".to_string();
        session.submit(&client).await.unwrap();

        assert_eq!(session.mode(), EditorMode::Idle);
        assert_eq!(session.posts().len(), 1);
        assert_eq!(session.posts()[0].id, id);
        assert_eq!(session.posts()[0].title, "Final Title");
        assert_eq!(
            session.notices().last(),
            Some(&Notice::Success(UPDATED_NOTICE.to_string()))
        );
    }

    #[tokio::test]
    async fn test_failed_update_keeps_form() {
        let (client, mut session) = seeded(&["Doomed"]).await;
        let id = session.posts()[0].id;
        session.load_for_edit(&client, id).await.unwrap();
        session.form_mut().content = "Unsaved work".to_string();

        // someone else removes the post meanwhile
        client
            .service()
            .delete(&admin(), &id.to_string())
            .await
            .unwrap();

        let result = session.submit(&client).await;

        assert_eq!(result, Err(EditorError::Failed(ContentError::NotFound)));
        assert_eq!(session.mode(), EditorMode::Editing(id));
        assert_eq!(session.form().content, "Unsaved work");
        assert!(!session.is_submitting());
        assert_eq!(
            session.notices().last(),
            Some(&Notice::Error("Post not found.".to_string()))
        );

        // the form can be resubmitted after the failure
        assert!(session.begin_submit().is_ok());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_state() {
        let (client, mut session) = seeded(&[]).await;
        fill(&mut session, "In progress");

        let result = session.load_for_edit(&client, PostId::generate()).await;

        assert_eq!(result, Err(EditorError::Failed(ContentError::NotFound)));
        assert_eq!(session.mode(), EditorMode::Idle);
        assert_eq!(session.form().title, "In progress");
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation_and_blocks_repeats() {
        let (client, mut session) = seeded(&["Target"]).await;
        let id = session.posts()[0].id;

        assert_eq!(
            session.delete(&client, id, false).await,
            Err(EditorError::Cancelled)
        );
        assert_eq!(session.posts().len(), 1);

        let request = session.begin_delete(id, true).unwrap();
        assert!(session.is_deleting(id));
        assert_eq!(
            session.begin_delete(id, true),
            Err(EditorError::DeleteInFlight(id))
        );

        let outcome = request.send(&client).await;
        session.finish_delete(request, outcome).unwrap();

        assert!(!session.is_deleting(id));
        assert!(session.posts().is_empty());
        assert!(client.service().repository().is_empty().await);
    }

    #[tokio::test]
    async fn test_deleting_edited_post_returns_to_idle() {
        let (client, mut session) = seeded(&["Edited"]).await;
        let id = session.posts()[0].id;
        session.load_for_edit(&client, id).await.unwrap();

        session.delete(&client, id, true).await.unwrap();

        assert_eq!(session.mode(), EditorMode::Idle);
        assert_eq!(session.form(), &EditorForm::default());
        assert_eq!(
            session.notices().last(),
            Some(&Notice::Success(DELETED_NOTICE.to_string()))
        );
    }

    #[tokio::test]
    async fn test_unauthorized_blocks_session() {
        let service = ContentService::new(InMemoryPostRepository::default(), FixedGate::deny());
        let client = LocalContentClient::new(service, RequestContext::anonymous());
        let mut session = EditorSession::default();
        fill(&mut session, "Nope");

        let result = session.submit(&client).await;

        assert_eq!(result, Err(EditorError::Failed(ContentError::Unauthorized)));
        assert!(session.is_signed_out());
        assert_eq!(session.form().title, "Nope");
        assert_eq!(session.begin_submit(), Err(EditorError::SignedOut));
        assert_eq!(session.start_create(), Err(EditorError::SignedOut));
        assert_eq!(session.refresh(&client).await, Err(EditorError::SignedOut));
    }

    #[tokio::test]
    async fn test_start_create_waits_for_submit() {
        let (_client, mut session) = seeded(&[]).await;
        fill(&mut session, "Pending");

        let _request = session.begin_submit().unwrap();

        assert_eq!(session.start_create(), Err(EditorError::Busy));
        assert_eq!(session.begin_load(PostId::generate()), Err(EditorError::Busy));
    }

    #[tokio::test]
    async fn test_submit_waits_for_load() {
        let (client, mut session) = seeded(&["Existing"]).await;
        let id = session.posts()[0].id;
        fill(&mut session, "Half Typed");

        let load = session.begin_load(id).unwrap();
        assert_eq!(session.begin_submit(), Err(EditorError::Busy));
        assert_eq!(session.start_create(), Err(EditorError::Busy));

        let outcome = load.send(&client).await;
        session.finish_load(load, outcome).unwrap();

        assert_eq!(session.mode(), EditorMode::Editing(id));
        assert_eq!(session.form().title, "Existing");
        assert_eq!(session.posts().len(), 1);
    }
}
