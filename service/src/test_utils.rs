use crate::domain::{
    access::{AccessGate, RequestContext},
    post::{NewPost, input::PostPayload},
    service::ContentService,
};
use crate::infrastructure::persistence::memory::InMemoryPostRepository;
use inkpost_common::{PostContent, PostSummary, PostTitle, Slug};

/// Gate with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct FixedGate(bool);

impl FixedGate {
    pub fn allow() -> Self {
        Self(true)
    }

    pub fn deny() -> Self {
        Self(false)
    }
}

impl AccessGate for FixedGate {
    fn is_authorized(&self, _request: &RequestContext) -> bool {
        self.0
    }
}

pub fn admin() -> RequestContext {
    RequestContext::anonymous().with_cookie("admin_session", "test")
}

pub fn memory_service() -> ContentService<InMemoryPostRepository, FixedGate> {
    ContentService::new(InMemoryPostRepository::default(), FixedGate::allow())
}

pub fn payload(title: &str, summary: &str, content: &str) -> PostPayload {
    PostPayload {
        title: Some(title.to_string()),
        summary: Some(summary.to_string()),
        content: Some(content.to_string()),
        ..PostPayload::default()
    }
}

pub fn new_post(title: &str) -> NewPost {
    NewPost {
        title: PostTitle::try_new(title).unwrap(),
        slug: Slug::try_new(title).unwrap(),
        summary: PostSummary::try_new("Summary").unwrap(),
        content: PostContent::try_new("Content").unwrap(),
        tags: vec![],
        seo_title: None,
        seo_description: None,
        published: true,
    }
}
