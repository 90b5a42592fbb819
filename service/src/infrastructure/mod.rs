use crate::domain::{
    AppState, access::AccessGate, repository::PostRepository, service::ContentService,
};

pub mod access;
pub mod http;
pub mod persistence;
pub mod settings;

#[derive(Clone)]
pub struct AppStateImpl<R: PostRepository, G: AccessGate> {
    content: ContentService<R, G>,
}

impl<R: PostRepository, G: AccessGate> AppStateImpl<R, G> {
    pub fn new(content: ContentService<R, G>) -> Self {
        Self { content }
    }
}

impl<R: PostRepository, G: AccessGate> AppState for AppStateImpl<R, G> {
    type R = R;
    type G = G;

    fn content(&self) -> &ContentService<Self::R, Self::G> {
        &self.content
    }
}
