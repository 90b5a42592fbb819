pub mod access;
pub mod post;
pub mod repository;
pub mod service;

use access::AccessGate;
use repository::PostRepository;
use service::ContentService;

/// The global application state shared between all request handlers.
pub trait AppState: Clone + Send + Sync + 'static {
    type R: PostRepository;
    type G: AccessGate;
    fn content(&self) -> &ContentService<Self::R, Self::G>;
}
