use reqwest::{Method, RequestBuilder, StatusCode, header};
use serde::{
    Deserialize,
    de::{DeserializeOwned, IgnoredAny},
};

use crate::domain::post::{
    PostId,
    error::ContentError,
    input::PostPayload,
    view::{PostDetails, PostOverview},
};
use crate::editor::client::ContentClient;

/// Drives the HTTP admin API, sending the session cookie with every request.
#[derive(Debug, Clone)]
pub struct HttpContentClient {
    client: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

/// Success and error bodies share the `{status_code, data}` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorData {
    message: String,
}

impl HttpContentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie: None,
        }
    }

    pub fn with_session(mut self, cookie_name: &str, value: &str) -> Self {
        self.cookie = Some(format!("{cookie_name}={value}"));
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ContentError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ContentError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ContentError::Transport(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_slice::<Envelope<T>>(&body)
                .map(|envelope| envelope.data)
                .map_err(|e| ContentError::Transport(format!("malformed response: {e}")));
        }

        let message = serde_json::from_slice::<Envelope<ErrorData>>(&body)
            .map(|envelope| envelope.data.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
        Err(error_for_status(status, message))
    }
}

fn error_for_status(status: StatusCode, message: String) -> ContentError {
    match status {
        StatusCode::BAD_REQUEST => ContentError::Validation(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ContentError::Unauthorized,
        StatusCode::NOT_FOUND => ContentError::NotFound,
        StatusCode::CONFLICT => ContentError::Conflict(message),
        _ => ContentError::Transport(format!("unexpected status {status}: {message}")),
    }
}

impl ContentClient for HttpContentClient {
    async fn list_posts(&self) -> Result<Vec<PostOverview>, ContentError> {
        self.send(self.request(Method::GET, "/api/blog")).await
    }

    async fn fetch_post(&self, id: PostId) -> Result<PostDetails, ContentError> {
        self.send(self.request(Method::GET, &format!("/api/blog/{id}")))
            .await
    }

    async fn create_post(&self, payload: PostPayload) -> Result<PostOverview, ContentError> {
        self.send(self.request(Method::POST, "/api/blog").json(&payload))
            .await
    }

    async fn update_post(
        &self,
        id: PostId,
        payload: PostPayload,
    ) -> Result<PostOverview, ContentError> {
        self.send(
            self.request(Method::PATCH, &format!("/api/blog/{id}"))
                .json(&payload),
        )
        .await
    }

    async fn delete_post(&self, id: PostId) -> Result<(), ContentError> {
        self.send::<IgnoredAny>(self.request(Method::DELETE, &format!("/api/blog/{id}")))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;

    use super::*;
    use crate::domain::service::ContentService;
    use crate::editor::{EditorError, EditorMode, EditorSession};
    use crate::infrastructure::AppStateImpl;
    use crate::infrastructure::access::SessionCookieGate;
    use crate::infrastructure::http::router;
    use crate::infrastructure::persistence::memory::InMemoryPostRepository;

    async fn serve() -> String {
        let content = ContentService::new(
            InMemoryPostRepository::default(),
            SessionCookieGate::new("admin_session", Some("token".to_string())),
        );
        let app = router(AppStateImpl::new(content));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{address}")
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            error_for_status(StatusCode::CONFLICT, "taken".to_string()),
            ContentError::Conflict("taken".to_string())
        );
        assert_eq!(
            error_for_status(StatusCode::UNAUTHORIZED, String::new()),
            ContentError::Unauthorized
        );
        assert!(matches!(
            error_for_status(StatusCode::BAD_GATEWAY, "upstream".to_string()),
            ContentError::Transport(_)
        ));
    }

    #[tokio::test]
    async fn test_editor_round_trip_over_http() {
        let base_url = serve().await;
        let client = HttpContentClient::new(&base_url).with_session("admin_session", "token");
        let mut session = EditorSession::default();

        let form = session.form_mut();
        form.title = "Over The Wire".to_string();
        form.summary = "Summary".to_string();
        form.content = "Content".to_string();
        form.tags = "net, http".to_string();
        session.submit(&client).await.unwrap();

        let id = session.posts()[0].id;
        session.load_for_edit(&client, id).await.unwrap();
        assert_eq!(session.mode(), EditorMode::Editing(id));
        assert_eq!(session.form().tags, "net, http");
        assert_eq!(session.form().slug, "over-the-wire");

        session.delete(&client, id, true).await.unwrap();
        assert!(session.posts().is_empty());
        assert_eq!(
            client.fetch_post(id).await,
            Err(ContentError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_wrong_token_signs_session_out() {
        let base_url = serve().await;
        let client = HttpContentClient::new(base_url).with_session("admin_session", "stale");
        let mut session = EditorSession::default();

        let result = session.refresh(&client).await;

        assert_eq!(result, Err(EditorError::Failed(ContentError::Unauthorized)));
        assert!(session.is_signed_out());
    }
}
