use axum::http::StatusCode;

pub mod posts;

// health check handler
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
