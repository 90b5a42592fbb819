use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::domain::AppState;
use crate::domain::access::RequestContext;
use crate::domain::post::input::PostPayload;
use crate::domain::post::view::{PostDetails, PostOverview, PublicPost};
use crate::infrastructure::http::api::{ApiError, ApiSuccess, INVALID_BODY_MESSAGE};
use crate::infrastructure::http::handlers::posts::dto::DeletedResponse;

mod dto;

/// The gate answers before the body is looked at, so an anonymous caller
/// never learns whether its payload would have been accepted.
fn parse_body<S: AppState>(
    state: &S,
    request: &RequestContext,
    body: Result<Json<PostPayload>, JsonRejection>,
) -> Result<PostPayload, ApiError> {
    state.content().authorize(request)?;
    body.map(|Json(payload)| payload).map_err(|rejection| {
        tracing::debug!(%rejection, "rejected request body");
        ApiError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    })
}

pub async fn list_posts<S: AppState>(
    State(state): State<S>,
    request: RequestContext,
) -> Result<ApiSuccess<Vec<PostOverview>>, ApiError> {
    let posts = state.content().list_all(&request).await?;
    Ok(ApiSuccess::new(
        StatusCode::OK,
        posts.iter().map(PostOverview::from).collect(),
    ))
}

pub async fn create_post<S: AppState>(
    State(state): State<S>,
    request: RequestContext,
    body: Result<Json<PostPayload>, JsonRejection>,
) -> Result<ApiSuccess<PostOverview>, ApiError> {
    let payload = parse_body(&state, &request, body)?;
    let post = state.content().create(&request, payload).await?;
    Ok(ApiSuccess::new(StatusCode::CREATED, PostOverview::from(&post)))
}

pub async fn get_post<S: AppState>(
    Path(id): Path<String>,
    State(state): State<S>,
    request: RequestContext,
) -> Result<ApiSuccess<PostDetails>, ApiError> {
    let post = state.content().get_by_id(&request, &id).await?;
    Ok(ApiSuccess::new(StatusCode::OK, PostDetails::from(&post)))
}

pub async fn update_post<S: AppState>(
    Path(id): Path<String>,
    State(state): State<S>,
    request: RequestContext,
    body: Result<Json<PostPayload>, JsonRejection>,
) -> Result<ApiSuccess<PostOverview>, ApiError> {
    let payload = parse_body(&state, &request, body)?;
    let post = state.content().update(&request, &id, payload).await?;
    Ok(ApiSuccess::new(StatusCode::OK, PostOverview::from(&post)))
}

pub async fn delete_post<S: AppState>(
    Path(id): Path<String>,
    State(state): State<S>,
    request: RequestContext,
) -> Result<ApiSuccess<DeletedResponse>, ApiError> {
    state.content().delete(&request, &id).await?;
    Ok(ApiSuccess::new(StatusCode::OK, DeletedResponse { deleted: true }))
}

pub async fn list_published_posts<S: AppState>(
    State(state): State<S>,
) -> Result<ApiSuccess<Vec<PostOverview>>, ApiError> {
    let posts = state.content().list_published().await?;
    Ok(ApiSuccess::new(
        StatusCode::OK,
        posts.iter().map(PostOverview::from).collect(),
    ))
}

pub async fn get_published_post<S: AppState>(
    Path(slug): Path<String>,
    State(state): State<S>,
) -> Result<ApiSuccess<PublicPost>, ApiError> {
    let post = state.content().get_published_by_slug(&slug).await?;
    Ok(ApiSuccess::new(StatusCode::OK, PublicPost::from(&post)))
}
