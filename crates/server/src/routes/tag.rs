use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use common::types::MessageResponse;
use models::tag;
use service::tag::domain::{CreateTagRequest, TagResponse, UpdateTagRequest};
use service::tag::TagService;

use super::auth::ServerState;
use crate::errors::JsonApiError;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/api/tags", get(list).post(create))
        .route("/api/tags/:id", get(get_one).put(update).delete(remove))
}

fn svc(state: &ServerState) -> TagService { TagService::new(state.uow()) }

#[utoipa::path(get, path = "/api/tags", tag = "tags", security(("bearer" = [])), responses((status = 200, description = "All tags")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TagResponse>>, JsonApiError> {
    Ok(Json(svc(&state).get_all().await?))
}

#[utoipa::path(get, path = "/api/tags/{id}", tag = "tags", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Tag id")), responses((status = 200, description = "Tag"), (status = 404, description = "Not Found")))]
pub async fn get_one(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<TagResponse>, JsonApiError> {
    svc(&state)
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("Tag not found"))
}

#[utoipa::path(post, path = "/api/tags", tag = "tags", security(("bearer" = [])), request_body = crate::openapi::CreateTagRequestDoc, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), JsonApiError> {
    tag::validate_name(&input.tag_name)?;
    tag::validate_note(&input.note)?;
    Ok((StatusCode::CREATED, Json(svc(&state).create(input).await?)))
}

#[utoipa::path(put, path = "/api/tags/{id}", tag = "tags", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Tag id")), request_body = crate::openapi::UpdateTagRequestDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTagRequest>,
) -> Result<Json<TagResponse>, JsonApiError> {
    if id != input.tag_id {
        return Err(JsonApiError::bad_request("ID mismatch"));
    }
    tag::validate_name(&input.tag_name)?;
    tag::validate_note(&input.note)?;
    Ok(Json(svc(&state).update(input).await?))
}

#[utoipa::path(delete, path = "/api/tags/{id}", tag = "tags", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Tag id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn remove(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<MessageResponse>, JsonApiError> {
    svc(&state).delete(id).await?;
    Ok(Json(MessageResponse::new("Tag deleted successfully")))
}
