use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use common::types::MessageResponse;
use models::category;
use service::category::domain::{CategoryDetailResponse, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use service::category::CategoryService;

use super::auth::ServerState;
use crate::errors::JsonApiError;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/api/category", get(list).post(create))
        .route("/api/category/active", get(active))
        .route("/api/category/subcategories", get(roots))
        .route("/api/category/subcategories/:parent_id", get(children))
        .route("/api/category/:id", get(get_one).put(update).delete(remove))
}

fn svc(state: &ServerState) -> CategoryService { CategoryService::new(state.uow()) }

fn validate(name: &str, description: &str) -> Result<(), JsonApiError> {
    category::validate_name(name)?;
    category::validate_description(description)?;
    Ok(())
}

#[utoipa::path(get, path = "/api/category", tag = "category", security(("bearer" = [])), responses((status = 200, description = "All categories")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CategoryResponse>>, JsonApiError> {
    Ok(Json(svc(&state).get_all().await?))
}

#[utoipa::path(get, path = "/api/category/active", tag = "category", security(("bearer" = [])), responses((status = 200, description = "Active categories")))]
pub async fn active(State(state): State<ServerState>) -> Result<Json<Vec<CategoryResponse>>, JsonApiError> {
    Ok(Json(svc(&state).get_active().await?))
}

#[utoipa::path(get, path = "/api/category/subcategories", tag = "category", security(("bearer" = [])), responses((status = 200, description = "Root categories")))]
pub async fn roots(State(state): State<ServerState>) -> Result<Json<Vec<CategoryResponse>>, JsonApiError> {
    Ok(Json(svc(&state).get_sub_categories(None).await?))
}

#[utoipa::path(get, path = "/api/category/subcategories/{parent_id}", tag = "category", security(("bearer" = [])), params(("parent_id" = Uuid, Path, description = "Parent category id")), responses((status = 200, description = "Direct children")))]
pub async fn children(
    State(state): State<ServerState>,
    Path(parent_id): Path<Uuid>,
) -> Result<Json<Vec<CategoryResponse>>, JsonApiError> {
    Ok(Json(svc(&state).get_sub_categories(Some(parent_id)).await?))
}

#[utoipa::path(get, path = "/api/category/{id}", tag = "category", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Category id")), responses((status = 200, description = "Category with sub-categories"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryDetailResponse>, JsonApiError> {
    svc(&state)
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("Category not found"))
}

#[utoipa::path(post, path = "/api/category", tag = "category", security(("bearer" = [])), request_body = crate::openapi::CreateCategoryRequestDoc, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), JsonApiError> {
    validate(&input.category_name, &input.category_description)?;
    let created = svc(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/category/{id}", tag = "category", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Category id")), request_body = crate::openapi::UpdateCategoryRequestDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, JsonApiError> {
    if id != input.category_id {
        return Err(JsonApiError::bad_request("ID mismatch"));
    }
    validate(&input.category_name, &input.category_description)?;
    Ok(Json(svc(&state).update(input).await?))
}

#[utoipa::path(delete, path = "/api/category/{id}", tag = "category", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Category id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"), (status = 409, description = "Category still has articles or children")))]
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    svc(&state).delete(id).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
