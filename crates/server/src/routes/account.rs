use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use common::types::MessageResponse;
use models::account;
use service::account::domain::{AccountResponse, CreateAccountRequest, UpdateAccountRequest};
use service::domain::Role;

use super::auth::ServerState;
use crate::errors::JsonApiError;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/api/account", get(list).post(create))
        .route("/api/account/:id", get(get_one).put(update).delete(remove))
        .route("/api/account/:id/can-delete", get(can_delete))
        .route("/api/account/role/:role_id", get(by_role))
}

#[derive(Debug, Serialize)]
pub struct CanDeleteResponse {
    pub can_delete: bool,
}

#[utoipa::path(get, path = "/api/account", tag = "account", security(("bearer" = [])), responses((status = 200, description = "All accounts")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<AccountResponse>>, JsonApiError> {
    Ok(Json(state.accounts().get_all().await?))
}

#[utoipa::path(get, path = "/api/account/{id}", tag = "account", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Account id")), responses((status = 200, description = "Account"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, JsonApiError> {
    state
        .accounts()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("Account not found"))
}

#[utoipa::path(post, path = "/api/account", tag = "account", security(("bearer" = [])), request_body = crate::openapi::CreateAccountRequestDoc, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), JsonApiError> {
    account::validate_name(&input.account_name)?;
    account::validate_email(&input.account_email)?;
    account::validate_password(&input.account_password)?;
    let created = state.accounts().create(input).await?;
    info!(account_id = %created.account_id, "account created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/account/{id}", tag = "account", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Account id")), request_body = crate::openapi::UpdateAccountRequestDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, JsonApiError> {
    if id != input.account_id {
        return Err(JsonApiError::bad_request("ID mismatch"));
    }
    account::validate_name(&input.account_name)?;
    account::validate_email(&input.account_email)?;
    if let Some(password) = input.account_password.as_deref().filter(|p| !p.is_empty()) {
        account::validate_password(password)?;
    }
    Ok(Json(state.accounts().update(input).await?))
}

#[utoipa::path(delete, path = "/api/account/{id}", tag = "account", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Account id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"), (status = 409, description = "Account has authored articles")))]
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    state.accounts().delete(id).await?;
    Ok(Json(MessageResponse::new("Account deleted successfully")))
}

#[utoipa::path(get, path = "/api/account/{id}/can-delete", tag = "account", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Account id")), responses((status = 200, description = "Whether the account can be deleted")))]
pub async fn can_delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CanDeleteResponse>, JsonApiError> {
    let can_delete = state.accounts().can_delete(id).await?;
    Ok(Json(CanDeleteResponse { can_delete }))
}

#[utoipa::path(get, path = "/api/account/role/{role_id}", tag = "account", security(("bearer" = [])), params(("role_id" = i32, Path, description = "1 Staff, 2 Lecturer, 3 Admin")), responses((status = 200, description = "Accounts with the role"), (status = 400, description = "Unknown role")))]
pub async fn by_role(
    State(state): State<ServerState>,
    Path(role_id): Path<i32>,
) -> Result<Json<Vec<AccountResponse>>, JsonApiError> {
    account::validate_role(role_id)?;
    let role = Role::try_from(role_id)?;
    Ok(Json(state.accounts().get_by_role(role).await?))
}
