use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use common::types::MessageResponse;
use models::news_article;
use service::news_article::domain::{CreateNewsArticleRequest, NewsArticleResponse, UpdateNewsArticleRequest};
use service::news_article::NewsArticleService;
use service::security::Claims;

use super::auth::ServerState;
use crate::errors::JsonApiError;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/api/newsarticle", get(list).post(create))
        .route("/api/newsarticle/active", get(active))
        .route("/api/newsarticle/category/:category_id", get(by_category))
        .route("/api/newsarticle/tag/:tag_id", get(by_tag))
        .route("/api/newsarticle/:id", get(get_one).put(update).delete(remove))
}

fn svc(state: &ServerState) -> NewsArticleService { NewsArticleService::new(state.uow()) }

fn validate(title: &str, headline: &str, content: &str, source: &str) -> Result<(), JsonApiError> {
    news_article::validate_title(title)?;
    news_article::validate_headline(headline)?;
    news_article::validate_content(content)?;
    news_article::validate_source(source)?;
    Ok(())
}

fn caller_id(claims: &Claims) -> Result<Uuid, JsonApiError> {
    claims.account_id().map_err(|_| JsonApiError::unauthorized())
}

#[utoipa::path(get, path = "/api/newsarticle", tag = "newsarticle", security(("bearer" = [])), responses((status = 200, description = "All articles")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<NewsArticleResponse>>, JsonApiError> {
    Ok(Json(svc(&state).get_all().await?))
}

#[utoipa::path(get, path = "/api/newsarticle/active", tag = "newsarticle", security(("bearer" = [])), responses((status = 200, description = "Published articles")))]
pub async fn active(State(state): State<ServerState>) -> Result<Json<Vec<NewsArticleResponse>>, JsonApiError> {
    Ok(Json(svc(&state).get_active().await?))
}

#[utoipa::path(get, path = "/api/newsarticle/category/{category_id}", tag = "newsarticle", security(("bearer" = [])), params(("category_id" = Uuid, Path, description = "Category id")), responses((status = 200, description = "Articles in the category")))]
pub async fn by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Vec<NewsArticleResponse>>, JsonApiError> {
    Ok(Json(svc(&state).get_by_category(category_id).await?))
}

#[utoipa::path(get, path = "/api/newsarticle/tag/{tag_id}", tag = "newsarticle", security(("bearer" = [])), params(("tag_id" = Uuid, Path, description = "Tag id")), responses((status = 200, description = "Articles carrying the tag")))]
pub async fn by_tag(
    State(state): State<ServerState>,
    Path(tag_id): Path<Uuid>,
) -> Result<Json<Vec<NewsArticleResponse>>, JsonApiError> {
    Ok(Json(svc(&state).get_by_tag(tag_id).await?))
}

#[utoipa::path(get, path = "/api/newsarticle/{id}", tag = "newsarticle", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Article id")), responses((status = 200, description = "Article"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsArticleResponse>, JsonApiError> {
    svc(&state)
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("News article not found"))
}

/// The creator is the authenticated caller.
#[utoipa::path(post, path = "/api/newsarticle", tag = "newsarticle", security(("bearer" = [])), request_body = crate::openapi::CreateNewsArticleRequestDoc, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<CreateNewsArticleRequest>,
) -> Result<(StatusCode, Json<NewsArticleResponse>), JsonApiError> {
    validate(&input.news_title, &input.headline, &input.news_content, &input.news_source)?;
    let created = svc(&state).create(input, caller_id(&claims)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/newsarticle/{id}", tag = "newsarticle", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Article id")), request_body = crate::openapi::UpdateNewsArticleRequestDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateNewsArticleRequest>,
) -> Result<Json<NewsArticleResponse>, JsonApiError> {
    if id != input.news_article_id {
        return Err(JsonApiError::bad_request("ID mismatch"));
    }
    validate(&input.news_title, &input.headline, &input.news_content, &input.news_source)?;
    Ok(Json(svc(&state).update(input, caller_id(&claims)?).await?))
}

#[utoipa::path(delete, path = "/api/newsarticle/{id}", tag = "newsarticle", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Article id")), responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn remove(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<MessageResponse>, JsonApiError> {
    svc(&state).delete(id).await?;
    Ok(Json(MessageResponse::new("News article deleted successfully")))
}
