use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use tracing::{info, warn};

use models::account;
use service::account::{domain::AccountResponse, AccountService};
use service::auth::{domain::{AuthResponse, LoginRequest, RegisterRequest}, AuthService};
use service::domain::Role;
use service::security::{decode_token, Claims, PasswordHasher, TokenConfig};
use service::uow::{Store, UnitOfWork};

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn Store>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: TokenConfig,
}

impl ServerState {
    pub fn new(store: Arc<dyn Store>, hasher: Arc<dyn PasswordHasher>, tokens: TokenConfig) -> Self {
        Self { store, hasher, tokens }
    }

    /// Fresh unit of work for one request.
    pub fn uow(&self) -> UnitOfWork { UnitOfWork::new(self.store.clone()) }

    pub fn accounts(&self) -> AccountService { AccountService::new(self.uow(), self.hasher.clone()) }
}

/// Role requirement attached to a group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Authenticated,
    StaffOnly,
    /// Not bound to any route group; lecturers only reach the authenticated routes.
    LecturerOnly,
    AdminOnly,
}

impl Policy {
    pub fn allows(self, role: Option<Role>) -> bool {
        match self {
            Policy::Authenticated => true,
            Policy::StaffOnly => role == Some(Role::Staff),
            Policy::LecturerOnly => role == Some(Role::Lecturer),
            Policy::AdminOnly => role == Some(Role::Admin),
        }
    }
}

/// Bearer-token guard: 401 when the token is missing or fails validation,
/// 403 when the role does not satisfy the policy. Verified claims are put
/// into the request extensions for handlers.
pub async fn require_policy(
    State((state, policy)): State<(ServerState, Policy)>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let claims = {
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let Some(token) = token else {
            warn!(path = %path, "missing bearer token");
            return Err(JsonApiError::unauthorized());
        };
        decode_token(&state.tokens, token).map_err(|e| {
            warn!(path = %path, err = %e, "token validation failed");
            JsonApiError::unauthorized()
        })?
    };

    if !policy.allows(claims.role()) {
        warn!(path = %path, ?policy, role = %claims.role, "role not permitted");
        return Err(JsonApiError::forbidden());
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn validate_register(input: &RegisterRequest) -> Result<(), JsonApiError> {
    account::validate_name(&input.account_name)?;
    account::validate_email(&input.account_email)?;
    account::validate_password(&input.account_password)?;
    Ok(())
}

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequestDoc, responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, JsonApiError> {
    validate_register(&input)?;
    let svc = AuthService::new(state.uow(), state.hasher.clone(), state.tokens.clone());
    match svc.register(input).await? {
        Some(session) => {
            info!(account_id = %session.account_id, "register ok");
            Ok(Json(session))
        }
        None => Err(JsonApiError::bad_request("Email already exists")),
    }
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequestDoc, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, JsonApiError> {
    let svc = AuthService::new(state.uow(), state.hasher.clone(), state.tokens.clone());
    match svc.login(input).await? {
        Some(session) => Ok(Json(session)),
        None => Err(JsonApiError::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            Some("Invalid email or password".into()),
        )),
    }
}

/// The caller's own account.
#[utoipa::path(get, path = "/api/auth/profile", tag = "auth", security(("bearer" = [])), responses((status = 200, description = "Current account"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not Found")))]
pub async fn profile(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<AccountResponse>, JsonApiError> {
    let id = claims.account_id().map_err(|_| JsonApiError::unauthorized())?;
    state
        .accounts()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("Account not found"))
}
