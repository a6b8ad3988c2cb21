use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{AuthResponse, LoginRequest, RegisterRequest};
use crate::domain::Account;
use crate::errors::ServiceError;
use crate::security::{issue_token, PasswordHasher, TokenConfig};
use crate::uow::UnitOfWork;

/// Auth business service independent of web framework
pub struct AuthService {
    uow: UnitOfWork,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenConfig,
}

impl AuthService {
    pub fn new(uow: UnitOfWork, hasher: Arc<dyn PasswordHasher>, tokens: TokenConfig) -> Self {
        Self { uow, hasher, tokens }
    }

    /// Register a new account and sign it in. `None` when the email is taken.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{domain::RegisterRequest, AuthService};
    /// use service::domain::Role;
    /// use service::security::{Argon2Hasher, TokenConfig};
    /// use service::uow::{memory::MemoryStore, UnitOfWork};
    ///
    /// let tokens = TokenConfig { secret: "doc-secret-0123456789".into(), issuer: "news".into(), audience: "web".into(), expire_minutes: 60 };
    /// let hasher = Arc::new(Argon2Hasher::with_params(8, 1, 1).unwrap());
    /// let svc = AuthService::new(UnitOfWork::new(Arc::new(MemoryStore::new())), hasher, tokens);
    /// let input = RegisterRequest { account_name: "Test".into(), account_email: "user@example.com".into(), account_password: "Secret123".into(), account_role: Role::Staff };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap().unwrap();
    /// assert_eq!(session.account_email, "user@example.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.account_email))]
    pub async fn register(&self, input: RegisterRequest) -> Result<Option<AuthResponse>, ServiceError> {
        let accounts = self.uow.repository::<Account>();
        let email = input.account_email.clone();
        if accounts.exists(&|a: &Account| a.email == email).await? {
            debug!("email already registered");
            return Ok(None);
        }

        let account = Account {
            id: Uuid::new_v4(),
            name: input.account_name,
            email: input.account_email,
            password_hash: self.hasher.hash(&input.account_password)?,
            role: input.account_role,
        };
        accounts.add(account.clone()).await;
        self.uow.save_changes().await?;
        info!(account_id = %account.id, role = account.role.name(), "account_registered");

        self.respond(account).map(Some)
    }

    /// Authenticate by email and password. `None` on unknown email or wrong password.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> Result<Option<AuthResponse>, ServiceError> {
        let email = input.email.clone();
        let found = self.uow.repository::<Account>().find(&|a: &Account| a.email == email).await?;
        let Some(account) = found.into_iter().next() else {
            debug!("unknown email");
            return Ok(None);
        };
        if !self.hasher.verify(&account.password_hash, &input.password)? {
            debug!(account_id = %account.id, "password mismatch");
            return Ok(None);
        }
        info!(account_id = %account.id, "account_logged_in");
        self.respond(account).map(Some)
    }

    fn respond(&self, account: Account) -> Result<AuthResponse, ServiceError> {
        let token = issue_token(&self.tokens, &account)?;
        Ok(AuthResponse {
            token,
            account_id: account.id,
            account_name: account.name,
            account_email: account.email,
            account_role: account.role,
        })
    }
}
