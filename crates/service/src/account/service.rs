use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{AccountResponse, CreateAccountRequest, UpdateAccountRequest};
use crate::domain::{Account, NewsArticle, Role};
use crate::errors::ServiceError;
use crate::security::PasswordHasher;
use crate::uow::UnitOfWork;

/// Account business service. Owns one unit of work for its lifetime.
pub struct AccountService {
    uow: UnitOfWork,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    pub fn new(uow: UnitOfWork, hasher: Arc<dyn PasswordHasher>) -> Self { Self { uow, hasher } }

    pub async fn get_all(&self) -> Result<Vec<AccountResponse>, ServiceError> {
        let accounts = self.uow.repository::<Account>().get_all().await?;
        self.project(accounts).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<AccountResponse>, ServiceError> {
        match self.uow.repository::<Account>().get_by_id(id).await? {
            Some(account) => Ok(self.project(vec![account]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn get_by_role(&self, role: Role) -> Result<Vec<AccountResponse>, ServiceError> {
        let accounts = self.uow.repository::<Account>().find(&|a: &Account| a.role == role).await?;
        self.project(accounts).await
    }

    /// Create an account with a unique email and a hashed password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::account::{domain::CreateAccountRequest, AccountService};
    /// use service::domain::Role;
    /// use service::security::Argon2Hasher;
    /// use service::uow::{memory::MemoryStore, UnitOfWork};
    ///
    /// let hasher = Arc::new(Argon2Hasher::with_params(8, 1, 1).unwrap());
    /// let svc = AccountService::new(UnitOfWork::new(Arc::new(MemoryStore::new())), hasher);
    /// let req = CreateAccountRequest {
    ///     account_name: "Staff".into(),
    ///     account_email: "staff@example.com".into(),
    ///     account_password: "Secret123".into(),
    ///     account_role: Role::Staff,
    /// };
    /// let created = tokio_test::block_on(svc.create(req)).unwrap();
    /// assert_eq!(created.role_name, "Staff");
    /// assert!(created.can_delete);
    /// ```
    #[instrument(skip(self, req), fields(email = %req.account_email))]
    pub async fn create(&self, req: CreateAccountRequest) -> Result<AccountResponse, ServiceError> {
        let accounts = self.uow.repository::<Account>();
        let email = req.account_email.clone();
        if accounts.exists(&|a: &Account| a.email == email).await? {
            debug!("email already registered");
            return Err(ServiceError::Validation("Email already exists".into()));
        }

        let account = Account {
            id: Uuid::new_v4(),
            name: req.account_name,
            email: req.account_email,
            password_hash: self.hasher.hash(&req.account_password)?,
            role: req.account_role,
        };
        let id = account.id;
        accounts.add(account).await;
        self.uow.save_changes().await?;
        info!(account_id = %id, "account_created");

        self.get_by_id(id).await?.ok_or_else(|| ServiceError::not_found("account"))
    }

    #[instrument(skip(self, req), fields(account_id = %req.account_id))]
    pub async fn update(&self, req: UpdateAccountRequest) -> Result<AccountResponse, ServiceError> {
        let accounts = self.uow.repository::<Account>();
        let mut account = accounts
            .get_by_id(req.account_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("account"))?;

        let (id, email) = (req.account_id, req.account_email.clone());
        if accounts.exists(&|a: &Account| a.email == email && a.id != id).await? {
            return Err(ServiceError::Validation("Email already exists".into()));
        }

        account.name = req.account_name;
        account.email = req.account_email;
        account.role = req.account_role;
        if let Some(password) = req.account_password.filter(|p| !p.is_empty()) {
            account.password_hash = self.hasher.hash(&password)?;
        }
        accounts.update(account).await;
        self.uow.save_changes().await?;
        info!("account_updated");

        self.get_by_id(id).await?.ok_or_else(|| ServiceError::not_found("account"))
    }

    /// Delete an account that authored no articles. Articles it last updated
    /// lose their updater reference and modified timestamp in the same commit.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let accounts = self.uow.repository::<Account>();
        let articles = self.uow.repository::<NewsArticle>();
        let account = accounts.get_by_id(id).await?.ok_or_else(|| ServiceError::not_found("account"))?;

        if articles.exists(&|n: &NewsArticle| n.created_by_id == id).await? {
            debug!("account has authored articles");
            return Err(ServiceError::Conflict("Cannot delete account that has created news articles".into()));
        }

        let touched = articles.find(&|n: &NewsArticle| n.updated_by_id == Some(id)).await?;
        let detached = touched.len();
        for mut article in touched {
            article.updated_by_id = None;
            article.modified_at = None;
            articles.update(article).await;
        }
        accounts.delete(&account).await;
        self.uow.save_changes().await?;
        info!(detached, "account_deleted");
        Ok(())
    }

    /// `true` when no article names this account as its creator. Unknown ids are deletable.
    pub async fn can_delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let authored = self
            .uow
            .repository::<NewsArticle>()
            .exists(&|n: &NewsArticle| n.created_by_id == id)
            .await?;
        Ok(!authored)
    }

    async fn project(&self, accounts: Vec<Account>) -> Result<Vec<AccountResponse>, ServiceError> {
        let articles = self.uow.repository::<NewsArticle>().get_all().await?;
        Ok(accounts.into_iter().map(|a| to_response(a, &articles)).collect())
    }
}

fn to_response(account: Account, articles: &[NewsArticle]) -> AccountResponse {
    let created = articles.iter().filter(|n| n.created_by_id == account.id).count();
    let updated = articles.iter().filter(|n| n.updated_by_id == Some(account.id)).count();
    AccountResponse {
        account_id: account.id,
        account_name: account.name,
        account_email: account.email,
        account_role: account.role,
        role_name: account.role.name().to_string(),
        created_news_articles_count: created,
        updated_news_articles_count: updated,
        can_delete: created == 0,
    }
}
