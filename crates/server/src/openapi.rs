use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// `account_role`: 1 Staff, 2 Lecturer, 3 Admin.
#[derive(ToSchema)]
pub struct RegisterRequestDoc { pub account_name: String, pub account_email: String, pub account_password: String, pub account_role: i32 }

#[derive(ToSchema)]
pub struct LoginRequestDoc { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct CreateAccountRequestDoc { pub account_name: String, pub account_email: String, pub account_password: String, pub account_role: i32 }

#[derive(ToSchema)]
pub struct UpdateAccountRequestDoc {
    pub account_id: Uuid,
    pub account_name: String,
    pub account_email: String,
    pub account_password: Option<String>,
    pub account_role: i32,
}

#[derive(ToSchema)]
pub struct CreateCategoryRequestDoc {
    pub category_name: String,
    pub category_description: String,
    pub parent_category_id: Option<Uuid>,
    pub is_active: bool,
}

#[derive(ToSchema)]
pub struct UpdateCategoryRequestDoc {
    pub category_id: Uuid,
    pub category_name: String,
    pub category_description: String,
    pub parent_category_id: Option<Uuid>,
    pub is_active: bool,
}

#[derive(ToSchema)]
pub struct CreateTagRequestDoc { pub tag_name: String, pub note: String }

#[derive(ToSchema)]
pub struct UpdateTagRequestDoc { pub tag_id: Uuid, pub tag_name: String, pub note: String }

#[derive(ToSchema)]
pub struct CreateNewsArticleRequestDoc {
    pub news_title: String,
    pub headline: String,
    pub news_content: String,
    pub news_source: String,
    pub category_id: Uuid,
    pub news_status: bool,
    pub tag_ids: Vec<Uuid>,
}

/// Omit `tag_ids` to keep the current tags; send `[]` to clear them.
#[derive(ToSchema)]
pub struct UpdateNewsArticleRequestDoc {
    pub news_article_id: Uuid,
    pub news_title: String,
    pub headline: String,
    pub news_content: String,
    pub news_source: String,
    pub category_id: Uuid,
    pub news_status: bool,
    pub tag_ids: Option<Vec<Uuid>>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::profile,
        crate::routes::account::list,
        crate::routes::account::get_one,
        crate::routes::account::create,
        crate::routes::account::update,
        crate::routes::account::remove,
        crate::routes::account::can_delete,
        crate::routes::account::by_role,
        crate::routes::category::list,
        crate::routes::category::active,
        crate::routes::category::roots,
        crate::routes::category::children,
        crate::routes::category::get_one,
        crate::routes::category::create,
        crate::routes::category::update,
        crate::routes::category::remove,
        crate::routes::tag::list,
        crate::routes::tag::get_one,
        crate::routes::tag::create,
        crate::routes::tag::update,
        crate::routes::tag::remove,
        crate::routes::news_article::list,
        crate::routes::news_article::active,
        crate::routes::news_article::by_category,
        crate::routes::news_article::by_tag,
        crate::routes::news_article::get_one,
        crate::routes::news_article::create,
        crate::routes::news_article::update,
        crate::routes::news_article::remove,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequestDoc,
            LoginRequestDoc,
            CreateAccountRequestDoc,
            UpdateAccountRequestDoc,
            CreateCategoryRequestDoc,
            UpdateCategoryRequestDoc,
            CreateTagRequestDoc,
            UpdateTagRequestDoc,
            CreateNewsArticleRequestDoc,
            UpdateNewsArticleRequestDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "account"),
        (name = "category"),
        (name = "tags"),
        (name = "newsarticle")
    )
)]
pub struct ApiDoc;
