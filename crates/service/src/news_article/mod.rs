//! News articles: authored content linked to a category, creator/updater
//! accounts and a set of tags.

pub mod domain;
pub mod service;

pub use service::NewsArticleService;
