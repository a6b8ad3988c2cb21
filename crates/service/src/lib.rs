//! Service layer for the news site.
//! - A generic unit of work over a pluggable [`uow::Store`] (PostgreSQL or in-memory).
//! - One business service per entity plus registration/login.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod domain;
pub mod uow;
pub mod security;
pub mod account;
pub mod category;
pub mod tag;
pub mod news_article;
pub mod auth;
#[cfg(test)]
pub mod test_support;
