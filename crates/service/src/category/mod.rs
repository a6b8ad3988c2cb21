//! Category hierarchy: CRUD with parent validation and delete guards.

pub mod domain;
pub mod service;

pub use service::CategoryService;
