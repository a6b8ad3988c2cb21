//! Tags with case-insensitive unique names.

pub mod domain;
pub mod service;

pub use service::TagService;
