//! Auth module: registration and login on top of the account store.
//!
//! Both operations answer "no" with `Ok(None)` instead of an error so the
//! HTTP layer can map them to a plain 400/401.

pub mod domain;
pub mod service;

pub use service::AuthService;
