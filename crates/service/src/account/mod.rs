//! Account management: CRUD with unique email, role lookups and the
//! "no authored articles" delete guard.

pub mod domain;
pub mod service;

pub use service::AccountService;
