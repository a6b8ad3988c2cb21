//! SeaORM entities for the news site plus field-level validators shared by
//! the HTTP boundary.

pub mod errors;
pub mod db;
pub mod account;
pub mod category;
pub mod tag;
pub mod news_article;
pub mod news_tag;

#[cfg(test)]
mod tests;
