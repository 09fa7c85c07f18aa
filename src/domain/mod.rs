//! Domain entities of the knowledge base: users and their credentials, the
//! two-level category tree and FAQ articles.

pub mod article;
pub mod category;
pub mod types;
pub mod user;
