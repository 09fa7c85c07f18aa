//! Persistence of the knowledge base state.
//!
//! Every collection is stored as one JSON document under a fixed key of a
//! [`KeyValueStore`]. The typed reader/writer traits are implemented once for
//! any store, so backends only need to provide `get`, `set` and `remove`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::article::Article;
use crate::domain::category::CategoryTree;
use crate::domain::user::{Credentials, User};

pub mod article;
pub mod category;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod user;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::DieselStore;

/// Ordered user collection.
pub const USERS_KEY: &str = "kb_users";
/// Username to password mapping.
pub const PASSWORDS_KEY: &str = "kb_passwords";
/// Currently logged-in user, absent when logged out.
pub const SESSION_KEY: &str = "kb_auth_user";
/// Nested category records.
pub const CATEGORIES_KEY: &str = "kb_categories";
/// Ordered article collection.
pub const ARTICLES_KEY: &str = "kb_articles";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[cfg(feature = "sqlite")]
    #[error("connection pool error: {0}")]
    Connection(#[from] diesel::r2d2::PoolError),
    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("migration error: {0}")]
    Migration(String),
    #[error("failed to encode {key}: {source}")]
    Serialization {
        key: &'static str,
        source: serde_json::Error,
    },
    /// A stored document could not be decoded into domain types.
    #[error("stored value under {key} is corrupt: {message}")]
    Corrupt { key: &'static str, message: String },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Minimal string key-value storage backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> RepositoryResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> RepositoryResult<()>;
    fn remove(&self, key: &str) -> RepositoryResult<()>;
}

fn load_json<S, T>(store: &S, key: &'static str) -> RepositoryResult<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| RepositoryError::Corrupt {
            key,
            message: e.to_string(),
        })
}

fn save_json<S, T>(store: &S, key: &'static str, value: &T) -> RepositoryResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)
        .map_err(|source| RepositoryError::Serialization { key, source })?;
    store.set(key, &raw)
}

/// Read access to accounts, credentials and the persisted session.
pub trait UserReader {
    fn load_users(&self) -> RepositoryResult<Option<Vec<User>>>;
    fn load_credentials(&self) -> RepositoryResult<Option<Credentials>>;
    fn load_session(&self) -> RepositoryResult<Option<User>>;
}

/// Write access to accounts, credentials and the persisted session.
pub trait UserWriter {
    fn save_users(&self, users: &[User]) -> RepositoryResult<()>;
    fn save_credentials(&self, credentials: &Credentials) -> RepositoryResult<()>;
    /// Stores the session user, or clears it when `None`.
    fn save_session(&self, user: Option<&User>) -> RepositoryResult<()>;
}

pub trait CategoryReader {
    fn load_categories(&self) -> RepositoryResult<Option<CategoryTree>>;
}

pub trait CategoryWriter {
    fn save_categories(&self, tree: &CategoryTree) -> RepositoryResult<()>;
}

pub trait ArticleReader {
    fn load_articles(&self) -> RepositoryResult<Option<Vec<Article>>>;
}

pub trait ArticleWriter {
    fn save_articles(&self, articles: &[Article]) -> RepositoryResult<()>;
}

/// Everything the application state needs from its backing store.
pub trait StateRepository:
    UserReader + UserWriter + CategoryReader + CategoryWriter + ArticleReader + ArticleWriter
{
}

impl<T> StateRepository for T where
    T: UserReader + UserWriter + CategoryReader + CategoryWriter + ArticleReader + ArticleWriter
{
}
