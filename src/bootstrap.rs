//! Start-up helpers for embedding applications.

use thiserror::Error;

use crate::db::{establish_connection_pool, run_migrations};
use crate::models::config::AppConfig;
use crate::repository::{DieselStore, RepositoryError};
use crate::state::{InitOptions, KnowledgeBase, StateError};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    State(#[from] StateError),
}

/// Initialises `env_logger` with `info` as the default filter. Later calls
/// are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Opens the SQLite store described by `config`, applies migrations and
/// loads the state.
pub fn open_knowledge_base(
    config: &AppConfig,
) -> Result<KnowledgeBase<DieselStore>, BootstrapError> {
    let pool = establish_connection_pool(&config.database_url)?;
    run_migrations(&pool)?;

    let options = InitOptions {
        seed_catalogue: config.seed_catalogue,
    };
    let kb = KnowledgeBase::initialize_with(DieselStore::new(pool), options)?;
    log::info!("Knowledge base opened at {}", config.database_url);
    Ok(kb)
}

/// Loads [`AppConfig`], initialises logging and opens the knowledge base.
pub fn start() -> Result<KnowledgeBase<DieselStore>, BootstrapError> {
    init_logging();
    let config = AppConfig::load()?;
    open_knowledge_base(&config)
}
