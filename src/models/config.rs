use serde::Deserialize;

fn default_database_url() -> String {
    "knowledge_base.db".to_string()
}

fn default_seed_catalogue() -> bool {
    true
}

/// Configuration options of the knowledge base.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Path of the SQLite database holding the key-value entries.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Seed the sample catalogue when no categories or articles are stored yet.
    #[serde(default = "default_seed_catalogue")]
    pub seed_catalogue: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            seed_catalogue: default_seed_catalogue(),
        }
    }
}

#[cfg(feature = "sqlite")]
impl AppConfig {
    /// Loads `config/default.yaml` (optional) overlaid with `APP__*` variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config/default")
    }

    /// Same as [`Self::load`] with an explicit file stem.
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }

        config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
