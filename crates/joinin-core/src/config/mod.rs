//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default so the engine can run
//! without any configuration files at all.

pub mod admission;
pub mod icebreaker;
pub mod logging;
pub mod store;

use serde::{Deserialize, Serialize};

use self::admission::AdmissionConfig;
use self::icebreaker::IcebreakerConfig;
use self::logging::LoggingConfig;
use self::store::StoreConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Session store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Join admission settings.
    #[serde(default)]
    pub admission: AdmissionConfig,
    /// Icebreaker generator settings.
    #[serde(default)]
    pub icebreaker: IcebreakerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables of the form `JOININ__SECTION__FIELD`
    /// (for example `JOININ__ADMISSION__MAX_RETRIES`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("JOININ")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
