use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_INTERACTIONS_PATH: &str = "data/user_activity.csv";
const DEFAULT_PRODUCTS_PATH: &str = "data/product.csv";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IngestionConfig {
    pub interactions_path: PathBuf,
    pub products_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RecommendConfig {
    /// Answer unknown users with the popularity strategy instead of failing.
    pub fallback_to_popularity: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub ingestion: IngestionConfig,
    pub recommend: RecommendConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ingestion: IngestionConfig {
                interactions_path: PathBuf::from(DEFAULT_INTERACTIONS_PATH),
                products_path: PathBuf::from(DEFAULT_PRODUCTS_PATH),
            },
            recommend: RecommendConfig {
                fallback_to_popularity: true,
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("SMARTRECO").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// Load a single explicit file on top of the built-in defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = defaults(Config::builder())?.add_source(File::from(path.as_ref()));
        builder.build()?.try_deserialize()
    }
}

fn defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    builder
        .set_default("ingestion.interactions_path", DEFAULT_INTERACTIONS_PATH)?
        .set_default("ingestion.products_path", DEFAULT_PRODUCTS_PATH)?
        .set_default("recommend.fallback_to_popularity", true)
}
