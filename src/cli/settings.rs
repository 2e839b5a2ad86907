use crate::error::Result;
use crate::utils::constants::{COMPRESSION_SNAPPY, DEFAULT_SETTINGS_FILE, SETTINGS_ENV_PREFIX};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Run settings, layered as defaults < TOML file < `COORD_*` environment.
/// Command line flags are applied on top by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    pub representation: String,
    #[serde(default)]
    pub datum: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    pub output_format: String,
    pub compression: String,
    #[validate(range(min = 1, max = 1024))]
    pub max_workers: usize,
    pub progress: bool,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; otherwise
    /// `coordinate-processor.toml` in the working directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(SETTINGS_ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_SETTINGS_FILE)).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("representation", "dd")?
            .set_default("output_format", "csv")?
            .set_default("compression", COMPRESSION_SNAPPY)?
            .set_default("max_workers", num_cpus::get() as i64)?
            .set_default("progress", true)?
            .add_source(file)
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }
}
