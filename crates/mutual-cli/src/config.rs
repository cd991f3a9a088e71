//! Configuration loading.
//!
//! Layers, later ones winning: built-in defaults, `mutual.toml` in the current
//! directory, the file given with `--config`, then `MUTUAL_*` environment
//! variables (nested keys use `__`, e.g. `MUTUAL_WORKING_HOURS__START=09:00`).

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use mutual_engine::WorkingHours;
use serde::{Deserialize, Serialize};

/// Config file picked up from the working directory when present.
const LOCAL_CONFIG: &str = "mutual.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Daily window, UTC, inside which availability is computed.
    pub working_hours: WorkingHours,
    /// JSON array of `{ id, name }` records.
    pub users_path: PathBuf,
    /// JSON array of `{ id, user_id, start_time, end_time }` records.
    pub events_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_hours: WorkingHours::default(),
            users_path: PathBuf::from("users.json"),
            events_path: PathBuf::from("events.json"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[allow(clippy::result_large_err)]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(LOCAL_CONFIG));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("MUTUAL_").split("__"))
            .extract()
    }
}
