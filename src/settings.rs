//! Layered dashboard settings.
//!
//! Precedence, lowest first: built-in defaults, an optional config file,
//! `TASK_DURATION_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::data::UnitChoice;

const ENV_PREFIX: &str = "TASK_DURATION";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Payload file to poll.
    pub file: PathBuf,
    /// Auto-refresh interval, e.g. "5s".
    pub refresh: String,
    /// "auto" or one of seconds/minutes/hours/days.
    pub unit: String,
    pub auto_refresh: bool,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub file: Option<PathBuf>,
    pub refresh: Option<String>,
    pub unit: Option<String>,
    pub auto_refresh: Option<bool>,
}

impl Settings {
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("file", "task_durations.json")?
            .set_default("refresh", "5s")?
            .set_default("unit", "auto")?
            .set_default("auto_refresh", true)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("file", overrides.file.as_ref().map(|p| p.display().to_string()))?
            .set_override_option("refresh", overrides.refresh.clone())?
            .set_override_option("unit", overrides.unit.clone())?
            .set_override_option("auto_refresh", overrides.auto_refresh)?
            .build()
            .context("failed to load settings")?
            .try_deserialize()
            .context("invalid settings")?;

        // Surface bad values at startup rather than on first use
        settings.refresh_interval()?;
        settings.unit_choice()?;

        Ok(settings)
    }

    pub fn refresh_interval(&self) -> Result<Duration> {
        parse_duration(&self.refresh)
            .with_context(|| format!("invalid refresh interval {:?}", self.refresh))
    }

    pub fn unit_choice(&self) -> Result<UnitChoice> {
        Ok(self.unit.parse()?)
    }
}
