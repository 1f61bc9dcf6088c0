use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use playback::PlaybackConfig;
use serde::Deserialize;
use shared::domain::SortingMethod;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "sortviz.toml";
const ENV_PREFIX: &str = "SORTVIZ__";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub playback: PlaybackConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            playback: PlaybackConfig::default(),
        }
    }
}

/// Defaults, then the TOML file, then `SORTVIZ__*` environment variables.
/// A missing default file is fine; a missing explicit `--config` is not.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let mut settings = match fs::read_to_string(&path) {
        Ok(raw) => parse_settings(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound && explicit_path.is_none() => {
            Settings::default()
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str(raw)?)
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

    if let Some(v) = var("LOG_LEVEL") {
        settings.log_level = v;
    }
    if let Some(v) = var("ALGORITHM") {
        match v.parse::<SortingMethod>() {
            Ok(method) => settings.playback.algorithm = method,
            Err(err) => warn!(%err, "ignoring {ENV_PREFIX}ALGORITHM"),
        }
    }
    override_number(var("SPEED"), "SPEED", &mut settings.playback.default_speed);
    override_number(var("MAX_LEN"), "MAX_LEN", &mut settings.playback.max_len);
    override_number(var("RANDOM_LEN"), "RANDOM_LEN", &mut settings.playback.random_len);
    override_number(var("RANDOM_MIN"), "RANDOM_MIN", &mut settings.playback.random_min);
    override_number(var("RANDOM_MAX"), "RANDOM_MAX", &mut settings.playback.random_max);
    override_number(
        var("SLOWEST_DELAY_MS"),
        "SLOWEST_DELAY_MS",
        &mut settings.playback.slowest_delay_ms,
    );
    override_number(
        var("FASTEST_DELAY_MS"),
        "FASTEST_DELAY_MS",
        &mut settings.playback.fastest_delay_ms,
    );
    if let Some(v) = var("SEED") {
        match v.parse() {
            Ok(seed) => settings.playback.seed = Some(seed),
            Err(_) => warn!(value = %v, "ignoring {ENV_PREFIX}SEED"),
        }
    }
}

fn override_number<T: std::str::FromStr>(raw: Option<String>, name: &str, target: &mut T) {
    let Some(raw) = raw else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => warn!(value = %raw, "ignoring {ENV_PREFIX}{name}"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
