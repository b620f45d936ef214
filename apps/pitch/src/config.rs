use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "pitch.toml";
const FALLBACK_TIMEZONE: &str = "UTC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub timezone: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".into(),
            timezone: system_timezone(),
            log_filter: "warn".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    timezone: Option<String>,
    log_filter: Option<String>,
}

/// Defaults, then `pitch.toml` (or `explicit_path`), then the environment.
///
/// A missing default file is fine; a missing explicit file is an error.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(explicit_path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    explicit_path: Option<&Path>,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(&path) {
        Ok(raw) => {
            apply_file(&mut settings, &raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        }
        Err(err) if explicit_path.is_some() => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, var);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.timezone {
        settings.timezone = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("PITCH_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    // TZ often holds values like ":/etc/localtime"; only an IANA name is usable.
    if let Some(v) = var("TZ") {
        let name = v.trim_start_matches(':');
        if name.parse::<Tz>().is_ok() {
            settings.timezone = name.to_string();
        }
    }
    if let Some(v) = var("APP__TIMEZONE") {
        settings.timezone = v;
    }

    if let Some(v) = var("RUST_LOG") {
        settings.log_filter = v;
    }
}

/// The host's IANA zone, or `UTC` when it cannot be detected.
fn system_timezone() -> String {
    timezone_or_utc(iana_time_zone::get_timezone().ok())
}

fn timezone_or_utc(detected: Option<String>) -> String {
    detected
        .filter(|name| name.parse::<Tz>().is_ok())
        .unwrap_or_else(|| FALLBACK_TIMEZONE.to_string())
}

pub fn parse_timezone(name: &str) -> anyhow::Result<Tz> {
    let name = name.trim();
    name.parse::<Tz>()
        .map_err(|err| anyhow!("unknown time zone '{name}': {err}"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
