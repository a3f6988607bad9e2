use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::protocol::DEFAULT_CALENDAR_NAME;

use crate::normalize_base_url;

pub const DEFAULT_CONFIG_FILE: &str = "scheduler.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub calendar_name: String,
    pub request_timeout_secs: u64,
    pub num_schedules: Option<u32>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5001".into(),
            calendar_name: DEFAULT_CALENDAR_NAME.into(),
            request_timeout_secs: 120,
            num_schedules: None,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    calendar_name: Option<String>,
    request_timeout_secs: Option<u64>,
    num_schedules: Option<u32>,
    log_filter: Option<String>,
}

/// Defaults, then `scheduler.toml` (or `$SCHEDULER_CONFIG`), then env overrides.
pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match std::env::var("SCHEDULER_CONFIG") {
        Ok(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file '{path}'"))?;
            apply_file_settings(&mut settings, &raw)
                .with_context(|| format!("invalid config file '{path}'"))?;
        }
        Err(_) => {
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                let raw = fs::read_to_string(DEFAULT_CONFIG_FILE)
                    .with_context(|| format!("failed to read {DEFAULT_CONFIG_FILE}"))?;
                apply_file_settings(&mut settings, &raw)
                    .with_context(|| format!("invalid {DEFAULT_CONFIG_FILE}"))?;
            }
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    validate(&settings)?;
    Ok(settings)
}

pub(crate) fn apply_file_settings(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.calendar_name {
        settings.calendar_name = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if file_cfg.num_schedules.is_some() {
        settings.num_schedules = file_cfg.num_schedules;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

pub(crate) fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("SCHEDULER_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__CALENDAR_NAME") {
        settings.calendar_name = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = lookup("APP__NUM_SCHEDULES") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.num_schedules = Some(parsed);
        }
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

fn validate(settings: &Settings) -> anyhow::Result<()> {
    normalize_base_url(&settings.api_base_url)?;
    if settings.calendar_name.trim().is_empty() {
        anyhow::bail!("calendar_name must not be empty");
    }
    if settings.request_timeout_secs == 0 {
        anyhow::bail!("request_timeout_secs must be greater than zero");
    }
    Ok(())
}
