//! Azonbot configuration system.
//!
//! Loaded from `~/.azonbot/config.toml` (or `--config`), with the delivery
//! token and directory URL overridable through `BOT_TOKEN` / `API_URL`.
//! Validation runs once at startup; a running process is never reconfigured.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{AzonError, Result};
use crate::types::Prayer;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzonConfig {
    /// Telegram bot token. Usually supplied via the BOT_TOKEN env var.
    #[serde(default)]
    pub bot_token: String,
    /// Base URL of the subscriber directory. Usually via API_URL.
    #[serde(default)]
    pub directory_url: String,
    /// Fixed UTC offset of the prayer schedule, e.g. "+05:00" (Tashkent).
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
    #[serde(default)]
    pub onboarding: OnboardingConfig,
}

fn default_utc_offset() -> String {
    "+05:00".into()
}

impl Default for AzonConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            directory_url: String::new(),
            utc_offset: default_utc_offset(),
            schedule: ScheduleConfig::default(),
            dispatcher: DispatcherConfig::default(),
            onboarding: OnboardingConfig::default(),
        }
    }
}

/// The six daily slots as "HH:MM" strings in the configured zone.
/// Fixed for the lifetime of the process; changing them requires a restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_bomdod")]
    pub bomdod: String,
    #[serde(default = "default_quyosh")]
    pub quyosh: String,
    #[serde(default = "default_peshin")]
    pub peshin: String,
    #[serde(default = "default_asr")]
    pub asr: String,
    #[serde(default = "default_shom")]
    pub shom: String,
    #[serde(default = "default_xufton")]
    pub xufton: String,
}

fn default_bomdod() -> String { "04:56".into() }
fn default_quyosh() -> String { "05:32".into() }
fn default_peshin() -> String { "11:59".into() }
fn default_asr() -> String { "15:51".into() }
fn default_shom() -> String { "17:37".into() }
fn default_xufton() -> String { "18:50".into() }

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            bomdod: default_bomdod(),
            quyosh: default_quyosh(),
            peshin: default_peshin(),
            asr: default_asr(),
            shom: default_shom(),
            xufton: default_xufton(),
        }
    }
}

impl ScheduleConfig {
    /// Parse all six slots. Errors name the offending prayer.
    pub fn entries(&self) -> Result<Vec<(NaiveTime, Prayer)>> {
        let raw = [
            (&self.bomdod, Prayer::Bomdod),
            (&self.quyosh, Prayer::Quyosh),
            (&self.peshin, Prayer::Peshin),
            (&self.asr, Prayer::Asr),
            (&self.shom, Prayer::Shom),
            (&self.xufton, Prayer::Xufton),
        ];
        let mut entries = Vec::with_capacity(raw.len());
        for (text, prayer) in raw {
            let time = NaiveTime::parse_from_str(text, "%H:%M").map_err(|e| {
                AzonError::Config(format!("invalid {} time '{text}': {e}", prayer.key()))
            })?;
            entries.push((time, prayer));
        }
        Ok(entries)
    }
}

/// Dispatcher loop tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Poll period in seconds. Must stay below 60 so no minute is skipped.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Concurrent send cap within one fan-out.
    #[serde(default = "default_send_concurrency")]
    pub send_concurrency: usize,
    /// Upper bound on one whole dispatch, so a hung transport cannot stall
    /// slot-matching.
    #[serde(default = "default_dispatch_deadline")]
    pub dispatch_deadline_secs: u64,
}

fn default_poll_interval() -> u64 { 10 }
fn default_send_concurrency() -> usize { 8 }
fn default_dispatch_deadline() -> u64 { 120 }

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            send_concurrency: default_send_concurrency(),
            dispatch_deadline_secs: default_dispatch_deadline(),
        }
    }
}

/// Onboarding long-poll tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingConfig {
    /// Telegram getUpdates long-poll timeout in seconds.
    #[serde(default = "default_update_timeout")]
    pub update_timeout_secs: u64,
}

fn default_update_timeout() -> u64 { 30 }

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            update_timeout_secs: default_update_timeout(),
        }
    }
}

impl AzonConfig {
    /// Load config from the default path, falling back to defaults when the
    /// file does not exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AzonError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| AzonError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".azonbot")
            .join("config.toml")
    }

    /// Environment overrides for the secrets: BOT_TOKEN and API_URL.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("BOT_TOKEN") {
            if !token.is_empty() {
                self.bot_token = token;
            }
        }
        if let Ok(url) = std::env::var("API_URL") {
            if !url.is_empty() {
                self.directory_url = url;
            }
        }
    }

    /// Startup validation. Any error here is fatal — the process cannot run
    /// without a token, a directory, a parseable zone, or a sane schedule.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.is_empty() {
            return Err(AzonError::Config(
                "bot_token is not set (config file or BOT_TOKEN)".into(),
            ));
        }
        if self.directory_url.is_empty() {
            return Err(AzonError::Config(
                "directory_url is not set (config file or API_URL)".into(),
            ));
        }
        if self.dispatcher.poll_interval_secs == 0 || self.dispatcher.poll_interval_secs >= 60 {
            return Err(AzonError::Config(format!(
                "poll_interval_secs must be between 1 and 59, got {}",
                self.dispatcher.poll_interval_secs
            )));
        }
        self.offset()?;
        let entries = self.schedule.entries()?;
        for (i, (time, prayer)) in entries.iter().enumerate() {
            if let Some((_, other)) = entries[..i].iter().find(|(t, _)| t == time) {
                return Err(AzonError::Config(format!(
                    "{} and {} share the slot {}",
                    other.key(),
                    prayer.key(),
                    time.format("%H:%M")
                )));
            }
        }
        Ok(())
    }

    /// The configured zone as a chrono offset.
    pub fn offset(&self) -> Result<FixedOffset> {
        self.utc_offset.parse::<FixedOffset>().map_err(|e| {
            AzonError::Config(format!("invalid utc_offset '{}': {e}", self.utc_offset))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AzonConfig {
        let mut config = AzonConfig::default();
        config.bot_token = "123:abc".into();
        config.directory_url = "https://directory.example/".into();
        config
    }

    #[test]
    fn test_default_schedule_slots() {
        let config = AzonConfig::default();
        let entries = config.schedule.entries().unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].0, NaiveTime::from_hms_opt(4, 56, 0).unwrap());
        assert_eq!(entries[0].1, Prayer::Bomdod);
        assert_eq!(entries[5].0, NaiveTime::from_hms_opt(18, 50, 0).unwrap());
        assert_eq!(entries[5].1, Prayer::Xufton);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            bot_token = "t"
            directory_url = "https://d.example/"
            utc_offset = "+05:00"

            [schedule]
            bomdod = "05:10"

            [dispatcher]
            poll_interval_secs = 5
        "#;
        let config: AzonConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.schedule.bomdod, "05:10");
        // Unset fields keep their defaults
        assert_eq!(config.schedule.quyosh, "05:32");
        assert_eq!(config.dispatcher.poll_interval_secs, 5);
        assert_eq!(config.dispatcher.send_concurrency, 8);
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let mut config = configured();
        config.bot_token.clear();
        assert!(matches!(config.validate(), Err(AzonError::Config(_))));
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let mut config = configured();
        config.directory_url.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_poll_interval_must_stay_under_a_minute() {
        let mut config = configured();
        config.dispatcher.poll_interval_secs = 60;
        assert!(config.validate().is_err());
        config.dispatcher.poll_interval_secs = 0;
        assert!(config.validate().is_err());
        config.dispatcher.poll_interval_secs = 59;
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_offset_is_fatal() {
        let mut config = configured();
        config.utc_offset = "Tashkent".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_offset_parses_tashkent() {
        let config = configured();
        let offset = config.offset().unwrap();
        assert_eq!(offset.local_minus_utc(), 5 * 3600);
    }

    #[test]
    fn test_bad_schedule_time_is_fatal() {
        let mut config = configured();
        config.schedule.asr = "25:00".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("asr"));
    }

    #[test]
    fn test_duplicate_slot_is_fatal() {
        let mut config = configured();
        config.schedule.shom = config.schedule.asr.clone();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("asr"));
        assert!(err.to_string().contains("shom"));
    }

    #[test]
    fn test_default_path() {
        let path = AzonConfig::default_path();
        assert!(path.to_string_lossy().contains(".azonbot"));
    }
}
