use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Environment variables checked, in order, for the provider credential.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// How the provider is reached. What is asked of it (models, temperature,
/// aspect ratio) is fixed in code and not configurable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://generativelanguage.googleapis.com".into(),
            request_timeout_secs: 60,
        }
    }
}

impl ProviderSettings {
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api_base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            bail!("api_base_url must be an http(s) URL, got '{}'", self.api_base_url);
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UserSettings {
    provider: ProviderSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            let parsed: UserSettings = serde_json::from_str(&contents).unwrap_or_default();
            if parsed.provider.validate().is_ok() {
                parsed
            } else {
                log::warn!(
                    "Ignoring invalid provider settings in {}; using defaults",
                    path.display()
                );
                UserSettings::default()
            }
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn provider(&self) -> ProviderSettings {
        self.read().provider.clone()
    }

    pub fn update_provider(&self, settings: ProviderSettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self.write();
        let mut next = guard.clone();
        next.provider = settings;
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Reads the provider credential from the environment. Called per request so a
/// key exported after startup is picked up.
pub fn api_key_from_env() -> Result<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .with_context(|| format!("no API key configured (set {})", API_KEY_VARS.join(" or ")))
}
