pub mod models;

use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ConfigItem, FileLoggingConfigItem, QuoteDelayConfigItem, RandomSeedConfigItem,
    RequesterConfigItem, UnitPriceConfigItem,
};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    UnitPrice,
    QuoteDelayMs,
    Requester,
    RandomSeed,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub unit_price: UnitPriceConfigItem,
    #[serde(default)]
    pub quote_delay_ms: QuoteDelayConfigItem,
    #[serde(default)]
    pub requester: RequesterConfigItem,
    #[serde(default)]
    pub random_seed: RandomSeedConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

/// (key, old value, new value) of the last successful edit.
pub type ConfigChange = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<ConfigChange>,
}

#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
    pub fn get(&self, index: usize) -> Option<&(String, String, String)> {
        self.0.get(index)
    }
}
impl Index<usize> for ConfigRows {
    type Output = (String, String, String);
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Parse(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::Parse(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::Parse(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn unit_price(&self) -> u32 {
        *self.data.unit_price.get_value()
    }
    pub fn quote_delay(&self) -> Duration {
        Duration::from_millis(*self.data.quote_delay_ms.get_value())
    }
    pub fn requester(&self) -> &str {
        self.data.requester.get_value()
    }
    pub fn random_seed(&self) -> Option<u64> {
        *self.data.random_seed.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    fn description_of(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::UnitPrice => self.data.unit_price.description(),
            ConfigKey::QuoteDelayMs => self.data.quote_delay_ms.description(),
            ConfigKey::Requester => self.data.requester.description(),
            ConfigKey::RandomSeed => self.data.random_seed.description(),
            ConfigKey::FileLoggingEnabled => self.data.file_logging_enabled.description(),
        }
    }

    fn value_of(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::UnitPrice => self.unit_price().to_string(),
            ConfigKey::QuoteDelayMs => self.data.quote_delay_ms.get_value().to_string(),
            ConfigKey::Requester => self.requester().to_string(),
            ConfigKey::RandomSeed => self
                .random_seed()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            ConfigKey::FileLoggingEnabled => self.data.file_logging_enabled.get_value().to_string(),
        }
    }

    pub fn rows(&self) -> ConfigRows {
        ConfigRows(
            ConfigKey::iter()
                .map(|key| {
                    (
                        key.to_string(),
                        self.description_of(key).to_string(),
                        self.value_of(key),
                    )
                })
                .collect(),
        )
    }

    pub fn set_by_index(&mut self, index: usize, new_value: &str) -> Result<()> {
        let key = ConfigKey::iter()
            .nth(index)
            .ok_or_else(|| Error::Parse(format!("Invalid ID: {index}")))?;
        self.set_key(key, new_value)
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.value_of(key);
        self.edit(|cfg| Self::apply(cfg, key, new_value))?;
        // stash for caller to log.
        self.last_change = Some((key.to_string(), old, self.value_of(key)));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<ConfigChange> {
        self.last_change.take()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = Self::parse_key(key_str)?;
        self.set_key(key, new_value)
    }

    pub fn set_many<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.edit(|cfg| {
            for (k, v) in pairs {
                let key = Self::parse_key(k.as_ref())?;
                Self::apply(cfg, key, v.as_ref())?;
            }
            Ok(())
        })
    }

    fn parse_key(key_str: &str) -> Result<ConfigKey> {
        ConfigKey::from_str(key_str).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str,
                valid_csv::<ConfigKey>()
            ))
        })
    }

    fn apply(cfg: &mut ConfigFile, key: ConfigKey, new_value: &str) -> Result<()> {
        match key {
            ConfigKey::UnitPrice => cfg.unit_price.set_value(new_value),
            ConfigKey::QuoteDelayMs => cfg.quote_delay_ms.set_value(new_value),
            ConfigKey::Requester => cfg.requester.set_value(new_value),
            ConfigKey::RandomSeed => cfg.random_seed.set_value(new_value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(new_value),
        }
    }

    /// Validate against a scratch copy first so a bad value leaves the
    /// in-memory config untouched.
    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        let mut draft = self.data.clone();
        f(&mut draft)?;
        self.data = draft;
        self.save()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| Error::Parse(format!("Failed to encode config: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| Error::Parse(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}
