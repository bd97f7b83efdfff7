use crate::core::quote::{DEFAULT_QUOTE_DELAY_MS, DEFAULT_UNIT_PRICE};
use crate::core::types::Bool;
use crate::core::validation::is_not_empty;
use crate::errors::Error;
use serde::{Deserialize, Serialize};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, Error> {
    raw.trim().parse::<T>().map_err(|_| {
        Error::Parse(format!(
            "Invalid {what}: '{}'. Expected a non-negative whole number.",
            raw.trim()
        ))
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitPriceConfigItem {
    pub value: u32,
    pub description: String,
}

impl Default for UnitPriceConfigItem {
    fn default() -> Self {
        Self {
            value: DEFAULT_UNIT_PRICE,
            description: "Price charged per 30-minute slot.".into(),
        }
    }
}

impl ConfigItem<u32> for UnitPriceConfigItem {
    fn get_value(&self) -> &u32 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let price: u32 = parse_number(new_value, "unit price")?;
        if price == 0 {
            return Err(Error::Parse("Unit price must be greater than zero.".into()));
        }
        self.value = price;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDelayConfigItem {
    pub value: u64,
    pub description: String,
}

impl Default for QuoteDelayConfigItem {
    fn default() -> Self {
        Self {
            value: DEFAULT_QUOTE_DELAY_MS,
            description: "Milliseconds the quote takes to come back.".into(),
        }
    }
}

impl ConfigItem<u64> for QuoteDelayConfigItem {
    fn get_value(&self) -> &u64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = parse_number(new_value, "quote delay")?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequesterConfigItem {
    pub value: String,
    pub description: String,
}

impl Default for RequesterConfigItem {
    fn default() -> Self {
        Self {
            value: "Han Jungyo".into(),
            description: "Name recorded as the requester of submitted jobs.".into(),
        }
    }
}

impl ConfigItem<String> for RequesterConfigItem {
    fn get_value(&self) -> &String {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        is_not_empty(new_value, "requester")?;
        self.value = new_value.trim().to_string();
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomSeedConfigItem {
    pub value: Option<u64>,
    pub description: String,
}

impl Default for RandomSeedConfigItem {
    fn default() -> Self {
        Self {
            value: None,
            description: "Seed for the starting reservations; empty for a fresh draw each run."
                .into(),
        }
    }
}

impl ConfigItem<Option<u64>> for RandomSeedConfigItem {
    fn get_value(&self) -> &Option<u64> {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        if new_value.trim().is_empty() {
            self.value = None;
            return Ok(());
        }
        self.value = Some(parse_number(new_value, "random seed")?);
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}
