use crate::core::slot_clock::SLOTS_PER_DAY;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::extensions::string::ToDashSeparators;
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum GlobalCommand {
    #[strum(serialize = "dashboard", to_string = "dashboard")]
    Dashboard,
    #[strum(serialize = "dates", to_string = "dates")]
    Dates,
    #[strum(serialize = "date", to_string = "date")]
    Date,
    #[strum(serialize = "grid", to_string = "grid")]
    Grid,
    #[strum(serialize = "toggle", to_string = "toggle")]
    Toggle,
    #[strum(serialize = "clear", to_string = "clear")]
    Clear,
    #[strum(serialize = "submit", to_string = "submit")]
    Submit,
    #[strum(serialize = "queue", to_string = "queue")]
    Queue,
    #[strum(serialize = "show", to_string = "show")]
    Show,
    #[strum(serialize = "config", to_string = "config")]
    Config,
    #[strum(serialize = "log", to_string = "log")]
    Log,
    #[strum(serialize = "man", to_string = "man")]
    Man,
}

impl GlobalCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported command: '{}'. Valid commands: {}",
                s.trim(),
                valid_csv::<GlobalCommand>()
            ))
        })
    }
}

// =========
// DateKey
// =========

/// Canonical key for one calendar day. Time of day never takes part in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(pub NaiveDate);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum DateFormat {
    #[strum(serialize = "%Y-%m-%d", to_string = "%Y-%m-%d")]
    YmdDash,
    #[strum(serialize = "%m-%d-%Y", to_string = "%m-%d-%Y")]
    MdYDash,
    #[strum(serialize = "%m-%d", to_string = "%m-%d")]
    MdDash,
}

#[derive(Debug, Clone)]
struct DateParseSpec {
    input: String,
    date_format: DateFormat,
}

impl DateFormat {
    fn build_parse_spec(self, input: &str, current_year: i32) -> DateParseSpec {
        match self {
            DateFormat::YmdDash | DateFormat::MdYDash => DateParseSpec {
                input: input.to_owned(),
                date_format: self,
            },
            DateFormat::MdDash => DateParseSpec {
                input: format!("{current_year}-{input}"),
                date_format: DateFormat::YmdDash,
            },
        }
    }
}

impl DateKey {
    pub fn today() -> Self {
        DateKey(Local::now().date_naive())
    }

    pub fn offset(self, days: i64) -> Self {
        DateKey(self.0 + Duration::days(days))
    }

    /// `M/D` label used on the date strip buttons.
    pub fn short_label(&self) -> String {
        format!("{}/{}", self.0.month(), self.0.day())
    }

    pub fn usage() -> String {
        let today = Local::now().date_naive();
        let formats = DateFormat::iter()
            .map(|df| today.format(df.as_ref()).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Supported formats: {} (slashes are accepted too)", formats)
    }

    pub fn try_from_str(input: &str) -> Result<Self> {
        let input = input.to_dash_separators();
        let current_year = Local::now().date_naive().year();

        for f in DateFormat::iter() {
            let spec = f.build_parse_spec(&input, current_year);
            if let Ok(date) = NaiveDate::parse_from_str(&spec.input, spec.date_format.as_ref()) {
                return Ok(DateKey(date));
            }
        }

        Err(Error::Parse(format!(
            "Invalid date format: '{}'. {}",
            input,
            Self::usage()
        )))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

// ===========
// SlotIndex
// ===========

/// A half-hour slot within a day, always in `0..48`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIndex(u8);

impl SlotIndex {
    pub fn try_new(raw: i64) -> Result<Self> {
        if (0..SLOTS_PER_DAY as i64).contains(&raw) {
            Ok(SlotIndex(raw as u8))
        } else {
            Err(Error::Parse(format!(
                "Invalid slot: {}. Slots run from 0 to {}.",
                raw,
                SLOTS_PER_DAY - 1
            )))
        }
    }

    pub fn try_from_str(s: &str) -> Result<Self> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::Parse(format!("Expected a slot number, got '{}'", s.trim())))?;
        Self::try_new(raw)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every slot of the day in ascending order.
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..SLOTS_PER_DAY).map(SlotIndex)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========
// JobType
// =========

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum JobType {
    Print,
    Render,
    Simulation,
    Training,
}

impl JobType {
    pub fn label(&self) -> &'static str {
        match self {
            JobType::Print => "3D Print",
            JobType::Render => "Rendering",
            JobType::Simulation => "Simulation",
            JobType::Training => "Model Training",
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Parse(format!(
                "Invalid job type: '{}'. Valid job types: {}",
                s.trim(),
                valid_csv::<JobType>()
            ))
        })
    }
}

// =========
// Urgency
// =========

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, AsRefStr, EnumIterDerive,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
        }
    }

    /// Why the job lands where it does in the queue.
    pub fn priority_reason(&self) -> String {
        format!(
            "Requested with {} urgency; the job will be assigned after contending with jobs of the same urgency tier.",
            self.label()
        )
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Parse(format!(
                "Invalid urgency: '{}'. Valid urgencies: {}",
                s.trim(),
                valid_csv::<Urgency>()
            ))
        })
    }
}

// ======
// Bool
// ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "True", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "False", to_string = "False")]
    TextFalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s) {
            Ok(fmt) => Ok(Bool(matches!(fmt, BoolFormat::TextTrue))),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Flag {
    #[strum(serialize = "-h", serialize = "-help", to_string = "-h")]
    Help,
}
