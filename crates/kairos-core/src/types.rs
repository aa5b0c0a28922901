//! Recurrence vocabulary shared by the validator, normalizer, expander and store.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Recurrence frequency kind. Never changes once a pattern is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Monthly,
    Specific,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Specific => "specific",
        }
    }

    /// ## Summary
    /// Returns true for kinds that are bounded by a start and end date.
    #[must_use]
    pub const fn is_date_bounded(self) -> bool {
        matches!(self, Self::Weekly | Self::Monthly)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        [Self::Weekly, Self::Monthly, Self::Specific]
            .into_iter()
            .find(|freq| freq.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown frequency: {value}")))
    }
}

const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// ## Summary
/// Weekday code, `0` = Sunday through `6` = Saturday.
///
/// Ordering follows the code, so sets of codes iterate Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekdayCode(u8);

impl WeekdayCode {
    pub const SUNDAY: Self = Self(0);
    pub const MONDAY: Self = Self(1);
    pub const TUESDAY: Self = Self(2);
    pub const WEDNESDAY: Self = Self(3);
    pub const THURSDAY: Self = Self(4);
    pub const FRIDAY: Self = Self(5);
    pub const SATURDAY: Self = Self(6);

    /// Returns the code for `0..=6`, `None` otherwise.
    #[must_use]
    pub const fn new(code: u8) -> Option<Self> {
        if code < 7 { Some(Self(code)) } else { None }
    }

    /// ## Summary
    /// Maps an English weekday name to its code.
    ///
    /// Matching ignores case and surrounding whitespace. Abbreviations are not accepted.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        WEEKDAY_NAMES
            .iter()
            .zip(0u8..)
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, code)| Self(code))
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Self::SUNDAY,
            Weekday::Mon => Self::MONDAY,
            Weekday::Tue => Self::TUESDAY,
            Weekday::Wed => Self::WEDNESDAY,
            Weekday::Thu => Self::THURSDAY,
            Weekday::Fri => Self::FRIDAY,
            Weekday::Sat => Self::SATURDAY,
        }
    }

    #[must_use]
    pub const fn to_weekday(self) -> Weekday {
        match self.0 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }
}

impl TryFrom<u8> for WeekdayCode {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::new(code)
            .ok_or_else(|| CoreError::InvalidInput(format!("weekday code out of range: {code}")))
    }
}

impl From<WeekdayCode> for u8 {
    fn from(code: WeekdayCode) -> Self {
        code.0
    }
}

impl fmt::Display for WeekdayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a stored recurrence pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(Uuid);

impl PatternId {
    /// Generates a fresh, time-ordered identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PatternId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|err| CoreError::InvalidInput(format!("invalid pattern id {s:?}: {err}")))
    }
}
