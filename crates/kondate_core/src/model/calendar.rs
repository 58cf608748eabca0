//! Calendar date value type and Sunday-aligned week windows.
//!
//! # Responsibility
//! - Provide one canonical date type shared by the store, aggregator and view.
//! - Resolve the Sunday-to-Saturday window that contains any date.
//!
//! # Invariants
//! - `CalendarDate::key()` is injective and `parse_key` is its inverse.
//! - `WeekWindow` always holds 7 consecutive dates starting on a Sunday.
//! - Window resolution never fails for a constructed `CalendarDate`.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed weekday labels indexed by Sunday-based weekday index.
pub const WEEKDAY_LABELS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Number of days in one window.
pub const WEEK_LEN: usize = 7;

// `(year, ordinal)` of the first Sunday and last Saturday with four-digit
// years, so every resolved window stays inside the range.
const FIRST_DAY: (i32, u32) = (1, 7);
const LAST_DAY: (i32, u32) = (9999, 359);
const SUPPORTED_RANGE: &str = "0001-01-07..=9999-12-25";

/// Error raised when a date cannot be constructed or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Input is not a `YYYY-MM-DD` key naming a real calendar day.
    InvalidKey(String),
    /// Date exists but lies outside the supported range.
    OutOfRange(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(value) => write!(f, "invalid date key: `{value}`"),
            Self::OutOfRange(value) => write!(
                f,
                "date `{value}` is outside supported range {SUPPORTED_RANGE}"
            ),
        }
    }
}

impl Error for CalendarError {}

/// Plain calendar day without time component.
///
/// Ordered chronologically. Constructed only inside 0001-01-07..=9999-12-25,
/// whole Sunday-to-Saturday weeks, so every day of a resolved window is
/// itself a valid `CalendarDate`. Defaults to 1970-01-01.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Wraps a chrono date, rejecting dates outside the supported range.
    pub fn new(date: NaiveDate) -> Result<Self, CalendarError> {
        if !(FIRST_DAY..=LAST_DAY).contains(&(date.year(), date.ordinal())) {
            return Err(CalendarError::OutOfRange(date.to_string()));
        }
        Ok(Self(date))
    }

    /// Builds a date from numeric parts.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| CalendarError::InvalidKey(format!("{year}-{month}-{day}")))?;
        Self::new(date)
    }

    /// Parses the canonical `YYYY-MM-DD` key.
    pub fn parse_key(raw: &str) -> Result<Self, CalendarError> {
        let trimmed = raw.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|_| CalendarError::InvalidKey(trimmed.to_string()))?;
        let date = Self::new(date)?;
        // Why: chrono accepts unpadded fields; only the canonical spelling
        // may round-trip so writer and reader never disagree on keys.
        if date.key() != trimmed {
            return Err(CalendarError::InvalidKey(trimmed.to_string()));
        }
        Ok(date)
    }

    /// Canonical string key, `YYYY-MM-DD`.
    pub fn key(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Weekday index with Sunday = 0 .. Saturday = 6.
    pub fn weekday_index(&self) -> usize {
        self.0.weekday().num_days_from_sunday() as usize
    }

    /// ISO weekday with Monday = 1 .. Sunday = 7.
    pub fn iso_weekday(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    /// Fixed weekday label for this day.
    pub fn weekday_label(&self) -> &'static str {
        WEEKDAY_LABELS[self.weekday_index()]
    }

    /// Human-readable label, e.g. `1/8(月)`.
    pub fn display_label(&self) -> String {
        format!(
            "{}/{}({})",
            self.0.month(),
            self.0.day(),
            self.weekday_label()
        )
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Underlying chrono value.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    fn add_days(self, days: u64) -> Self {
        // Supported range keeps the result representable.
        Self(self.0 + Days::new(days))
    }

    fn sub_days(self, days: u64) -> Self {
        Self(self.0 - Days::new(days))
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_key(&raw).map_err(serde::de::Error::custom)
    }
}

/// Seven consecutive days, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekWindow {
    days: [CalendarDate; WEEK_LEN],
}

impl WeekWindow {
    /// First day of the window (always a Sunday).
    pub fn start(&self) -> CalendarDate {
        self.days[0]
    }

    /// Last day of the window (always a Saturday).
    pub fn end(&self) -> CalendarDate {
        self.days[WEEK_LEN - 1]
    }

    pub fn days(&self) -> &[CalendarDate; WEEK_LEN] {
        &self.days
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start() <= date && date <= self.end()
    }

    /// Position of `date` inside the window, if present.
    pub fn index_of(&self, date: CalendarDate) -> Option<usize> {
        self.days.iter().position(|day| *day == date)
    }
}

impl<'a> IntoIterator for &'a WeekWindow {
    type Item = &'a CalendarDate;
    type IntoIter = std::slice::Iter<'a, CalendarDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Resolves the Sunday-aligned window containing `date`.
///
/// Days since the previous Sunday are `iso_weekday % 7`, so Sunday maps to
/// itself and Monday steps back one day.
pub fn resolve_week(date: CalendarDate) -> WeekWindow {
    let offset = u64::from(date.iso_weekday() % 7);
    let start = date.sub_days(offset);
    let mut days = [start; WEEK_LEN];
    for (index, slot) in days.iter_mut().enumerate() {
        *slot = start.add_days(index as u64);
    }
    WeekWindow { days }
}
