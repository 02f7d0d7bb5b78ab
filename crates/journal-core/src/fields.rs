//! Field groups shared by several record types.
//!
//! Records embed these by value (usually via `#[serde(flatten)]`) instead of
//! inheriting them, so every record type stays a plain struct.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Timestamps ──────────────────────────────────────────────────────────────

/// Creation and last-write times. Both are assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
  /// Set once, when the record is first inserted.
  pub created:  DateTime<Utc>,
  /// Refreshed on every insert or update.
  pub modified: DateTime<Utc>,
}

// ─── Summary and notes ───────────────────────────────────────────────────────

/// Maximum length of a summary line, in characters.
pub const SUMMARY_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryAndNotes {
  pub summary: String,
  #[serde(default)]
  pub notes:   String,
}

impl SummaryAndNotes {
  pub fn new(summary: impl Into<String>) -> Self {
    Self { summary: summary.into(), notes: String::new() }
  }

  /// `true` when the summary is present and within [`SUMMARY_MAX_LEN`].
  pub fn is_valid(&self) -> bool {
    let len = self.summary.trim().chars().count();
    len > 0 && len <= SUMMARY_MAX_LEN
  }
}

// ─── Ratings ─────────────────────────────────────────────────────────────────

/// Five-star expectations-vs-reality scale, stored as its integer value.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  strum::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
  Awful     = 0,
  Bad       = 1,
  #[strum(to_string = "OK")]
  Ok        = 2,
  Good      = 3,
  Great     = 4,
  Excellent = 5,
}

impl From<Rating> for u8 {
  fn from(r: Rating) -> u8 { r as u8 }
}

impl TryFrom<u8> for Rating {
  type Error = Error;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::Awful),
      1 => Ok(Self::Bad),
      2 => Ok(Self::Ok),
      3 => Ok(Self::Good),
      4 => Ok(Self::Great),
      5 => Ok(Self::Excellent),
      other => Err(Error::InvalidRating(other)),
    }
  }
}

/// What you expected going in, and how it actually turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rateable {
  #[serde(default)]
  pub expectation: Option<Rating>,
  pub reality:     Rating,
}

impl Rateable {
  pub fn new(reality: Rating) -> Self { Self { expectation: None, reality } }
}

// ─── Dates with optional times ───────────────────────────────────────────────

/// Calendar date rendering used everywhere a date leaves the crate.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// 24-hour clock, minutes precision.
pub const TIME_FORMAT: &str = "%H:%M";

pub fn format_date(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

/// Render `date`, `time`, or both separated by a single space. Missing parts
/// are left out; both missing yields an empty string.
pub fn render_date_time(
  date: Option<NaiveDate>,
  time: Option<NaiveTime>,
) -> String {
  let mut out = date.map(format_date).unwrap_or_default();
  if let Some(t) = time {
    if !out.is_empty() {
      out.push(' ');
    }
    out.push_str(&t.format(TIME_FORMAT).to_string());
  }
  out
}

/// One edge of a period: any combination of a date and a time may be known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeBound {
  #[serde(default)]
  pub date: Option<NaiveDate>,
  #[serde(default)]
  pub time: Option<NaiveTime>,
}

impl DateTimeBound {
  pub fn on(date: NaiveDate) -> Self { Self { date: Some(date), time: None } }

  pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
    Self { date: Some(date), time: Some(time) }
  }

  pub fn is_set(&self) -> bool { self.date.is_some() || self.time.is_some() }

  pub fn render(&self) -> String { render_date_time(self.date, self.time) }

  /// The rendered bound, or `None` when neither part is known.
  pub fn rendered(&self) -> Option<String> {
    self.is_set().then(|| self.render())
  }
}
