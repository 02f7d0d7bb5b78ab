//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings with a fixed microsecond precision so they
//! order correctly as text. Record bodies are compact JSON.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use journal_core::{fields::Timestamps, record::Stored, store::Record};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time, truncated to the precision the store keeps.
pub fn now_micros() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Bodies ──────────────────────────────────────────────────────────────────

pub fn encode_body<R: Record>(record: &R) -> Result<String> {
  Ok(serde_json::to_string(record)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `records` row.
pub struct RawRecord {
  pub id:        i64,
  pub created:   String,
  pub modified:  String,
  pub body_json: String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      created:   row.get(1)?,
      modified:  row.get(2)?,
      body_json: row.get(3)?,
    })
  }

  pub fn into_stored<R: Record>(self) -> Result<Stored<R>> {
    Ok(Stored {
      id:     self.id,
      stamps: Timestamps {
        created:  decode_dt(&self.created)?,
        modified: decode_dt(&self.modified)?,
      },
      record: serde_json::from_str(&self.body_json)?,
    })
  }
}
