//! Aggregation of timeline points into the envelope the timeline widget loads.
//!
//! A line type picks which record kinds are gathered. Kinds are gathered in a
//! fixed order and each contributes its records in natural stored order; the
//! widget does its own sorting by `start`, so nothing is interleaved here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
  Error, RecordId, Result,
  record::{Activity, Entry, Event, MedicalObservation, Period, Person, Stored},
  store::{JournalStore, Record},
  timeline::{AsTimelinePoint, Owned, TimelinePoint},
};

// ─── Selectors ───────────────────────────────────────────────────────────────

/// Which timeline to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
  /// Events, periods and people.
  Life,
  /// Activities, entries and medical observations.
  Diary,
}

impl LineType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Life => "life",
      Self::Diary => "diary",
    }
  }
}

/// `"life"` selects [`LineType::Life`]; anything else falls back to the diary.
impl From<&str> for LineType {
  fn from(selector: &str) -> Self {
    if selector == "life" { Self::Life } else { Self::Diary }
  }
}

/// Whether private activities show up on the diary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrivacyPolicy {
  #[default]
  ShowPrivate,
  HidePrivate,
}

impl PrivacyPolicy {
  pub fn from_hide_private(hide: bool) -> Self {
    if hide { Self::HidePrivate } else { Self::ShowPrivate }
  }

  fn admits(self, activity: &Activity) -> bool {
    self == Self::ShowPrivate || !activity.private
  }
}

// ─── Envelope ────────────────────────────────────────────────────────────────

/// The JSON document served to the timeline widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEnvelope {
  /// Reserved for wiki linking; always empty.
  #[serde(rename = "wiki-url")]
  pub wiki_url:         String,
  /// Reserved for wiki linking; always empty.
  #[serde(rename = "wiki-section")]
  pub wiki_section:     String,
  #[serde(rename = "dateTimeFormat")]
  pub date_time_format: String,
  pub events:           Vec<TimelinePoint>,
}

impl TimelineEnvelope {
  pub fn new(events: Vec<TimelinePoint>) -> Self {
    Self {
      wiki_url: String::new(),
      wiki_section: String::new(),
      date_time_format: "iso8601".to_owned(),
      events,
    }
  }
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Build the timeline for `line_type` from everything in `store`.
pub async fn project<S: JournalStore>(
  store: &S,
  line_type: LineType,
  privacy: PrivacyPolicy,
) -> Result<TimelineEnvelope> {
  let events = match line_type {
    LineType::Life => life_points(store).await?,
    LineType::Diary => diary_points(store, privacy).await?,
  };
  Ok(TimelineEnvelope::new(events))
}

async fn all<S: JournalStore, R: Record>(store: &S) -> Result<Vec<Stored<R>>> {
  store.list::<R>(None).await.map_err(Error::store)
}

async fn life_points<S: JournalStore>(store: &S) -> Result<Vec<TimelinePoint>> {
  let mut points = Vec::new();
  points.extend(all::<S, Event>(store).await?.iter().map(Stored::timeline_point));
  points.extend(all::<S, Period>(store).await?.iter().map(Stored::timeline_point));
  points.extend(all::<S, Person>(store).await?.iter().map(Stored::timeline_point));
  Ok(points)
}

async fn diary_points<S: JournalStore>(
  store: &S,
  privacy: PrivacyPolicy,
) -> Result<Vec<TimelinePoint>> {
  let entries = all::<S, Entry>(store).await?;
  let by_id: HashMap<RecordId, &Entry> =
    entries.iter().map(|e| (e.id, &e.record)).collect();

  let mut points = Vec::new();

  for activity in all::<S, Activity>(store).await? {
    if !privacy.admits(&activity.record) {
      continue;
    }
    let entry = owning_entry(&by_id, &activity)?;
    let owned = Owned { record: &activity.record, entry };
    points.push(owned.as_timeline_point(activity.id));
  }

  points.extend(entries.iter().map(Stored::timeline_point));

  for obs in all::<S, MedicalObservation>(store).await? {
    let entry = owning_entry(&by_id, &obs)?;
    let owned = Owned { record: &obs.record, entry };
    points.push(owned.as_timeline_point(obs.id));
  }

  Ok(points)
}

fn owning_entry<'a, R: Record>(
  by_id: &HashMap<RecordId, &'a Entry>,
  stored: &Stored<R>,
) -> Result<&'a Entry> {
  let entry_id = stored.record.owner().unwrap_or_default();
  by_id.get(&entry_id).copied().ok_or(Error::MissingOwner {
    kind: R::KIND,
    id: stored.id,
    entry_id,
  })
}
