//! Timeline points, the uniform shape every timeline-capable record projects
//! into for the browser-side timeline widget.

use serde::{Deserialize, Serialize};

use crate::{
  RecordId,
  detail::ModelType,
  fields::{format_date, render_date_time},
  record::{
    Activity, Entry, Event, MedicalObservation, Period, Person, Stored,
  },
};

/// Stand-in start for a period whose start is entirely unknown. The widget
/// cannot draw open-ended ranges.
pub const YEAR_ZERO: &str = "1900-01-01";
/// Stand-in end for a period whose end is entirely unknown.
pub const YEAR_INFINITY: &str = "2100-01-01";
/// Placeholder for an unknown date in human-readable captions.
pub const INDETERMINATE_TIME: &str = "~";
/// Separates the two ends of a range in captions.
pub const RANGE_ARROW: char = '\u{21D2}';

// ─── Point ───────────────────────────────────────────────────────────────────

/// One drawable item on a timeline. Optional fields are omitted from the JSON
/// when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
  pub id:             String,
  /// `YYYY-MM-DD`, or `YYYY-MM-DD HH:MM` when a time is known.
  pub start:          String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end:            Option<String>,
  pub duration_event: bool,
  pub title:          String,
  /// Concrete record type; the detail dispatcher accepts it as a type name.
  pub classname:      String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub caption:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub latest_start:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub earliest_end:   Option<String>,
}

impl TimelinePoint {
  /// A single-instant point with no range fields.
  pub fn instant(
    id: RecordId,
    start: String,
    title: impl Into<String>,
    classname: &str,
  ) -> Self {
    Self {
      id: id.to_string(),
      start,
      end: None,
      duration_event: false,
      title: title.into(),
      classname: classname.to_owned(),
      caption: None,
      latest_start: None,
      earliest_end: None,
    }
  }
}

// ─── Projection contract ─────────────────────────────────────────────────────

/// Records that can be drawn on a timeline.
pub trait AsTimelinePoint {
  fn as_timeline_point(&self, id: RecordId) -> TimelinePoint;
}

impl<T: AsTimelinePoint> Stored<T> {
  pub fn timeline_point(&self) -> TimelinePoint {
    self.record.as_timeline_point(self.id)
  }
}

/// A record that takes its date from the entry it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct Owned<'a, T> {
  pub record: &'a T,
  pub entry:  &'a Entry,
}

impl AsTimelinePoint for Entry {
  fn as_timeline_point(&self, id: RecordId) -> TimelinePoint {
    TimelinePoint::instant(
      id,
      format_date(self.date),
      &self.text.summary,
      ModelType::Entry.name(),
    )
  }
}

impl AsTimelinePoint for Person {
  fn as_timeline_point(&self, id: RecordId) -> TimelinePoint {
    TimelinePoint::instant(
      id,
      format_date(self.met),
      &self.name,
      ModelType::Person.name(),
    )
  }
}

impl AsTimelinePoint for Owned<'_, Activity> {
  fn as_timeline_point(&self, id: RecordId) -> TimelinePoint {
    let kind = self.record.kind.name();
    TimelinePoint::instant(
      id,
      format_date(self.entry.date),
      format!("{kind}: {}", self.record.text.summary),
      kind,
    )
  }
}

impl AsTimelinePoint for Owned<'_, MedicalObservation> {
  fn as_timeline_point(&self, id: RecordId) -> TimelinePoint {
    TimelinePoint::instant(
      id,
      format_date(self.entry.date),
      &self.record.text.summary,
      ModelType::MedicalObservation.name(),
    )
  }
}

impl AsTimelinePoint for Event {
  fn as_timeline_point(&self, id: RecordId) -> TimelinePoint {
    TimelinePoint::instant(
      id,
      render_date_time(Some(self.date), self.time),
      &self.text.summary,
      ModelType::Event.name(),
    )
  }
}

impl Period {
  /// `"{summary}: {start} ⇒ {end}"` over the raw dates, with
  /// [`INDETERMINATE_TIME`] for a missing date.
  pub fn caption(&self) -> String {
    let edge = |d: Option<chrono::NaiveDate>| {
      d.map(format_date)
        .unwrap_or_else(|| INDETERMINATE_TIME.to_owned())
    };
    format!(
      "{}: {} {RANGE_ARROW} {}",
      self.text.summary,
      edge(self.start.date),
      edge(self.end.date),
    )
  }
}

impl AsTimelinePoint for Period {
  fn as_timeline_point(&self, id: RecordId) -> TimelinePoint {
    let start = self
      .start
      .rendered()
      .unwrap_or_else(|| YEAR_ZERO.to_owned());
    let end = self
      .end
      .rendered()
      .unwrap_or_else(|| YEAR_INFINITY.to_owned());

    TimelinePoint {
      id: id.to_string(),
      start,
      end: Some(end),
      duration_event: true,
      title: self.text.summary.clone(),
      classname: ModelType::Period.name().to_owned(),
      caption: Some(self.caption()),
      latest_start: self.latest_start.rendered(),
      earliest_end: self.earliest_end.rendered(),
    }
  }
}
