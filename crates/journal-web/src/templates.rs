//! Page and fragment rendering.
//!
//! Each detail template takes one resolved record and produces the HTML
//! fragment shown in a timeline info bubble.

use chrono::NaiveDate;
use journal_core::{
  detail::{Detail, DetailRecord},
  fields::{Rateable, SummaryAndNotes, format_date, render_date_time},
  projection::LineType,
  record::{
    Activity, ActivityKind, BikeRide, DiningOut, Entry, Event,
    MedicalObservation, Period, Person, SocialEvent, Stored,
  },
  timeline::{INDETERMINATE_TIME, RANGE_ARROW},
};

use crate::{error::Result, html::HtmlWriter};

/// Separates a bound from its fuzzy counterpart in period dates.
const FUZZY_ARROW: &str = "\u{2194}";

// ─── Timeline page ───────────────────────────────────────────────────────────

/// The page hosting the timeline widget. Everything the script needs is in
/// data attributes on `#timeline`.
pub fn timeline_page(line_type: LineType, today: NaiveDate) -> Result<String> {
  let line = line_type.as_str();
  let title = match line_type {
    LineType::Life => "Life",
    LineType::Diary => "Diary",
  };
  let events_url = format!("/timeline_json/{line}/");
  let today = format_date(today);

  let mut w = HtmlWriter::new();
  w.doctype()?;
  w.start("html", &[("lang", "en")])?;

  w.start("head", &[])?;
  w.void("meta", &[("charset", "utf-8")])?;
  w.elem("title", &[], &format!("{title} timeline"))?;
  w.void("link", &[("rel", "stylesheet"), ("href", "/static/journal.css")])?;
  w.blank("script", &[("src", "/static/timeline/timeline-api.js")])?;
  w.blank("script", &[("src", "/static/journal.js"), ("defer", "defer")])?;
  w.end("head")?;

  w.start("body", &[("class", line)])?;
  w.elem("h1", &[], title)?;
  w.blank("div", &[
    ("id", "timeline"),
    ("data-line-type", line),
    ("data-today", today.as_str()),
    ("data-events-url", events_url.as_str()),
    ("data-details-url", "/details/"),
  ])?;
  w.end("body")?;

  w.end("html")?;
  Ok(w.finish())
}

// ─── Detail fragments ────────────────────────────────────────────────────────

/// Render the fragment for a resolved record, picked by the requested type.
pub fn detail(detail: &Detail) -> Result<String> {
  let mut w = HtmlWriter::new();
  let class = format!("detail {}", detail.model);
  w.start("div", &[("class", class.as_str())])?;
  match &detail.record {
    DetailRecord::Entry(e) => entry(&mut w, e)?,
    DetailRecord::Person(p) => person(&mut w, p)?,
    DetailRecord::Activity(a, e) => activity(&mut w, a, e)?,
    DetailRecord::MedicalObservation(o, e) => observation(&mut w, o, e)?,
    DetailRecord::Event(e) => event(&mut w, e)?,
    DetailRecord::Period(p) => period(&mut w, p)?,
  }
  w.end("div")?;
  Ok(w.finish())
}

fn row(w: &mut HtmlWriter, label: &str, value: &str) -> Result<()> {
  w.elem("dt", &[], label)?;
  w.elem("dd", &[], value)
}

fn notes(w: &mut HtmlWriter, text: &SummaryAndNotes) -> Result<()> {
  if text.notes.trim().is_empty() {
    return Ok(());
  }
  w.elem("p", &[("class", "notes")], &text.notes)
}

fn rating(rating: &Rateable) -> String {
  match rating.expectation {
    Some(expected) => format!("{} (expected {expected})", rating.reality),
    None => rating.reality.to_string(),
  }
}

fn entry(w: &mut HtmlWriter, e: &Stored<Entry>) -> Result<()> {
  let r = &e.record;
  w.elem("h3", &[], &r.text.summary)?;
  w.start("dl", &[])?;
  row(w, "Date", &format_date(r.date))?;
  row(w, "Mood", &r.mood.to_string())?;
  row(w, "Written by", &r.user)?;
  w.end("dl")?;
  notes(w, &r.text)
}

fn person(w: &mut HtmlWriter, p: &Stored<Person>) -> Result<()> {
  let r = &p.record;
  w.elem("h3", &[], &r.name)?;
  w.elem("p", &[("class", "summary")], &r.text.summary)?;
  w.start("dl", &[])?;
  row(w, "Relation", &r.relation.to_string())?;
  row(w, "Met", &format_date(r.met))?;
  w.end("dl")?;
  notes(w, &r.text)
}

fn activity(
  w: &mut HtmlWriter,
  a: &Stored<Activity>,
  e: &Stored<Entry>,
) -> Result<()> {
  let r = &a.record;
  w.elem("h3", &[], &format!("{}: {}", r.kind.name(), r.text.summary))?;
  w.start("dl", &[])?;
  row(w, "Date", &format_date(e.record.date))?;
  row(w, "Entry", &e.record.text.summary)?;
  if let Some(hours) = r.duration {
    row(w, "Duration", &format!("{hours} h"))?;
  }
  row(w, "Rating", &rating(&r.rating))?;
  match &r.kind {
    ActivityKind::Activity => {}
    ActivityKind::BikeRide(ride) => bike_ride(w, ride)?,
    ActivityKind::SocialEvent(social) => social_event(w, social)?,
    ActivityKind::DiningOut(dining) => dining_out(w, dining)?,
  }
  if r.private {
    row(w, "Private", "yes")?;
  }
  w.end("dl")?;
  notes(w, &r.text)
}

fn bike_ride(w: &mut HtmlWriter, ride: &BikeRide) -> Result<()> {
  row(w, "Distance", &format!("{} mi", ride.distance))?;
  row(w, "Average speed", &format!("{:.1} mph", ride.average_speed))?;
  row(w, "Climbing", &format!("{} ft", ride.climbing))?;
  if ride.solo {
    row(w, "Solo", "yes")?;
  }
  Ok(())
}

fn social_event(w: &mut HtmlWriter, social: &SocialEvent) -> Result<()> {
  if !social.company.is_empty() {
    row(w, "Company", &format!("{} people", social.company.len()))?;
  }
  Ok(())
}

fn dining_out(w: &mut HtmlWriter, dining: &DiningOut) -> Result<()> {
  row(w, "Restaurant", &dining.restaurant)?;
  if !dining.location.is_empty() {
    row(w, "Location", &dining.location)?;
  }
  if !dining.link.is_empty() {
    row(w, "Link", &dining.link)?;
  }
  if !dining.company.is_empty() {
    row(w, "Company", &format!("{} people", dining.company.len()))?;
  }
  Ok(())
}

fn observation(
  w: &mut HtmlWriter,
  o: &Stored<MedicalObservation>,
  e: &Stored<Entry>,
) -> Result<()> {
  let r = &o.record;
  w.elem("h3", &[], &r.text.summary)?;
  w.start("dl", &[])?;
  row(w, "Date", &format_date(e.record.date))?;
  w.end("dl")?;
  notes(w, &r.text)
}

fn event(w: &mut HtmlWriter, e: &Stored<Event>) -> Result<()> {
  let r = &e.record;
  w.elem("h3", &[], &r.text.summary)?;
  w.start("dl", &[])?;
  row(w, "When", &render_date_time(Some(r.date), r.time))?;
  w.end("dl")?;
  notes(w, &r.text)
}

fn period(w: &mut HtmlWriter, p: &Stored<Period>) -> Result<()> {
  let r = &p.record;
  w.elem("h3", &[], &r.text.summary)?;
  w.start("dl", &[])?;
  w.elem("dt", &[], "When")?;
  w.start("dd", &[("class", "period-dates")])?;
  period_dates(w, r)?;
  w.end("dd")?;
  w.end("dl")?;
  notes(w, &r.text)
}

/// `start ↔ latest_start ⇒ earliest_end ↔ end`. The fuzzy bounds only appear
/// next to a known start or end; an unknown start or end is
/// [`INDETERMINATE_TIME`].
fn period_dates(w: &mut HtmlWriter, r: &Period) -> Result<()> {
  let fuzzy = [("class", "fuzzy")];

  match r.start.rendered() {
    Some(start) => {
      w.text(&start)?;
      if let Some(latest) = r.latest_start.rendered() {
        w.text(&format!(" {FUZZY_ARROW} "))?;
        w.elem("span", &fuzzy, &latest)?;
      }
    }
    None => w.text(INDETERMINATE_TIME)?,
  }

  w.text(&format!(" {RANGE_ARROW} "))?;

  match r.end.rendered() {
    Some(end) => {
      if let Some(earliest) = r.earliest_end.rendered() {
        w.elem("span", &fuzzy, &earliest)?;
        w.text(&format!(" {FUZZY_ARROW} "))?;
      }
      w.text(&end)?;
    }
    None => w.text(INDETERMINATE_TIME)?,
  }
  Ok(())
}
