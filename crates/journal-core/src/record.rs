//! Journal records: everything a user can write down.
//!
//! Each record is a plain struct composed of the field groups in
//! [`crate::fields`]. Polymorphic records (activities, media) carry a closed
//! `kind` enum whose variant name is the discriminator the store persists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  RecordId,
  detail::ModelType,
  fields::{DateTimeBound, Rateable, SummaryAndNotes, Timestamps, format_date},
  store::{NaturalOrder, Record},
};

// ─── Stored envelope ─────────────────────────────────────────────────────────

/// A record as it exists in the store: id, timestamps, then the record's own
/// fields, all flattened into one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
  pub id:     RecordId,
  #[serde(flatten)]
  pub stamps: Timestamps,
  #[serde(flatten)]
  pub record: T,
}

// ─── Entry ───────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
  #[strum(to_string = "Very Happy")]
  VeryHappy,
  Happy,
  Good,
  #[strum(to_string = "OK")]
  Ok,
  Down,
  Frustrated,
  Angry,
  Depressed,
  Sick,
}

/// One day of journaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
  #[serde(flatten)]
  pub text:        SummaryAndNotes,
  pub date:        NaiveDate,
  pub mood:        Mood,
  /// Name of the user who owns the entry.
  pub user:        String,
  #[serde(default)]
  pub media:       Vec<RecordId>,
  #[serde(default)]
  pub consumables: Vec<RecordId>,
}

impl Record for Entry {
  const KIND: &'static str = "entry";
  const ORDER: NaturalOrder = NaturalOrder::SortKeyDescending;

  fn text(&self) -> &SummaryAndNotes { &self.text }

  fn sort_key(&self) -> String { format_date(self.date) }
}

// ─── Person ──────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Relation {
  Relative,
  Friend,
  #[strum(to_string = "Co-worker")]
  CoWorker,
  Acquaintance,
  Stranger,
}

/// A person or group of people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
  #[serde(flatten)]
  pub text:     SummaryAndNotes,
  pub name:     String,
  pub relation: Relation,
  /// When you met.
  pub met:      NaiveDate,
}

impl Record for Person {
  const KIND: &'static str = "person";
  const ORDER: NaturalOrder = NaturalOrder::Created;

  fn text(&self) -> &SummaryAndNotes { &self.text }
}

// ─── Activity ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeRide {
  /// Miles.
  pub distance:      u32,
  /// Miles per hour, one decimal place.
  pub average_speed: f64,
  /// Feet.
  pub climbing:      u32,
  #[serde(default)]
  pub solo:          bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialEvent {
  /// People who were there.
  #[serde(default)]
  pub company: Vec<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningOut {
  pub restaurant:  String,
  #[serde(default)]
  pub location:    String,
  #[serde(default)]
  pub link:        String,
  #[serde(default)]
  pub company:     Vec<RecordId>,
  #[serde(default)]
  pub consumables: Vec<RecordId>,
}

/// The concrete kind of an activity. The variant name is the activity's
/// discriminator and its timeline class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActivityKind {
  /// An activity that fits none of the specific kinds.
  #[default]
  Activity,
  BikeRide(BikeRide),
  SocialEvent(SocialEvent),
  DiningOut(DiningOut),
}

impl ActivityKind {
  pub fn model(&self) -> ModelType {
    match self {
      Self::Activity => ModelType::Activity,
      Self::BikeRide(_) => ModelType::BikeRide,
      Self::SocialEvent(_) => ModelType::SocialEvent,
      Self::DiningOut(_) => ModelType::DiningOut,
    }
  }

  pub fn name(&self) -> &'static str { self.model().name() }
}

/// Something you took part in, recorded against a diary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
  #[serde(flatten)]
  pub text:     SummaryAndNotes,
  #[serde(flatten)]
  pub rating:   Rateable,
  pub entry_id: RecordId,
  /// Hours.
  #[serde(default)]
  pub duration: Option<u32>,
  #[serde(default)]
  pub private:  bool,
  #[serde(default)]
  pub kind:     ActivityKind,
}

impl Record for Activity {
  const KIND: &'static str = "activity";
  const ORDER: NaturalOrder = NaturalOrder::Created;

  fn text(&self) -> &SummaryAndNotes { &self.text }

  fn owner(&self) -> Option<RecordId> { Some(self.entry_id) }

  fn discriminator(&self) -> Option<&'static str> { Some(self.kind.name()) }
}

// ─── Consumable ──────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::IntoStaticStr,
)]
pub enum ConsumableType {
  Liquor,
  Wine,
  Beer,
  Drugs,
  Chocolate,
  Candy,
  Food,
}

/// Liquor, beer, wine, chocolate and other foodstuffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumable {
  #[serde(flatten)]
  pub text:            SummaryAndNotes,
  #[serde(flatten)]
  pub rating:          Rateable,
  pub name:            String,
  #[serde(default)]
  pub location:        String,
  #[serde(default)]
  pub link:            String,
  #[serde(default)]
  pub referred_by:     Option<RecordId>,
  pub consumable_type: ConsumableType,
}

impl Record for Consumable {
  const KIND: &'static str = "consumable";

  fn text(&self) -> &SummaryAndNotes { &self.text }

  fn discriminator(&self) -> Option<&'static str> {
    Some(self.consumable_type.into())
  }
}

// ─── Media ───────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum BookType {
  Novel,
  #[strum(to_string = "Graphic Novel")]
  GraphicNovel,
  Comic,
  Magazine,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum BookGenre {
  #[strum(to_string = "Science Fiction")]
  SciFi,
  Fantasy,
  Superhero,
  #[strum(to_string = "Historical Fiction")]
  Historical,
  Experimental,
  Contemporary,
  #[strum(to_string = "Non-fiction")]
  NonFiction,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum MusicGenre {
  Metal,
  #[strum(to_string = "Indie Rock")]
  Indie,
  #[strum(to_string = "Post Rock")]
  PostRock,
  Classical,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum VideoType {
  Movie,
  #[strum(to_string = "TV Show")]
  TvShow,
  Episode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
  pub author:    String,
  pub book_type: BookType,
  pub genre:     BookGenre,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Music {
  pub artist: String,
  #[serde(default)]
  pub source: String,
  pub genre:  MusicGenre,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
  pub video_type: VideoType,
}

/// The concrete kind of a media item; the variant name is its discriminator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MediaKind {
  #[default]
  Media,
  Book(Book),
  Music(Music),
  Video(Video),
}

impl MediaKind {
  pub fn model(&self) -> ModelType {
    match self {
      Self::Media => ModelType::Media,
      Self::Book(_) => ModelType::Book,
      Self::Music(_) => ModelType::Music,
      Self::Video(_) => ModelType::Video,
    }
  }

  pub fn name(&self) -> &'static str { self.model().name() }
}

/// Media purchased or consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
  #[serde(flatten)]
  pub text:        SummaryAndNotes,
  #[serde(flatten)]
  pub rating:      Rateable,
  pub title:       String,
  #[serde(default)]
  pub link:        String,
  /// Year of publication or release.
  pub year:        i32,
  #[serde(default)]
  pub referred_by: Option<RecordId>,
  #[serde(default)]
  pub kind:        MediaKind,
}

impl Record for Media {
  const KIND: &'static str = "media";
  const ORDER: NaturalOrder = NaturalOrder::Created;

  fn text(&self) -> &SummaryAndNotes { &self.text }

  fn discriminator(&self) -> Option<&'static str> { Some(self.kind.name()) }
}

// ─── Medical observation ─────────────────────────────────────────────────────

/// What's going on with your body or mind, recorded against a diary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalObservation {
  #[serde(flatten)]
  pub text:     SummaryAndNotes,
  pub entry_id: RecordId,
}

impl Record for MedicalObservation {
  const KIND: &'static str = "medical_observation";

  fn text(&self) -> &SummaryAndNotes { &self.text }

  fn owner(&self) -> Option<RecordId> { Some(self.entry_id) }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// A significant point-in-time life event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
  #[serde(flatten)]
  pub text: SummaryAndNotes,
  pub date: NaiveDate,
  #[serde(default)]
  pub time: Option<chrono::NaiveTime>,
}

impl Record for Event {
  const KIND: &'static str = "event";

  fn text(&self) -> &SummaryAndNotes { &self.text }
}

// ─── Period ──────────────────────────────────────────────────────────────────

/// A stretch of life with possibly fuzzy edges. `latest_start` and
/// `earliest_end` narrow an uncertain `start` and `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
  #[serde(flatten)]
  pub text:         SummaryAndNotes,
  #[serde(default)]
  pub start:        DateTimeBound,
  #[serde(default)]
  pub latest_start: DateTimeBound,
  #[serde(default)]
  pub earliest_end: DateTimeBound,
  #[serde(default)]
  pub end:          DateTimeBound,
}

impl Record for Period {
  const KIND: &'static str = "period";

  fn text(&self) -> &SummaryAndNotes { &self.text }
}
