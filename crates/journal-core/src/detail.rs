//! Detail dispatch: resolve a type name and id, as found in a timeline point's
//! `classname` and `id`, to the stored record it came from.

use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::{
  Error, RecordId, Result,
  record::{
    Activity, Entry, Event, MedicalObservation, Period, Person, Stored,
  },
  store::{JournalStore, Record},
};

// ─── Model types ─────────────────────────────────────────────────────────────

/// Every record type the journal knows about, by its public name.
///
/// Names parse case-sensitively, exactly as written here.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  EnumString,
  IntoStaticStr,
  EnumIter,
  strum::Display,
)]
pub enum ModelType {
  Entry,
  Person,
  Activity,
  BikeRide,
  SocialEvent,
  DiningOut,
  Consumable,
  Media,
  Book,
  Music,
  Video,
  MedicalObservation,
  Event,
  Period,
}

impl ModelType {
  pub fn name(self) -> &'static str { self.into() }

  /// Whether records of this type project onto a timeline.
  pub fn supports_timeline(self) -> bool {
    !matches!(
      self,
      Self::Consumable | Self::Media | Self::Book | Self::Music | Self::Video
    )
  }

  /// Resolve a type name for detail display.
  ///
  /// Unknown names and types without a timeline form are both
  /// [`Error::UnsupportedType`].
  pub fn resolve(name: &str) -> Result<Self> {
    name
      .parse::<Self>()
      .ok()
      .filter(|m| m.supports_timeline())
      .ok_or_else(|| Error::UnsupportedType(name.to_owned()))
  }

  fn is_activity(self) -> bool {
    matches!(
      self,
      Self::Activity | Self::BikeRide | Self::SocialEvent | Self::DiningOut
    )
  }
}

// ─── Resolved records ────────────────────────────────────────────────────────

/// A resolved record, ready for its detail template.
#[derive(Debug, Clone)]
pub enum DetailRecord {
  Entry(Stored<Entry>),
  Person(Stored<Person>),
  /// The activity together with the entry it was recorded against.
  Activity(Stored<Activity>, Stored<Entry>),
  MedicalObservation(Stored<MedicalObservation>, Stored<Entry>),
  Event(Stored<Event>),
  Period(Stored<Period>),
}

#[derive(Debug, Clone)]
pub struct Detail {
  /// The type that was asked for; picks the template.
  pub model:  ModelType,
  pub record: DetailRecord,
}

/// Look up the record named by `type_name` and `id`.
///
/// Activity subtypes only match activities of that kind; `Activity` matches
/// any activity.
pub async fn lookup<S: JournalStore>(
  store: &S,
  type_name: &str,
  id: RecordId,
) -> Result<Detail> {
  let model = ModelType::resolve(type_name)?;
  let not_found = || Error::NotFound { model: model.name(), id };

  let record = match model {
    ModelType::Entry => {
      DetailRecord::Entry(fetch(store, id).await?.ok_or_else(not_found)?)
    }
    ModelType::Person => {
      DetailRecord::Person(fetch(store, id).await?.ok_or_else(not_found)?)
    }
    m if m.is_activity() => {
      let activity: Stored<Activity> = fetch(store, id)
        .await?
        .filter(|a: &Stored<Activity>| {
          m == ModelType::Activity || a.record.kind.model() == m
        })
        .ok_or_else(not_found)?;
      let entry = owning_entry(store, &activity).await?;
      DetailRecord::Activity(activity, entry)
    }
    ModelType::MedicalObservation => {
      let obs: Stored<MedicalObservation> =
        fetch(store, id).await?.ok_or_else(not_found)?;
      let entry = owning_entry(store, &obs).await?;
      DetailRecord::MedicalObservation(obs, entry)
    }
    ModelType::Event => {
      DetailRecord::Event(fetch(store, id).await?.ok_or_else(not_found)?)
    }
    ModelType::Period => {
      DetailRecord::Period(fetch(store, id).await?.ok_or_else(not_found)?)
    }
    other => return Err(Error::UnsupportedType(other.name().to_owned())),
  };

  Ok(Detail { model, record })
}

async fn fetch<S: JournalStore, R: Record>(
  store: &S,
  id: RecordId,
) -> Result<Option<Stored<R>>> {
  store.get::<R>(id).await.map_err(Error::store)
}

async fn owning_entry<S: JournalStore, R: Record>(
  store: &S,
  stored: &Stored<R>,
) -> Result<Stored<Entry>> {
  let entry_id = stored.record.owner().unwrap_or_default();
  fetch::<S, Entry>(store, entry_id)
    .await?
    .ok_or(Error::MissingOwner { kind: R::KIND, id: stored.id, entry_id })
}
