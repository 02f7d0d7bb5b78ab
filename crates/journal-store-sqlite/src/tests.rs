//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use journal_core::{
  Error as CoreError,
  detail::{DetailRecord, ModelType, lookup},
  fields::{DateTimeBound, Rateable, Rating, SummaryAndNotes},
  projection::{LineType, PrivacyPolicy, project},
  record::{
    Activity, ActivityKind, BikeRide, Entry, Event, MedicalObservation, Mood,
    Period, Person, Relation, SocialEvent,
  },
  store::{JournalStore, StoreError},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

fn entry(summary: &str, on: &str) -> Entry {
  Entry {
    text:        SummaryAndNotes::new(summary),
    date:        date(on),
    mood:        Mood::Good,
    user:        "dirk".into(),
    media:       vec![],
    consumables: vec![],
  }
}

fn activity(entry_id: i64, summary: &str, kind: ActivityKind) -> Activity {
  Activity {
    text: SummaryAndNotes::new(summary),
    rating: Rateable::new(Rating::Great),
    entry_id,
    duration: Some(3),
    private: false,
    kind,
  }
}

fn ride() -> ActivityKind {
  ActivityKind::BikeRide(BikeRide {
    distance:      60,
    average_speed: 14.2,
    climbing:      4400,
    solo:          false,
  })
}

fn observation(entry_id: i64) -> MedicalObservation {
  MedicalObservation { text: SummaryAndNotes::new("Sore knee"), entry_id }
}

// ─── Basic CRUD ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_entry() {
  let s = store().await;

  let stored = s.insert(entry("Long day", "2010-07-05")).await.unwrap();
  assert_eq!(stored.id, 1);
  assert_eq!(stored.stamps.created, stored.stamps.modified);

  let fetched = s.get::<Entry>(stored.id).await.unwrap().unwrap();
  assert_eq!(fetched, stored);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get::<Entry>(42).await.unwrap().is_none());
}

#[tokio::test]
async fn ids_are_allocated_per_kind() {
  let s = store().await;
  let e = s.insert(entry("One", "2010-01-01")).await.unwrap();
  let event = s
    .insert(Event {
      text: SummaryAndNotes::new("Moved"),
      date: date("2009-05-01"),
      time: None,
    })
    .await
    .unwrap();
  let e2 = s.insert(entry("Two", "2010-01-02")).await.unwrap();

  assert_eq!(e.id, 1);
  assert_eq!(event.id, 1);
  assert_eq!(e2.id, 2);
}

#[tokio::test]
async fn entries_list_newest_date_first() {
  let s = store().await;
  s.insert(entry("Middle", "2010-06-01")).await.unwrap();
  s.insert(entry("Oldest", "2009-01-01")).await.unwrap();
  s.insert(entry("Newest", "2011-12-31")).await.unwrap();

  let listed = s.list::<Entry>(None).await.unwrap();
  let summaries: Vec<&str> =
    listed.iter().map(|e| e.record.text.summary.as_str()).collect();
  assert_eq!(summaries, ["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn update_keeps_created_and_refreshes_modified() {
  let s = store().await;
  let stored = s.insert(entry("Draft", "2010-07-05")).await.unwrap();

  let mut edited = stored.record.clone();
  edited.text.summary = "Final".into();
  edited.mood = Mood::Happy;
  let updated = s.update(stored.id, edited).await.unwrap().unwrap();

  assert_eq!(updated.stamps.created, stored.stamps.created);
  assert!(updated.stamps.modified >= stored.stamps.modified);

  let fetched = s.get::<Entry>(stored.id).await.unwrap().unwrap();
  assert_eq!(fetched.record.text.summary, "Final");
  assert_eq!(fetched.record.mood, Mood::Happy);
  assert_eq!(fetched.stamps, updated.stamps);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let result = s.update(7, entry("Nowhere", "2010-01-01")).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_reports_whether_anything_was_removed() {
  let s = store().await;
  let p = s
    .insert(Person {
      text:     SummaryAndNotes::new("Neighbour"),
      name:     "Ana".into(),
      relation: Relation::Acquaintance,
      met:      date("2008-08-08"),
    })
    .await
    .unwrap();

  assert!(s.delete::<Person>(p.id).await.unwrap());
  assert!(!s.delete::<Person>(p.id).await.unwrap());
  assert!(s.get::<Person>(p.id).await.unwrap().is_none());
}

// ─── Ownership ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn owned_record_requires_existing_entry() {
  let s = store().await;
  let err = s.insert(activity(99, "Orphan", ride())).await.unwrap_err();
  assert!(matches!(
    err,
    Error::OwnerNotFound { kind: "activity", entry_id: 99 }
  ));
  assert_eq!(err.missing_owner(), Some(99));
  assert!(s.list::<Activity>(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_cannot_move_record_to_missing_entry() {
  let s = store().await;
  let e = s.insert(entry("Day", "2010-07-05")).await.unwrap();
  let obs = s.insert(observation(e.id)).await.unwrap();

  let err = s.update(obs.id, observation(12)).await.unwrap_err();
  assert!(matches!(err, Error::OwnerNotFound { entry_id: 12, .. }));
  assert_eq!(err.missing_owner(), Some(12));
}

#[tokio::test]
async fn deleting_entry_deletes_what_it_owns() {
  let s = store().await;
  let keep = s.insert(entry("Keep", "2010-01-01")).await.unwrap();
  let doomed = s.insert(entry("Doomed", "2010-01-02")).await.unwrap();

  s.insert(activity(doomed.id, "Ride", ride())).await.unwrap();
  s.insert(observation(doomed.id)).await.unwrap();
  let kept = s.insert(activity(keep.id, "Walk", ActivityKind::Activity)).await.unwrap();

  assert!(s.delete::<Entry>(doomed.id).await.unwrap());

  let activities = s.list::<Activity>(None).await.unwrap();
  assert_eq!(activities.len(), 1);
  assert_eq!(activities[0].id, kept.id);
  assert!(s.list::<MedicalObservation>(None).await.unwrap().is_empty());
}

// ─── Variants ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn variant_filter_follows_resaved_kind() {
  let s = store().await;
  let e = s.insert(entry("Day", "2010-07-05")).await.unwrap();
  let a = s.insert(activity(e.id, "Loop", ride())).await.unwrap();
  s.insert(activity(e.id, "Reading", ActivityKind::Activity)).await.unwrap();

  let rides = s.list::<Activity>(Some("BikeRide".into())).await.unwrap();
  assert_eq!(rides.len(), 1);
  assert_eq!(rides[0].record.kind.name(), "BikeRide");

  // Re-saving without changing the kind keeps the discriminator.
  s.update(a.id, a.record.clone()).await.unwrap().unwrap();
  let fetched = s.get::<Activity>(a.id).await.unwrap().unwrap();
  assert_eq!(fetched.record.kind.name(), "BikeRide");
  assert_eq!(s.list::<Activity>(Some("BikeRide".into())).await.unwrap().len(), 1);

  let mut party = a.record.clone();
  party.kind = ActivityKind::SocialEvent(SocialEvent::default());
  s.update(a.id, party).await.unwrap().unwrap();
  assert!(s.list::<Activity>(Some("BikeRide".into())).await.unwrap().is_empty());
  assert_eq!(
    s.list::<Activity>(Some("SocialEvent".into())).await.unwrap().len(),
    1
  );
  assert_eq!(s.list::<Activity>(None).await.unwrap().len(), 2);

  // The diary classifies the point by its new kind too.
  let diary = project(&s, LineType::Diary, PrivacyPolicy::ShowPrivate)
    .await
    .unwrap();
  let loop_point = diary
    .events
    .iter()
    .find(|p| p.title.ends_with("Loop"))
    .unwrap();
  assert_eq!(loop_point.id, a.id.to_string());
  assert_eq!(loop_point.classname, "SocialEvent");
  assert_eq!(loop_point.title, "SocialEvent: Loop");
  assert!(diary.events.iter().all(|p| p.classname != "BikeRide"));
}

// ─── Projection ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn life_line_gathers_events_periods_and_people() {
  let s = store().await;
  s.insert(Event {
    text: SummaryAndNotes::new("Graduated"),
    date: date("2001-06-10"),
    time: None,
  })
  .await
  .unwrap();
  s.insert(Period {
    text:         SummaryAndNotes::new("Lived in Boston"),
    start:        DateTimeBound::on(date("2010-01-01")),
    latest_start: DateTimeBound::default(),
    earliest_end: DateTimeBound::on(date("2012-06-01")),
    end:          DateTimeBound::default(),
  })
  .await
  .unwrap();
  s.insert(Person {
    text:     SummaryAndNotes::new("Roommate"),
    name:     "Sam".into(),
    relation: Relation::Friend,
    met:      date("1999-09-01"),
  })
  .await
  .unwrap();
  // Diary-only records stay off the life line.
  s.insert(entry("Day", "2010-07-05")).await.unwrap();

  let envelope = project(&s, LineType::Life, PrivacyPolicy::ShowPrivate)
    .await
    .unwrap();
  let classes: Vec<&str> =
    envelope.events.iter().map(|p| p.classname.as_str()).collect();
  assert_eq!(classes, ["Event", "Period", "Person"]);

  let period = &envelope.events[1];
  assert!(period.duration_event);
  assert_eq!(period.end.as_deref(), Some("2100-01-01"));
  assert_eq!(period.earliest_end.as_deref(), Some("2012-06-01"));
}

#[tokio::test]
async fn diary_line_gathers_activities_entries_and_observations() {
  let s = store().await;
  let e = s.insert(entry("Long day", "2010-07-05")).await.unwrap();
  s.insert(activity(e.id, "Up Mt. Hamilton", ride())).await.unwrap();
  s.insert(observation(e.id)).await.unwrap();
  s.insert(Person {
    text:     SummaryAndNotes::new("Roommate"),
    name:     "Sam".into(),
    relation: Relation::Friend,
    met:      date("1999-09-01"),
  })
  .await
  .unwrap();

  let envelope = project(&s, LineType::Diary, PrivacyPolicy::default())
    .await
    .unwrap();
  assert_eq!(envelope.date_time_format, "iso8601");

  let classes: Vec<&str> =
    envelope.events.iter().map(|p| p.classname.as_str()).collect();
  assert_eq!(classes, ["BikeRide", "Entry", "MedicalObservation"]);
  assert_eq!(envelope.events[0].title, "BikeRide: Up Mt. Hamilton");
  assert!(envelope.events.iter().all(|p| p.start == "2010-07-05"));
}

#[tokio::test]
async fn hide_private_drops_private_activities() {
  let s = store().await;
  let e = s.insert(entry("Day", "2010-07-05")).await.unwrap();
  let mut secret = activity(e.id, "Secret", ActivityKind::Activity);
  secret.private = true;
  s.insert(secret).await.unwrap();
  s.insert(activity(e.id, "Public", ActivityKind::Activity)).await.unwrap();

  let shown = project(&s, LineType::Diary, PrivacyPolicy::ShowPrivate)
    .await
    .unwrap();
  assert_eq!(shown.events.len(), 3);

  let hidden = project(&s, LineType::Diary, PrivacyPolicy::HidePrivate)
    .await
    .unwrap();
  let titles: Vec<&str> = hidden.events.iter().map(|p| p.title.as_str()).collect();
  assert_eq!(titles, ["Activity: Public", "Day"]);
}

#[tokio::test]
async fn empty_store_projects_empty_lines() {
  let s = store().await;
  for line in [LineType::Life, LineType::Diary] {
    let envelope = project(&s, line, PrivacyPolicy::default()).await.unwrap();
    assert!(envelope.events.is_empty());
  }
}

// ─── Detail lookup ───────────────────────────────────────────────────────────

#[tokio::test]
async fn lookup_resolves_activity_subtype_with_its_entry() {
  let s = store().await;
  let e = s.insert(entry("Day", "2010-07-05")).await.unwrap();
  let a = s.insert(activity(e.id, "Loop", ride())).await.unwrap();

  let detail = lookup(&s, "BikeRide", a.id).await.unwrap();
  assert_eq!(detail.model, ModelType::BikeRide);
  match detail.record {
    DetailRecord::Activity(found, owner) => {
      assert_eq!(found.id, a.id);
      assert_eq!(owner.id, e.id);
    }
    other => panic!("unexpected detail: {other:?}"),
  }

  // The base name matches any activity.
  assert!(lookup(&s, "Activity", a.id).await.is_ok());
}

#[tokio::test]
async fn lookup_rejects_mismatched_subtype() {
  let s = store().await;
  let e = s.insert(entry("Day", "2010-07-05")).await.unwrap();
  let a = s.insert(activity(e.id, "Loop", ride())).await.unwrap();

  let err = lookup(&s, "SocialEvent", a.id).await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound { model: "SocialEvent", .. }));
}

#[tokio::test]
async fn lookup_errors() {
  let s = store().await;
  s.insert(entry("Day", "2010-07-05")).await.unwrap();

  assert!(matches!(
    lookup(&s, "Nonexistent", 1).await,
    Err(CoreError::UnsupportedType(_))
  ));
  assert!(matches!(
    lookup(&s, "Book", 1).await,
    Err(CoreError::UnsupportedType(_))
  ));
  assert!(matches!(
    lookup(&s, "Entry", 999).await,
    Err(CoreError::NotFound { id: 999, .. })
  ));
  assert!(matches!(
    lookup(&s, "Entry", 1).await.map(|d| d.record),
    Ok(DetailRecord::Entry(_))
  ));
}
