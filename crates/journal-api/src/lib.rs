//! JSON admin API for the journal.
//!
//! Exposes an axum [`Router`] backed by any [`journal_core::store::JournalStore`]
//! with create, read, update and delete routes for every record type.
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/admin", journal_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod records;

use std::sync::Arc;

use axum::{Router, routing::get};
use journal_core::{
  record::{
    Activity, Consumable, Entry, Event, Media, MedicalObservation, Period,
    Person,
  },
  store::{JournalStore, Record},
};

pub use error::ApiError;

/// Build a fully-materialised admin router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: JournalStore + 'static,
{
  let router = Router::new();
  let router = resource::<S, Entry>(router, "/entries");
  let router = resource::<S, Person>(router, "/people");
  let router = resource::<S, Activity>(router, "/activities");
  let router = resource::<S, Consumable>(router, "/consumables");
  let router = resource::<S, Media>(router, "/media");
  let router = resource::<S, MedicalObservation>(router, "/observations");
  let router = resource::<S, Event>(router, "/events");
  let router = resource::<S, Period>(router, "/periods");
  router.with_state(store)
}

/// Mount the collection and item routes for one record type at `path`.
fn resource<S, R>(router: Router<Arc<S>>, path: &str) -> Router<Arc<S>>
where
  S: JournalStore + 'static,
  R: Record,
{
  router
    .route(path, get(records::list::<S, R>).post(records::create::<S, R>))
    .route(
      &format!("{path}/{{id}}"),
      get(records::get_one::<S, R>)
        .put(records::update::<S, R>)
        .delete(records::delete::<S, R>),
    )
}
