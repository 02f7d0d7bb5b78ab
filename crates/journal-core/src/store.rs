//! The `JournalStore` trait and the `Record` contract it stores.
//!
//! The trait is implemented by storage backends (e.g. `journal-store-sqlite`).
//! The projection, the detail dispatcher and the admin API depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

use crate::{RecordId, fields::SummaryAndNotes, record::Stored};

// ─── Record contract ─────────────────────────────────────────────────────────

/// The order in which a record kind is listed when nothing else is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaturalOrder {
  /// Insertion order.
  Id,
  /// Oldest `created` first.
  Created,
  /// Highest [`Record::sort_key`] first.
  SortKeyDescending,
}

/// A record type the store knows how to persist.
///
/// The store derives its bookkeeping columns (owner, discriminator, sort key)
/// from these methods on every write; callers never supply them.
pub trait Record:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  /// Storage kind; also the table-level namespace for ids.
  const KIND: &'static str;
  const ORDER: NaturalOrder = NaturalOrder::Id;

  /// Every record carries a summary line and free-form notes.
  fn text(&self) -> &SummaryAndNotes;

  /// The entry that owns this record, if any. Owned records cannot be written
  /// without their entry and are deleted with it.
  fn owner(&self) -> Option<RecordId> { None }

  /// Name of the concrete variant, for records with a closed set of kinds.
  fn discriminator(&self) -> Option<&'static str> { None }

  fn sort_key(&self) -> String { String::new() }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Backend error type. Owner checks happen inside the backend's write, so a
/// write rejected for a missing owning entry must be recognisable from the
/// error alone.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The missing entry id, when this error is an owner check failure.
  fn missing_owner(&self) -> Option<RecordId>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a journal store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait JournalStore: Send + Sync {
  type Error: StoreError;

  /// All records of kind `R` in their [`NaturalOrder`]. With `variant` set,
  /// only records whose discriminator equals it.
  fn list<R: Record>(
    &self,
    variant: Option<String>,
  ) -> impl Future<Output = Result<Vec<Stored<R>>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get<R: Record>(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<Stored<R>>, Self::Error>> + Send + '_;

  /// Persist a new record; the store assigns its id and timestamps.
  ///
  /// Returns an error whose [`StoreError::missing_owner`] is set if the
  /// record names an owning entry that does not exist.
  fn insert<R: Record>(
    &self,
    record: R,
  ) -> impl Future<Output = Result<Stored<R>, Self::Error>> + Send + '_;

  /// Replace the fields of an existing record, refreshing `modified`.
  /// Returns `None` if there is no record with that id.
  fn update<R: Record>(
    &self,
    id: RecordId,
    record: R,
  ) -> impl Future<Output = Result<Option<Stored<R>>, Self::Error>> + Send + '_;

  /// Delete a record and everything it owns. Returns `false` if not found.
  fn delete<R: Record>(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
