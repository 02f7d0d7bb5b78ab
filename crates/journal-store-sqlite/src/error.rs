//! Error type for `journal-store-sqlite`.

use journal_core::{RecordId, store::StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A write named an owning entry that does not exist.
  #[error("{kind} refers to missing entry {entry_id}")]
  OwnerNotFound {
    kind:     &'static str,
    entry_id: RecordId,
  },
}

impl StoreError for Error {
  fn missing_owner(&self) -> Option<RecordId> {
    match self {
      Self::OwnerNotFound { entry_id, .. } => Some(*entry_id),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
