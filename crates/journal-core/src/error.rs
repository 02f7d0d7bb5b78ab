//! Error types for `journal-core`.

use thiserror::Error;

use crate::RecordId;

#[derive(Debug, Error)]
pub enum Error {
  /// A detail request named a type that is unknown or has no timeline form.
  #[error("unsupported model type: {0:?}")]
  UnsupportedType(String),

  #[error("{model} {id} not found")]
  NotFound { model: &'static str, id: RecordId },

  #[error("{kind} {id} refers to missing entry {entry_id}")]
  MissingOwner {
    kind:     &'static str,
    id:       RecordId,
    entry_id: RecordId,
  },

  #[error("rating out of range: {0}")]
  InvalidRating(u8),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error; used as `.map_err(Error::store)`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
