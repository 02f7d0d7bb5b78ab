//! Generic CRUD handlers, instantiated once per record type.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/{kind}`      | Natural order; optional `?type=<variant>` |
//! | `POST`   | `/{kind}`      | Body: the record; returns 201 + stored record |
//! | `GET`    | `/{kind}/{id}` | 404 if not found |
//! | `PUT`    | `/{kind}/{id}` | Body: the record; 404 if not found |
//! | `DELETE` | `/{kind}/{id}` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use journal_core::{
  RecordId,
  fields::SUMMARY_MAX_LEN,
  record::Stored,
  store::{JournalStore, Record, StoreError},
};
use serde::Deserialize;

use crate::error::ApiError;

fn not_found<R: Record>(id: RecordId) -> ApiError {
  ApiError::NotFound(format!("{} {id} not found", R::KIND))
}

/// Reject a summary the store should never see.
fn validate<R: Record>(record: &R) -> Result<(), ApiError> {
  if !record.text().is_valid() {
    return Err(ApiError::BadRequest(format!(
      "summary must be between 1 and {SUMMARY_MAX_LEN} characters"
    )));
  }
  Ok(())
}

/// Map a failed write. The store checks the owning entry inside the write
/// itself, so a missing entry is a client error rather than a store failure.
fn write_error<R: Record, E: StoreError>(err: E) -> ApiError {
  match err.missing_owner() {
    Some(entry_id) => {
      tracing::debug!(kind = R::KIND, entry_id, "rejected write: no such entry");
      ApiError::BadRequest(format!("entry {entry_id} does not exist"))
    }
    None => ApiError::store(err),
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Restrict to records of this concrete variant (e.g. `"BikeRide"`).
  #[serde(rename = "type")]
  pub variant: Option<String>,
}

/// `GET /{kind}[?type=<variant>]`
pub async fn list<S, R>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Stored<R>>>, ApiError>
where
  S: JournalStore,
  R: Record,
{
  let records = store
    .list::<R>(params.variant)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(records))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /{kind}`
pub async fn create<S, R>(
  State(store): State<Arc<S>>,
  Json(record): Json<R>,
) -> Result<impl IntoResponse, ApiError>
where
  S: JournalStore,
  R: Record,
{
  validate(&record)?;
  let stored = store.insert(record).await.map_err(write_error::<R, _>)?;
  tracing::info!(kind = R::KIND, id = stored.id, "created record");
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /{kind}/{id}`
pub async fn get_one<S, R>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<Stored<R>>, ApiError>
where
  S: JournalStore,
  R: Record,
{
  let stored = store
    .get::<R>(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found::<R>(id))?;
  Ok(Json(stored))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /{kind}/{id}`
pub async fn update<S, R>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
  Json(record): Json<R>,
) -> Result<Json<Stored<R>>, ApiError>
where
  S: JournalStore,
  R: Record,
{
  validate(&record)?;
  let stored = store
    .update(id, record)
    .await
    .map_err(write_error::<R, _>)?
    .ok_or_else(|| not_found::<R>(id))?;
  tracing::info!(kind = R::KIND, id, "updated record");
  Ok(Json(stored))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /{kind}/{id}`
pub async fn delete<S, R>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError>
where
  S: JournalStore,
  R: Record,
{
  if store.delete::<R>(id).await.map_err(ApiError::store)? {
    tracing::info!(kind = R::KIND, id, "deleted record");
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(not_found::<R>(id))
  }
}
