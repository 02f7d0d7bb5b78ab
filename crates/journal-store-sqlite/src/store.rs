//! [`SqliteStore`], the SQLite implementation of [`JournalStore`].

use std::path::Path;

use journal_core::{
  RecordId,
  fields::Timestamps,
  record::{Entry, Stored},
  store::{JournalStore, NaturalOrder, Record},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawRecord, decode_dt, encode_body, encode_dt, now_micros},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A journal store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Result of an update closure, resolved into an error outside the
/// connection thread.
enum UpdateOutcome {
  Written { created: String },
  RecordMissing,
  OwnerMissing(RecordId),
}

/// Derived columns for one record, computed before handing off to the
/// connection thread.
struct Columns {
  kind:          &'static str,
  owner_id:      Option<RecordId>,
  discriminator: Option<&'static str>,
  sort_key:      String,
  body_json:     String,
}

impl Columns {
  fn of<R: Record>(record: &R) -> Result<Self> {
    Ok(Self {
      kind:          R::KIND,
      owner_id:      record.owner(),
      discriminator: record.discriminator(),
      sort_key:      record.sort_key(),
      body_json:     encode_body(record)?,
    })
  }
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn order_by(order: NaturalOrder) -> &'static str {
  match order {
    NaturalOrder::Id => "id",
    NaturalOrder::Created => "created, id",
    NaturalOrder::SortKeyDescending => "sort_key DESC, id",
  }
}

fn entry_exists(conn: &rusqlite::Connection, id: RecordId) -> rusqlite::Result<bool> {
  Ok(conn
    .query_row(
      "SELECT 1 FROM records WHERE kind = ?1 AND id = ?2",
      rusqlite::params![Entry::KIND, id],
      |_| Ok(true),
    )
    .optional()?
    .unwrap_or(false))
}

// ─── JournalStore impl ───────────────────────────────────────────────────────

impl JournalStore for SqliteStore {
  type Error = Error;

  async fn list<R: Record>(&self, variant: Option<String>) -> Result<Vec<Stored<R>>> {
    let kind = R::KIND;
    let sql = format!(
      "SELECT id, created, modified, body_json
       FROM records
       WHERE kind = ?1
         AND (?2 IS NULL OR discriminator = ?2)
       ORDER BY {}",
      order_by(R::ORDER),
    );

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![kind, variant], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_stored).collect()
  }

  async fn get<R: Record>(&self, id: RecordId) -> Result<Option<Stored<R>>> {
    let kind = R::KIND;

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, created, modified, body_json
             FROM records WHERE kind = ?1 AND id = ?2",
            rusqlite::params![kind, id],
            RawRecord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRecord::into_stored).transpose()
  }

  async fn insert<R: Record>(&self, record: R) -> Result<Stored<R>> {
    let cols     = Columns::of(&record)?;
    let owner_id = cols.owner_id;
    let now      = now_micros();
    let stamps   = Timestamps { created: now, modified: now };
    let at_str   = encode_dt(now);

    // `None` means the owning entry is missing.
    let id: Option<RecordId> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if let Some(owner) = cols.owner_id
          && !entry_exists(&tx, owner)?
        {
          return Ok(None);
        }

        let id: RecordId = tx.query_row(
          "SELECT COALESCE(MAX(id), 0) + 1 FROM records WHERE kind = ?1",
          rusqlite::params![cols.kind],
          |r| r.get(0),
        )?;

        tx.execute(
          "INSERT INTO records (
             kind, id, owner_id, discriminator, sort_key,
             created, modified, body_json
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, ?7)",
          rusqlite::params![
            cols.kind,
            id,
            cols.owner_id,
            cols.discriminator,
            cols.sort_key,
            at_str,
            cols.body_json,
          ],
        )?;
        tx.commit()?;
        Ok(Some(id))
      })
      .await?;

    let id = id.ok_or(Error::OwnerNotFound {
      kind:     R::KIND,
      entry_id: owner_id.unwrap_or_default(),
    })?;
    Ok(Stored { id, stamps, record })
  }

  async fn update<R: Record>(
    &self,
    id:     RecordId,
    record: R,
  ) -> Result<Option<Stored<R>>> {
    let cols     = Columns::of(&record)?;
    let modified = now_micros();
    let mod_str  = encode_dt(modified);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let created: Option<String> = tx
          .query_row(
            "SELECT created FROM records WHERE kind = ?1 AND id = ?2",
            rusqlite::params![cols.kind, id],
            |r| r.get(0),
          )
          .optional()?;
        let Some(created) = created else {
          return Ok(UpdateOutcome::RecordMissing);
        };
        if let Some(owner) = cols.owner_id
          && !entry_exists(&tx, owner)?
        {
          return Ok(UpdateOutcome::OwnerMissing(owner));
        }

        tx.execute(
          "UPDATE records
           SET owner_id = ?3, discriminator = ?4, sort_key = ?5,
               modified = ?6, body_json = ?7
           WHERE kind = ?1 AND id = ?2",
          rusqlite::params![
            cols.kind,
            id,
            cols.owner_id,
            cols.discriminator,
            cols.sort_key,
            mod_str,
            cols.body_json,
          ],
        )?;
        tx.commit()?;
        Ok(UpdateOutcome::Written { created })
      })
      .await?;

    match outcome {
      UpdateOutcome::Written { created } => Ok(Some(Stored {
        id,
        stamps: Timestamps { created: decode_dt(&created)?, modified },
        record,
      })),
      UpdateOutcome::RecordMissing => Ok(None),
      UpdateOutcome::OwnerMissing(entry_id) => {
        Err(Error::OwnerNotFound { kind: R::KIND, entry_id })
      }
    }
  }

  async fn delete<R: Record>(&self, id: RecordId) -> Result<bool> {
    let kind = R::KIND;

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "DELETE FROM records WHERE kind = ?1 AND id = ?2",
          rusqlite::params![kind, id],
        )?;
        // Owned records always belong to an entry.
        if n > 0 && kind == Entry::KIND {
          tx.execute(
            "DELETE FROM records WHERE owner_id = ?1",
            rusqlite::params![id],
          )?;
        }
        tx.commit()?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }
}
