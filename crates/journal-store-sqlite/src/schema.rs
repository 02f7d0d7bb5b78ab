//! SQL schema for the journal SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Every record kind shares this table. The record's own fields live in
-- body_json; the other columns are derived on each write.
CREATE TABLE IF NOT EXISTS records (
    kind          TEXT    NOT NULL,   -- Record::KIND, e.g. 'entry', 'activity'
    id            INTEGER NOT NULL,   -- per-kind, ascending from 1
    owner_id      INTEGER,            -- owning entry id, for owned kinds
    discriminator TEXT,               -- concrete variant name, e.g. 'BikeRide'
    sort_key      TEXT    NOT NULL DEFAULT '',
    created       TEXT    NOT NULL,   -- RFC 3339 UTC, fixed microseconds
    modified      TEXT    NOT NULL,   -- RFC 3339 UTC, fixed microseconds
    body_json     TEXT    NOT NULL,
    PRIMARY KEY (kind, id)
);

CREATE INDEX IF NOT EXISTS records_created_idx  ON records(kind, created);
CREATE INDEX IF NOT EXISTS records_modified_idx ON records(kind, modified);
CREATE INDEX IF NOT EXISTS records_owner_idx    ON records(owner_id);
CREATE INDEX IF NOT EXISTS records_variant_idx  ON records(kind, discriminator);

PRAGMA user_version = 1;
";
