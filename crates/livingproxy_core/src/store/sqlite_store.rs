//! SQLite-backed genealogy store.
//!
//! # Responsibility
//! - Persist every record type as a JSON body keyed by handle.
//! - Maintain the `reference` table that answers backlink queries.
//! - Provide the write helpers used to populate a store; the read contract
//!   is [`GenealogyStore`].
//!
//! # Invariants
//! - `commit` replaces a record and its outgoing references atomically.
//! - Handle listings follow insertion order (`rowid`), so repeated scans
//!   of an unchanged store see the same sequence.
//! - Read paths reject undecodable bodies instead of skipping them.

use crate::db::migrations::ensure_migrated;
use crate::model::handle::{Handle, ObjectType};
use crate::model::record::Record;
use crate::store::{GenealogyStore, RecordCursor, StoreError, StoreResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

const DEFAULT_PERSON_KEY: &str = "default_person";

/// SQLite-backed genealogy store over a migrated connection.
pub struct SqliteGenealogyStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGenealogyStore<'conn> {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    ///
    /// # Errors
    /// - Returns an error when the connection schema is not fully migrated.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_migrated(conn)?;
        Ok(Self { conn })
    }

    /// Inserts or replaces one record and rewrites its outgoing references.
    pub fn commit(&self, record: impl Into<Record>) -> StoreResult<Handle> {
        let record = record.into();
        let kind = record.object_type();
        let handle = record.handle().clone();
        if handle.is_empty() {
            return Err(StoreError::InvalidData(format!(
                "cannot commit {kind} without a handle"
            )));
        }
        let body = record.to_json()?;
        let table = table_name(kind);
        // Blank IDs are stored as NULL so they never collide in the unique index.
        let gramps_id = record.gramps_id().filter(|value| !value.is_empty());

        let tx = self.conn.unchecked_transaction()?;
        if kind.has_gramps_id() {
            tx.execute(
                &format!(
                    "INSERT INTO {table} (handle, gramps_id, body, change)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(handle) DO UPDATE SET
                        gramps_id = excluded.gramps_id,
                        body = excluded.body,
                        change = excluded.change;"
                ),
                params![handle.as_str(), gramps_id, body, record.change()],
            )?;
        } else {
            tx.execute(
                &format!(
                    "INSERT INTO {table} (handle, body, change)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT(handle) DO UPDATE SET
                        body = excluded.body,
                        change = excluded.change;"
                ),
                params![handle.as_str(), body, record.change()],
            )?;
        }

        tx.execute(
            "DELETE FROM reference WHERE obj_handle = ?1;",
            [handle.as_str()],
        )?;
        for (ref_kind, ref_handle) in record.references() {
            tx.execute(
                "INSERT OR IGNORE INTO reference (obj_handle, obj_class, ref_handle, ref_class)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    handle.as_str(),
                    kind.as_str(),
                    ref_handle.as_str(),
                    ref_kind.as_str()
                ],
            )?;
        }
        tx.commit()?;

        debug!("event=record_commit module=store status=ok kind={kind} handle={handle}");
        Ok(handle)
    }

    /// Marks `handle` as the home person.
    pub fn set_default_person(&self, handle: &Handle) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO metadata (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![DEFAULT_PERSON_KEY, handle.as_str()],
        )?;
        Ok(())
    }
}

impl GenealogyStore for SqliteGenealogyStore<'_> {
    fn get_record(&self, kind: ObjectType, handle: &Handle) -> StoreResult<Option<Record>> {
        let body: Option<String> = self
            .conn
            .query_row(
                &format!("SELECT body FROM {} WHERE handle = ?1;", table_name(kind)),
                [handle.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        body.map(|value| decode_record(kind, &value)).transpose()
    }

    fn get_record_from_gramps_id(
        &self,
        kind: ObjectType,
        gramps_id: &str,
    ) -> StoreResult<Option<Record>> {
        if !kind.has_gramps_id() {
            return Ok(None);
        }
        let body: Option<String> = self
            .conn
            .query_row(
                &format!(
                    "SELECT body FROM {} WHERE gramps_id = ?1;",
                    table_name(kind)
                ),
                [gramps_id],
                |row| row.get(0),
            )
            .optional()?;
        body.map(|value| decode_record(kind, &value)).transpose()
    }

    fn record_handles(&self, kind: ObjectType) -> StoreResult<Vec<Handle>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT handle FROM {} ORDER BY rowid ASC;",
            table_name(kind)
        ))?;
        let mut rows = stmt.query([])?;
        let mut handles = Vec::new();
        while let Some(row) = rows.next()? {
            let value: String = row.get(0)?;
            handles.push(Handle::new(value));
        }
        Ok(handles)
    }

    fn iter_records(&self, kind: ObjectType) -> StoreResult<RecordCursor<'_>> {
        let handles = self.record_handles(kind)?;
        Ok(Box::new(handles.into_iter().filter_map(move |handle| {
            self.get_record(kind, &handle).transpose()
        })))
    }

    fn find_backlink_handles(
        &self,
        handle: &Handle,
        include: Option<&[ObjectType]>,
    ) -> StoreResult<Vec<(ObjectType, Handle)>> {
        let mut stmt = self.conn.prepare(
            "SELECT obj_class, obj_handle
             FROM reference
             WHERE ref_handle = ?1
             ORDER BY obj_class ASC, obj_handle ASC;",
        )?;
        let mut rows = stmt.query([handle.as_str()])?;
        let mut links = Vec::new();
        while let Some(row) = rows.next()? {
            let class_text: String = row.get(0)?;
            let kind = class_text.parse::<ObjectType>().map_err(|err| {
                StoreError::InvalidData(format!("{err} in reference.obj_class"))
            })?;
            if include.is_some_and(|kinds| !kinds.contains(&kind)) {
                continue;
            }
            let obj_handle: String = row.get(1)?;
            links.push((kind, Handle::new(obj_handle)));
        }
        Ok(links)
    }

    fn get_default_handle(&self) -> StoreResult<Option<Handle>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM metadata WHERE key = ?1;",
                [DEFAULT_PERSON_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.filter(|text| !text.is_empty()).map(Handle::new))
    }

    fn unfiltered(&self) -> &dyn GenealogyStore {
        self
    }
}

fn table_name(kind: ObjectType) -> &'static str {
    match kind {
        ObjectType::Person => "person",
        ObjectType::Family => "family",
        ObjectType::Source => "source",
        ObjectType::Citation => "citation",
        ObjectType::Event => "event",
        ObjectType::Media => "media",
        ObjectType::Place => "place",
        ObjectType::Repository => "repository",
        ObjectType::Note => "note",
        ObjectType::Tag => "tag",
    }
}

fn decode_record(kind: ObjectType, body: &str) -> StoreResult<Record> {
    let record = Record::from_json(kind, body)?;
    if record.handle().is_empty() {
        return Err(StoreError::InvalidData(format!(
            "{kind} body without handle in table `{}`",
            table_name(kind)
        )));
    }
    Ok(record)
}
