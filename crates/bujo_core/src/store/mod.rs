//! Document store access over the canonical `documents` table.
//!
//! # Responsibility
//! - Provide generic create/read/replace/delete and id-set lookups for
//!   collection-scoped JSON documents.
//! - Own identifier generation and the `created_at`/`updated_at` columns.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Identifiers are opaque 24-hex-character strings, assigned on insert and
//!   never reused for another document in the same collection.
//! - Timestamps are store-owned epoch milliseconds; callers cannot set them.
//! - Malformed persisted documents surface as `StoreError::Corrupt`, never as
//!   silently skipped rows.

use crate::db::DbError;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer fault. Not user-fixable.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode {
        collection: Collection,
        details: String,
    },
    Corrupt {
        collection: Collection,
        id: DocId,
        details: String,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode {
                collection,
                details,
            } => write!(f, "failed to encode {collection} document: {details}"),
            Self::Corrupt {
                collection,
                id,
                details,
            } => write!(f, "corrupt {collection} document `{id}`: {details}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode { .. } | Self::Corrupt { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Resource collections known to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Tasks,
    Projects,
    Habits,
    Expenses,
}

impl Collection {
    /// Collection name used as the id namespace in storage.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Projects => "projects",
            Self::Habits => "habits",
            Self::Expenses => "expenses",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque store-assigned document identifier.
///
/// Generated ids are 24 hex characters. Inbound ids are accepted verbatim:
/// an identifier-shaped string that matches no record is a lookup miss, not
/// a format error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Assigns a fresh 24-hex-character identifier.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(hex[..24].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DocId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for DocId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted document together with its store-owned envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    pub id: DocId,
    /// Epoch milliseconds, set once on insert.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed on every replace.
    pub updated_at: i64,
    #[serde(flatten)]
    pub doc: T,
}

/// Document store client. Constructed once at startup and injected into
/// every pipeline that needs persistence; never a process-wide global.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Wraps a migrated connection (see `db::open_db`).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Inserts a document and returns its store-assigned id.
    pub fn insert<T: Serialize>(&self, collection: Collection, doc: &T) -> StoreResult<DocId> {
        let id = DocId::generate();
        let body = encode(collection, doc)?;

        self.conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3);",
            params![collection.name(), id.as_str(), body],
        )?;

        Ok(id)
    }

    /// Point lookup by id.
    pub fn find_by_id<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &DocId,
    ) -> StoreResult<Option<Stored<T>>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, body, created_at, updated_at FROM documents
             WHERE collection = ?1 AND id = ?2;",
        )?;

        let mut rows = stmt.query(params![collection.name(), id.as_str()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_row(collection, row)?)),
            None => Ok(None),
        }
    }

    /// Reads every document in the collection, oldest first.
    pub fn find_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> StoreResult<Vec<Stored<T>>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, body, created_at, updated_at FROM documents
             WHERE collection = ?1
             ORDER BY created_at ASC, id ASC;",
        )?;

        let mut rows = stmt.query(params![collection.name()])?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            documents.push(parse_row(collection, row)?);
        }

        Ok(documents)
    }

    /// Point lookup assembled as a raw JSON object (envelope fields included).
    ///
    /// Feeds reference expansion, where the target's concrete record type is
    /// not statically known to the caller.
    pub fn find_raw(&self, collection: Collection, id: &DocId) -> StoreResult<Option<Value>> {
        self.find_by_id::<Value>(collection, id)?
            .map(|stored| assemble_raw(collection, stored))
            .transpose()
    }

    /// `find_all` counterpart of `find_raw`.
    pub fn find_all_raw(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        self.find_all::<Value>(collection)?
            .into_iter()
            .map(|stored| assemble_raw(collection, stored))
            .collect()
    }

    /// Existence check without deserializing the body.
    pub fn exists(&self, collection: Collection, id: &DocId) -> StoreResult<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM documents WHERE collection = ?1 AND id = ?2;")?;
        let found = stmt.exists(params![collection.name(), id.as_str()])?;
        Ok(found)
    }

    /// Returns the subset of `ids` that exist, resolved in one batch query.
    pub fn existing_ids(
        &self,
        collection: Collection,
        ids: &[DocId],
    ) -> StoreResult<HashSet<DocId>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id FROM documents WHERE collection = ? AND id IN ({placeholders});"
        );

        let mut bind_values: Vec<SqlValue> = Vec::with_capacity(ids.len() + 1);
        bind_values.push(SqlValue::Text(collection.name().to_string()));
        bind_values.extend(ids.iter().map(|id| SqlValue::Text(id.as_str().to_string())));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut found = HashSet::new();
        while let Some(row) = rows.next()? {
            found.insert(DocId::from(row.get::<_, String>(0)?));
        }

        Ok(found)
    }

    /// Overwrites the document body in place, refreshing `updated_at`.
    ///
    /// Returns `false` when no document with that id exists.
    pub fn replace<T: Serialize>(
        &self,
        collection: Collection,
        id: &DocId,
        doc: &T,
    ) -> StoreResult<bool> {
        let body = encode(collection, doc)?;

        let changed = self.conn.execute(
            "UPDATE documents
             SET body = ?3, updated_at = (strftime('%s', 'now') * 1000)
             WHERE collection = ?1 AND id = ?2;",
            params![collection.name(), id.as_str(), body],
        )?;

        Ok(changed > 0)
    }

    /// Removes the document. Returns `false` when no document existed.
    pub fn delete(&self, collection: Collection, id: &DocId) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2;",
            params![collection.name(), id.as_str()],
        )?;

        Ok(changed > 0)
    }
}

fn encode<T: Serialize>(collection: Collection, doc: &T) -> StoreResult<String> {
    serde_json::to_string(doc).map_err(|err| StoreError::Encode {
        collection,
        details: err.to_string(),
    })
}

fn parse_row<T: DeserializeOwned>(
    collection: Collection,
    row: &rusqlite::Row<'_>,
) -> StoreResult<Stored<T>> {
    let id = DocId::from(row.get::<_, String>("id")?);
    let body: String = row.get("body")?;

    let doc = serde_json::from_str(&body).map_err(|err| StoreError::Corrupt {
        collection,
        id: id.clone(),
        details: err.to_string(),
    })?;

    Ok(Stored {
        id,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        doc,
    })
}

fn assemble_raw(collection: Collection, stored: Stored<Value>) -> StoreResult<Value> {
    let Value::Object(mut object) = stored.doc else {
        return Err(StoreError::Corrupt {
            collection,
            id: stored.id,
            details: "document body is not a JSON object".to_string(),
        });
    };

    object.insert("id".to_string(), Value::String(stored.id.to_string()));
    object.insert("createdAt".to_string(), Value::from(stored.created_at));
    object.insert("updatedAt".to_string(), Value::from(stored.updated_at));

    Ok(Value::Object(object))
}
