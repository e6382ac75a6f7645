//! Generic CRUD pipeline over the four journal resources.
//!
//! # Responsibility
//! - Sequence validate -> resolve references -> normalize -> store operation
//!   for create and update, once, parameterized by a per-resource schema.
//! - Map every outcome to an explicit result kind callers can branch on.
//!
//! # Invariants
//! - A validation or reference failure aborts before any write.
//! - Update and delete check existence first; "not found" short-circuits
//!   before validation runs.
//! - Every update is a full-record replacement after full revalidation;
//!   there is no partial-patch mode.
//! - Single attempt per operation: no retries, no backoff.

use crate::model::{ValidationError, ValidationResult};
use crate::resolve::{
    expand_document, join_ids, resolve_references, ExpandedReference, ReferenceSpec,
    ResolveError, ResolvedReferences,
};
use crate::store::{Collection, DocId, Store, StoreError, Stored};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type CoreResult<T> = Result<T, CoreError>;

/// Outcome kinds for every pipeline operation.
///
/// `NotFound` (the target id of a read/update/delete is absent) is
/// deliberately distinct from `ReferenceNotFound` (a payload references a
/// record that does not exist).
#[derive(Debug)]
pub enum CoreError {
    Validation(ValidationError),
    ReferenceNotFound {
        collection: Collection,
        missing: Vec<DocId>,
    },
    NotFound {
        collection: Collection,
        id: DocId,
    },
    Store(StoreError),
    /// Write/read-back mismatch inside one operation.
    Inconsistent(&'static str),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ReferenceNotFound {
                collection,
                missing,
            } => write!(
                f,
                "referenced {collection} not found: {}",
                join_ids(missing)
            ),
            Self::NotFound { collection, id } => {
                write!(f, "no {collection} record with id {id}")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::Inconsistent(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for CoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CoreError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ResolveError> for CoreError {
    fn from(value: ResolveError) -> Self {
        match value {
            ResolveError::Missing {
                collection,
                missing,
            } => Self::ReferenceNotFound {
                collection,
                missing,
            },
            ResolveError::Store(err) => Self::Store(err),
        }
    }
}

/// Per-resource schema the generic pipeline is parameterized by: the typed
/// stations of the pipeline plus the resource's reference declaration.
pub trait ResourceSchema {
    const COLLECTION: Collection;
    /// Raw transport payload.
    type Input;
    /// Validated field set.
    type Fields;
    /// Canonical persisted shape.
    type Record: Serialize + DeserializeOwned;

    /// Field validation: pure, fail-fast, first violated rule wins.
    fn validate(input: &Self::Input) -> ValidationResult<Self::Fields>;

    /// Outgoing references declared by the payload.
    fn references(input: &Self::Input) -> ReferenceSpec;

    /// Merges validated fields and confirmed references into the persisted
    /// shape, applying defaults for optional fields. Deterministic, no I/O.
    fn normalize(fields: Self::Fields, refs: ResolvedReferences) -> Self::Record;

    /// Reference field expanded in place on list/read-one responses.
    fn expansion() -> Option<ExpandedReference>;
}

/// CRUD orchestrator for one resource, generic over its schema.
pub struct ResourceService<'store, R: ResourceSchema> {
    store: &'store Store,
    _resource: PhantomData<R>,
}

impl<'store, R: ResourceSchema> ResourceService<'store, R> {
    pub fn new(store: &'store Store) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    /// Create path: validate -> resolve -> normalize -> insert -> read back.
    pub fn create(&self, input: &R::Input) -> CoreResult<Stored<R::Record>> {
        let record = self.prepare(input)?;
        let id = self.store.insert(R::COLLECTION, &record)?;

        self.store
            .find_by_id(R::COLLECTION, &id)?
            .ok_or(CoreError::Inconsistent(
                "created record missing on read-back",
            ))
    }

    /// Reads every record of the resource. An empty collection is a success.
    pub fn list(&self) -> CoreResult<Vec<Stored<R::Record>>> {
        Ok(self.store.find_all(R::COLLECTION)?)
    }

    /// `list` with the resource's reference field expanded in place.
    pub fn list_expanded(&self) -> CoreResult<Vec<Value>> {
        let documents = self.store.find_all_raw(R::COLLECTION)?;
        let Some(expansion) = R::expansion() else {
            return Ok(documents);
        };

        documents
            .into_iter()
            .map(|doc| Ok(expand_document(self.store, &expansion, doc)?))
            .collect()
    }

    /// Point read. `Ok(None)` is the not-found outcome, never an error.
    pub fn get(&self, id: &DocId) -> CoreResult<Option<Stored<R::Record>>> {
        Ok(self.store.find_by_id(R::COLLECTION, id)?)
    }

    /// `get` with the resource's reference field expanded in place.
    pub fn get_expanded(&self, id: &DocId) -> CoreResult<Option<Value>> {
        let Some(document) = self.store.find_raw(R::COLLECTION, id)? else {
            return Ok(None);
        };

        match R::expansion() {
            Some(expansion) => Ok(Some(expand_document(self.store, &expansion, document)?)),
            None => Ok(Some(document)),
        }
    }

    /// Full-record replacement update.
    ///
    /// The existence check and the overwrite are two independent store
    /// operations; the unguarded gap between them is an accepted
    /// inconsistency window (a racing delete surfaces as `NotFound`).
    pub fn update(&self, id: &DocId, input: &R::Input) -> CoreResult<Stored<R::Record>> {
        if !self.store.exists(R::COLLECTION, id)? {
            return Err(self.not_found(id));
        }

        let record = self.prepare(input)?;
        if !self.store.replace(R::COLLECTION, id, &record)? {
            return Err(self.not_found(id));
        }

        self.store
            .find_by_id(R::COLLECTION, id)?
            .ok_or(CoreError::Inconsistent(
                "updated record missing on read-back",
            ))
    }

    /// Delete by id, no cascade: records referencing the deleted one keep
    /// their now-dangling identifiers.
    pub fn delete(&self, id: &DocId) -> CoreResult<()> {
        if !self.store.exists(R::COLLECTION, id)? {
            return Err(self.not_found(id));
        }

        if !self.store.delete(R::COLLECTION, id)? {
            return Err(self.not_found(id));
        }

        Ok(())
    }

    /// Shared head of the create and update pipelines.
    fn prepare(&self, input: &R::Input) -> CoreResult<R::Record> {
        let fields = R::validate(input)?;
        let refs = resolve_references(self.store, R::references(input))?;
        Ok(R::normalize(fields, refs))
    }

    fn not_found(&self, id: &DocId) -> CoreError {
        CoreError::NotFound {
            collection: R::COLLECTION,
            id: id.clone(),
        }
    }
}
