//! Caller identity and ownership/visibility rules around storage
//!
//! Authentication happens elsewhere; these helpers only consume the caller
//! id it produced.

use uuid::Uuid;

use crate::io::error::{Result, RollpageError, not_found};
use crate::store::{OwnedRecord, Record, RecordKind, Storage};

/// Identity of the caller of an operation
pub trait AuthContext {
    /// Authenticated user id, `None` for anonymous callers
    fn caller_id(&self) -> Option<&str>;

    /// Whether the caller owns `record`
    fn is_owner(&self, record: &dyn OwnedRecord) -> bool {
        self.caller_id() == Some(record.owner())
    }
}

/// Plain caller identity value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    caller: Option<String>,
}

impl CallerContext {
    /// Anonymous visitor
    pub const fn anonymous() -> Self {
        Self { caller: None }
    }

    /// Authenticated user
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            caller: Some(id.into()),
        }
    }
}

impl AuthContext for CallerContext {
    fn caller_id(&self) -> Option<&str> {
        self.caller.as_deref()
    }
}

/// Require the caller to own `record`
///
/// # Errors
///
/// Returns `Unauthenticated` for an anonymous caller and `PermissionDenied`
/// for anyone but the owner
pub fn ensure_owner<A: AuthContext + ?Sized>(auth: &A, record: &dyn OwnedRecord) -> Result<()> {
    if auth.caller_id().is_none() {
        return Err(RollpageError::Unauthenticated);
    }
    if auth.is_owner(record) {
        Ok(())
    } else {
        Err(RollpageError::PermissionDenied {
            kind: record.kind(),
            id: record.record_id().to_string(),
        })
    }
}

/// Require `record` to be visible to the caller
///
/// Public records are visible to everyone, the rest only to their owner.
/// Hidden records are reported as missing so their existence is not leaked.
///
/// # Errors
///
/// Returns `NotFound` when the caller may not see the record
pub fn ensure_visible<A: AuthContext + ?Sized>(auth: &A, record: &dyn OwnedRecord) -> Result<()> {
    if record.is_public() || auth.is_owner(record) {
        Ok(())
    } else {
        Err(not_found(record.kind(), &record.record_id()))
    }
}

/// Load a record the caller may see
///
/// # Errors
///
/// Returns `NotFound` when the record is missing or hidden from the caller
pub fn load_visible<S, A>(storage: &S, auth: &A, kind: RecordKind, id: Uuid) -> Result<Record>
where
    S: Storage + ?Sized,
    A: AuthContext + ?Sized,
{
    let record = storage.load(kind, id)?;
    ensure_visible(auth, &record)?;
    Ok(record)
}

/// Create or update a record on behalf of the caller
///
/// New records must name the caller as owner; existing records may only be
/// replaced by their stored owner, and ownership cannot be handed over.
///
/// # Errors
///
/// Returns `Unauthenticated`, `PermissionDenied` or a storage failure
pub fn save_as<S, A>(storage: &mut S, auth: &A, record: Record) -> Result<()>
where
    S: Storage + ?Sized,
    A: AuthContext + ?Sized,
{
    match storage.load(record.kind(), record.record_id()) {
        Ok(existing) => ensure_owner(auth, &existing)?,
        Err(RollpageError::NotFound { .. }) => {}
        Err(error) => return Err(error),
    }
    ensure_owner(auth, &record)?;
    storage.save(record)
}

/// Delete a record owned by the caller
///
/// # Errors
///
/// Returns `NotFound`, `Unauthenticated`, `PermissionDenied` or a storage failure
pub fn delete_as<S, A>(storage: &mut S, auth: &A, kind: RecordKind, id: Uuid) -> Result<()>
where
    S: Storage + ?Sized,
    A: AuthContext + ?Sized,
{
    let existing = storage.load(kind, id)?;
    ensure_owner(auth, &existing)?;
    storage.delete(kind, id)
}
