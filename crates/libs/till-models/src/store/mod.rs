//! Collaborator contracts consumed by the session service.
//!
//! Both traits are object safe and `Send + Sync`, so a service can hold them as
//! `Arc<dyn CredentialStore>` / `Arc<dyn TokenStore>` and share them across
//! request tasks.

use chrono::{DateTime, Utc};

use crate::{
    prelude::*,
    principal::{NewPrincipal, Principal, PrincipalKind},
    session::SessionRecord,
};

pub mod memory;
mod postgres;

pub use memory::MemoryStore;

/// Durable principal storage.
pub trait CredentialStore: Send + Sync {
    /// Looks a principal up by its login within `kind`.
    fn find_by_login(&self, kind: PrincipalKind, login: &str) -> Result<Option<Principal>>;

    /// Looks a principal up by id.
    fn find_by_id(&self, id: i64) -> Result<Option<Principal>>;

    /// Persists a new principal, assigning its id.
    ///
    /// Fails with [`Error::Conflict`] when `(kind, login)` is already taken.
    /// The check is atomic with the insert.
    fn insert(&self, principal: NewPrincipal) -> Result<Principal>;
}

/// Durable session token storage, keyed by token digest.
pub trait TokenStore: Send + Sync {
    fn get(&self, token_hash: &str) -> Result<Option<SessionRecord>>;

    fn put(&self, record: SessionRecord) -> Result<()>;

    /// Removes a session. Returns whether a row existed.
    fn delete(&self, token_hash: &str) -> Result<bool>;

    /// Removes every session of one principal. Returns the number removed.
    fn delete_for_principal(&self, kind: PrincipalKind, principal_id: i64) -> Result<usize>;

    /// Removes sessions whose expiry is at or before `now`.
    fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize>;
}
