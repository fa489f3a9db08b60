//! In-process store for tests and database-less runs.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::{CredentialStore, TokenStore};
use crate::{
    prelude::*,
    principal::{NewPrincipal, Principal, PrincipalKind},
    session::SessionRecord,
};

/// Principals and sessions held in memory.
///
/// Clones share the same state. Ids are assigned sequentially from 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    principals: BTreeMap<i64, Principal>,
    sessions: HashMap<String, SessionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included.
    pub fn session_count(&self) -> usize {
        self.inner.lock().sessions.len()
    }

    /// Flips the `active` flag of a principal. Returns whether it exists.
    pub fn set_active(&self, id: i64, active: bool) -> bool {
        match self.inner.lock().principals.get_mut(&id) {
            Some(principal) => {
                principal.active = active;
                true
            }
            None => false,
        }
    }
}

impl CredentialStore for MemoryStore {
    fn find_by_login(&self, kind: PrincipalKind, login: &str) -> Result<Option<Principal>> {
        Ok(self
            .inner
            .lock()
            .principals
            .values()
            .find(|p| p.kind == kind && p.login == login)
            .cloned())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Principal>> {
        Ok(self.inner.lock().principals.get(&id).cloned())
    }

    fn insert(&self, principal: NewPrincipal) -> Result<Principal> {
        let mut inner = self.inner.lock();
        if inner
            .principals
            .values()
            .any(|p| p.kind == principal.kind && p.login == principal.login)
        {
            return Err(Error::Conflict);
        }

        inner.last_id += 1;
        let created = Principal {
            id: inner.last_id,
            kind: principal.kind,
            login: principal.login,
            password_hash: principal.password_hash,
            name: principal.name,
            active: true,
            created_at: Utc::now(),
        };
        inner.principals.insert(created.id, created.clone());
        Ok(created)
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, token_hash: &str) -> Result<Option<SessionRecord>> {
        Ok(self.inner.lock().sessions.get(token_hash).cloned())
    }

    fn put(&self, record: SessionRecord) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.sessions.contains_key(&record.token_hash) {
            return Err(Error::Conflict);
        }
        inner.sessions.insert(record.token_hash.clone(), record);
        Ok(())
    }

    fn delete(&self, token_hash: &str) -> Result<bool> {
        Ok(self.inner.lock().sessions.remove(token_hash).is_some())
    }

    fn delete_for_principal(&self, kind: PrincipalKind, principal_id: i64) -> Result<usize> {
        let mut inner = self.inner.lock();
        let before = inner.sessions.len();
        inner
            .sessions
            .retain(|_, s| !(s.principal_kind == kind && s.principal_id == principal_id));
        Ok(before - inner.sessions.len())
    }

    fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut inner = self.inner.lock();
        let before = inner.sessions.len();
        inner.sessions.retain(|_, s| !s.is_expired_at(now));
        Ok(before - inner.sessions.len())
    }
}
