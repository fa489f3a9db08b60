//! Postgres-backed stores over the shared r2d2 pool.

use chrono::{DateTime, Utc};

use super::{CredentialStore, TokenStore};
use crate::{
    db::connection::DbConnection,
    prelude::*,
    principal::{NewPrincipal, Principal, PrincipalCreate, PrincipalDb, PrincipalKind},
    session::{SessionRecord, SessionTokenDb},
};

impl CredentialStore for DbConnection {
    fn find_by_login(&self, kind: PrincipalKind, login: &str) -> Result<Option<Principal>> {
        PrincipalDb::fetch_by_login(kind, login, self)?
            .map(Principal::try_from)
            .transpose()
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Principal>> {
        PrincipalDb::fetch_by_id(id, self)?
            .map(Principal::try_from)
            .transpose()
    }

    fn insert(&self, principal: NewPrincipal) -> Result<Principal> {
        PrincipalCreate::from(principal).save(self)?.try_into()
    }
}

impl TokenStore for DbConnection {
    fn get(&self, token_hash: &str) -> Result<Option<SessionRecord>> {
        SessionTokenDb::fetch_by_hash(token_hash, self)?
            .map(SessionRecord::try_from)
            .transpose()
    }

    fn put(&self, record: SessionRecord) -> Result<()> {
        SessionTokenDb::from(record).save(self)
    }

    fn delete(&self, token_hash: &str) -> Result<bool> {
        Ok(SessionTokenDb::delete_by_hash(token_hash, self)? > 0)
    }

    fn delete_for_principal(&self, kind: PrincipalKind, principal_id: i64) -> Result<usize> {
        SessionTokenDb::delete_by_principal(kind, principal_id, self)
    }

    fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        SessionTokenDb::delete_expired(now, self)
    }
}
