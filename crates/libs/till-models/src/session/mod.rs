//! Issued session tokens.
//!
//! Rows are keyed by the SHA-256 digest of the bearer token. They are never
//! updated: a row is inserted on login and deleted on revocation or when found
//! expired.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{
    db::connection::DbConnection, prelude::*, principal::PrincipalKind,
    schema::session_token::dsl::*,
};

/// A persisted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Digest of the bearer token.
    pub token_hash: String,
    pub principal_id: i64,
    pub principal_kind: PrincipalKind,
    pub issued_at: DateTime<Utc>,
    /// `None` for sessions that never expire.
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Whether the session is past its expiry at `now`.
    ///
    /// The boundary instant itself counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

/// Row of the `session_token` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, PartialEq)]
#[diesel(table_name = crate::schema::session_token)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SessionTokenDb {
    pub token_hash: String,
    pub principal_id: i64,
    pub principal_kind: i32,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<SessionRecord> for SessionTokenDb {
    fn from(value: SessionRecord) -> Self {
        Self {
            token_hash: value.token_hash,
            principal_id: value.principal_id,
            principal_kind: value.principal_kind.id(),
            issued_at: value.issued_at,
            expires_at: value.expires_at,
        }
    }
}

impl TryFrom<SessionTokenDb> for SessionRecord {
    type Error = Error;

    fn try_from(value: SessionTokenDb) -> Result<Self> {
        Ok(Self {
            token_hash: value.token_hash,
            principal_id: value.principal_id,
            principal_kind: PrincipalKind::try_from(value.principal_kind)?,
            issued_at: value.issued_at,
            expires_at: value.expires_at,
        })
    }
}

impl SessionTokenDb {
    pub fn save(self, connection: &DbConnection) -> Result<()> {
        let conn = &mut connection.pool.get()?;
        diesel::insert_into(session_token)
            .values(&self)
            .execute(conn)?;
        Ok(())
    }

    pub fn fetch_by_hash(target: &str, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(session_token
            .filter(token_hash.eq(target))
            .select(SessionTokenDb::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn delete_by_hash(target: &str, connection: &DbConnection) -> Result<usize> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::delete(session_token.filter(token_hash.eq(target))).execute(conn)?)
    }

    pub fn delete_by_principal(
        target_kind: PrincipalKind,
        target: i64,
        connection: &DbConnection,
    ) -> Result<usize> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::delete(
            session_token
                .filter(principal_kind.eq(target_kind.id()))
                .filter(principal_id.eq(target)),
        )
        .execute(conn)?)
    }

    pub fn delete_expired(now: DateTime<Utc>, connection: &DbConnection) -> Result<usize> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::delete(session_token.filter(expires_at.le(now))).execute(conn)?)
    }
}
