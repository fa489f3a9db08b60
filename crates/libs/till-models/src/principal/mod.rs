//! Principals: the customers and managers that log in.
//!
//! A login is unique within its [`PrincipalKind`]; the same string can exist once
//! per kind.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;

use crate::{db::connection::DbConnection, prelude::*, schema::principal::dsl::*};

mod principal_kind;

pub use principal_kind::PrincipalKind;

/// A registered principal.
///
/// Deliberately not `Serialize`: the password hash must never leave the
/// service.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: i64,
    pub kind: PrincipalKind,
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new principal.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrincipal {
    pub kind: PrincipalKind,
    pub login: String,
    pub password_hash: String,
    pub name: String,
}

/// Row of the `principal` table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::principal)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PrincipalDb {
    pub id: i64,
    pub kind: i32,
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::principal)]
pub struct PrincipalCreate {
    pub kind: i32,
    pub login: String,
    pub password_hash: String,
    pub name: String,
}

impl From<NewPrincipal> for PrincipalCreate {
    fn from(value: NewPrincipal) -> Self {
        Self {
            kind: value.kind.id(),
            login: value.login,
            password_hash: value.password_hash,
            name: value.name,
        }
    }
}

impl TryFrom<PrincipalDb> for Principal {
    type Error = Error;

    fn try_from(value: PrincipalDb) -> Result<Self> {
        Ok(Self {
            id: value.id,
            kind: PrincipalKind::try_from(value.kind)?,
            login: value.login,
            password_hash: value.password_hash,
            name: value.name,
            active: value.active,
            created_at: value.created_at,
        })
    }
}

impl PrincipalCreate {
    /// Inserts the principal.
    ///
    /// A duplicate `(kind, login)` is decided by the unique constraint and
    /// reported as [`Error::Conflict`].
    pub fn save(self, connection: &DbConnection) -> Result<PrincipalDb> {
        let conn = &mut connection.pool.get()?;

        match diesel::insert_into(principal)
            .values(&self)
            .returning(PrincipalDb::as_returning())
            .get_result(conn)
        {
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(Error::Conflict)
            }
            result => Ok(result?),
        }
    }
}

impl PrincipalDb {
    pub fn fetch_by_id(target: i64, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(PrincipalDb::by_id(target)
            .select(PrincipalDb::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn fetch_by_login(
        target_kind: PrincipalKind,
        target: &str,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(PrincipalDb::by_login(target_kind.id(), target)
            .select(PrincipalDb::as_select())
            .first(conn)
            .optional()?)
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: i64) -> _ {
        crate::schema::principal::dsl::principal.filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_login(target_kind: i32, target: &str) -> _ {
        crate::schema::principal::dsl::principal
            .filter(kind.eq(target_kind))
            .filter(login.eq(target))
    }
}
