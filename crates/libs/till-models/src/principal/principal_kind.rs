use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// The two disjoint principal namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    Customer = 0,
    Manager = 1,
}

impl PrincipalKind {
    /// Value stored in `kind` / `principal_kind` columns.
    pub const fn id(self) -> i32 {
        self as i32
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PrincipalKind::Customer => "customer",
            PrincipalKind::Manager => "manager",
        }
    }
}

impl TryFrom<i32> for PrincipalKind {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(PrincipalKind::Customer),
            1 => Ok(PrincipalKind::Manager),
            other => Err(Error::UnknownKind(other)),
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
