//! Role names

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of staff roles.
///
/// Route allowlists are expressed as `&[RoleName]`; there is no way to
/// grant access to a role the compiler does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    Admin,
    Receptionist,
    Housekeeping,
}

impl RoleName {
    /// Every role the system knows about.
    pub const ALL: [RoleName; 3] = [
        RoleName::Admin,
        RoleName::Receptionist,
        RoleName::Housekeeping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "ADMIN",
            RoleName::Receptionist => "RECEPTIONIST",
            RoleName::Housekeeping => "HOUSEKEEPING",
        }
    }

    /// Default description used when the role record is created lazily.
    pub fn default_description(&self) -> &'static str {
        match self {
            RoleName::Admin => "Acceso total al sistema",
            RoleName::Receptionist => "Operaciones de recepción y tienda",
            RoleName::Housekeeping => "Estado de habitaciones y limpieza",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role name no longer maps to a known role.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role name: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for RoleName {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(RoleName::Admin),
            "RECEPTIONIST" => Ok(RoleName::Receptionist),
            "HOUSEKEEPING" => Ok(RoleName::Housekeeping),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for role in RoleName::ALL {
            assert_eq!(role.as_str().parse::<RoleName>().unwrap(), role);
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("MANAGER".parse::<RoleName>().is_err());
        assert!("admin".parse::<RoleName>().is_err());
    }

    #[test]
    fn serializes_as_screaming_snake() {
        let json = serde_json::to_string(&RoleName::Receptionist).unwrap();
        assert_eq!(json, "\"RECEPTIONIST\"");
    }
}
