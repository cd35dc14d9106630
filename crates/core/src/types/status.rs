//! Lifecycle status of a category.

use serde::{Deserialize, Serialize};

/// Category lifecycle status.
///
/// Serialized as `AVAILABLE`, `RESTRICTED` or `DISABLED`, both on the wire
/// and in the `category_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "category_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryStatus {
    Available,
    Restricted,
    Disabled,
}

impl CategoryStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Restricted => "RESTRICTED",
            Self::Disabled => "DISABLED",
        }
    }
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CategoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "RESTRICTED" => Ok(Self::Restricted),
            "DISABLED" => Ok(Self::Disabled),
            _ => Err(format!("invalid category status: {s}")),
        }
    }
}
