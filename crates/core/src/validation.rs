//! Field-level validation of transfer objects.
//!
//! Validation runs at the HTTP boundary before any service call. A transfer
//! object reports every violated constraint at once so the client can fix
//! the whole request in one round trip.

use core::fmt;

/// A constraint a field can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// The field must be present and non-null.
    NotNull,
    /// The field must not be longer than `max` characters.
    Size {
        /// Maximum allowed length.
        max: usize,
    },
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNull => f.write_str("NotNull"),
            Self::Size { .. } => f.write_str("Size"),
        }
    }
}

/// A single violated constraint on a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the field (camelCase).
    pub field: &'static str,
    /// The constraint that failed.
    pub constraint: Constraint,
}

/// Types that can check their own field constraints.
pub trait Validate {
    /// Name of the validated object, as reported in field errors.
    const OBJECT_NAME: &'static str;

    /// Return every violated constraint; empty when valid.
    fn validate(&self) -> Vec<Violation>;

    /// Convenience for `validate().is_empty()`.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Record a `NotNull` violation when `value` is absent.
pub fn require<T>(violations: &mut Vec<Violation>, field: &'static str, value: Option<&T>) {
    if value.is_none() {
        violations.push(Violation {
            field,
            constraint: Constraint::NotNull,
        });
    }
}

/// Record a `Size` violation when `value` is longer than `max` characters.
pub fn max_length(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) {
    if value.is_some_and(|v| v.chars().count() > max) {
        violations.push(Violation {
            field,
            constraint: Constraint::Size { max },
        });
    }
}
