//! Per-field filter descriptors.
//!
//! A filter holds the optional constraints a client placed on one field.
//! Every constraint that is set must hold for a row to match; a filter with
//! nothing set matches everything.

use core::str::FromStr;

use chrono::NaiveDate;

use super::CriteriaError;
use crate::types::CategoryStatus;

/// Equality, null and set-membership constraints on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter<T> {
    pub equals: Option<T>,
    pub not_equals: Option<T>,
    /// `Some(true)` requires a value, `Some(false)` requires null.
    pub specified: Option<bool>,
    pub in_list: Option<Vec<T>>,
    pub not_in: Option<Vec<T>>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            specified: None,
            in_list: None,
            not_in: None,
        }
    }
}

/// A [`Filter`] on an ordered field, with range bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFilter<T> {
    pub base: Filter<T>,
    pub greater_than: Option<T>,
    pub less_than: Option<T>,
    pub greater_than_or_equal: Option<T>,
    pub less_than_or_equal: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            base: Filter::default(),
            greater_than: None,
            less_than: None,
            greater_than_or_equal: None,
            less_than_or_equal: None,
        }
    }
}

/// A [`Filter`] on a text field, with case-insensitive substring matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringFilter {
    pub base: Filter<String>,
    pub contains: Option<String>,
    pub does_not_contain: Option<String>,
}

pub type LongFilter = RangeFilter<i64>;
pub type IntegerFilter = RangeFilter<i32>;
pub type LocalDateFilter = RangeFilter<NaiveDate>;
pub type BooleanFilter = Filter<bool>;
pub type CategoryStatusFilter = Filter<CategoryStatus>;

/// Apply one `field.operator=value` query parameter to a filter.
pub trait ApplyParam {
    /// Set the constraint named by `operator` from the raw `value`.
    ///
    /// `key` is the full parameter name, used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `CriteriaError::UnknownOperator` if the operator does not
    /// apply to this filter, or `CriteriaError::InvalidValue` if the value
    /// cannot be parsed.
    fn apply(&mut self, operator: &str, value: &str, key: &str) -> Result<(), CriteriaError>;
}

fn parse_value<T: FromStr>(value: &str, key: &str) -> Result<T, CriteriaError> {
    value
        .trim()
        .parse()
        .map_err(|_| CriteriaError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        })
}

fn parse_list<T: FromStr>(value: &str, key: &str) -> Result<Vec<T>, CriteriaError> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse_value(part, key))
        .collect()
}

impl<T: FromStr> ApplyParam for Filter<T> {
    fn apply(&mut self, operator: &str, value: &str, key: &str) -> Result<(), CriteriaError> {
        match operator {
            "equals" => self.equals = Some(parse_value(value, key)?),
            "notEquals" => self.not_equals = Some(parse_value(value, key)?),
            "specified" => self.specified = Some(parse_value(value, key)?),
            // Repeated `in` parameters accumulate, the same as a comma list.
            "in" => self
                .in_list
                .get_or_insert_with(Vec::new)
                .extend(parse_list(value, key)?),
            "notIn" => self
                .not_in
                .get_or_insert_with(Vec::new)
                .extend(parse_list(value, key)?),
            _ => return Err(CriteriaError::UnknownOperator(key.to_owned())),
        }
        Ok(())
    }
}

impl<T: FromStr> ApplyParam for RangeFilter<T> {
    fn apply(&mut self, operator: &str, value: &str, key: &str) -> Result<(), CriteriaError> {
        match operator {
            "greaterThan" => self.greater_than = Some(parse_value(value, key)?),
            "lessThan" => self.less_than = Some(parse_value(value, key)?),
            "greaterThanOrEqual" => self.greater_than_or_equal = Some(parse_value(value, key)?),
            "lessThanOrEqual" => self.less_than_or_equal = Some(parse_value(value, key)?),
            _ => return self.base.apply(operator, value, key),
        }
        Ok(())
    }
}

impl ApplyParam for StringFilter {
    fn apply(&mut self, operator: &str, value: &str, key: &str) -> Result<(), CriteriaError> {
        match operator {
            "contains" => self.contains = Some(value.to_owned()),
            "doesNotContain" => self.does_not_contain = Some(value.to_owned()),
            _ => return self.base.apply(operator, value, key),
        }
        Ok(())
    }
}

// =============================================================================
// In-memory evaluation
// =============================================================================

impl<T: PartialEq> Filter<T> {
    /// Whether `value` (null when `None`) satisfies every set constraint.
    ///
    /// Comparisons against null never match, the same as SQL three-valued
    /// logic: `notEquals` and `notIn` reject a null value.
    #[must_use]
    pub fn matches(&self, value: Option<&T>) -> bool {
        if let Some(specified) = self.specified
            && specified != value.is_some()
        {
            return false;
        }
        if let Some(expected) = &self.equals
            && value != Some(expected)
        {
            return false;
        }
        if let Some(rejected) = &self.not_equals
            && value.is_none_or(|v| v == rejected)
        {
            return false;
        }
        if let Some(allowed) = &self.in_list
            && !value.is_some_and(|v| allowed.contains(v))
        {
            return false;
        }
        if let Some(rejected) = &self.not_in
            && value.is_none_or(|v| rejected.contains(v))
        {
            return false;
        }
        true
    }

    /// Evaluate against a to-many relation joined with `LEFT JOIN`: the
    /// filter matches if any related value matches, or null when there are
    /// no related rows.
    #[must_use]
    pub fn matches_any(&self, values: &[T]) -> bool {
        if values.is_empty() {
            return self.matches(None);
        }
        values.iter().any(|v| self.matches(Some(v)))
    }
}

impl<T: PartialOrd> RangeFilter<T> {
    /// Whether `value` satisfies every set constraint, bounds included.
    #[must_use]
    pub fn matches(&self, value: Option<&T>) -> bool {
        if !self.base.matches(value) {
            return false;
        }
        let bounds: [(&Option<T>, fn(&T, &T) -> bool); 4] = [
            (&self.greater_than, |v, b| v > b),
            (&self.less_than, |v, b| v < b),
            (&self.greater_than_or_equal, |v, b| v >= b),
            (&self.less_than_or_equal, |v, b| v <= b),
        ];
        bounds.iter().all(|(bound, cmp)| match (bound, value) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(b), Some(v)) => cmp(v, b),
        })
    }

    /// See [`Filter::matches_any`].
    #[must_use]
    pub fn matches_any(&self, values: &[T]) -> bool {
        if values.is_empty() {
            return self.matches(None);
        }
        values.iter().any(|v| self.matches(Some(v)))
    }
}

impl StringFilter {
    /// Whether `value` satisfies every set constraint. Substring checks
    /// ignore case.
    #[must_use]
    pub fn matches(&self, value: Option<&str>) -> bool {
        let owned = value.map(str::to_owned);
        if !self.base.matches(owned.as_ref()) {
            return false;
        }
        let lower = value.map(str::to_lowercase);
        if let Some(needle) = &self.contains
            && !lower
                .as_deref()
                .is_some_and(|v| v.contains(&needle.to_lowercase()))
        {
            return false;
        }
        if let Some(needle) = &self.does_not_contain
            && lower
                .as_deref()
                .is_none_or(|v| v.contains(&needle.to_lowercase()))
        {
            return false;
        }
        true
    }
}
