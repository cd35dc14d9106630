//! Translation of criteria filters into SQL conditions.
//!
//! Each helper appends zero or more ` AND <condition>` fragments to a
//! [`QueryBuilder`] whose `WHERE` clause is already open (the builders start
//! from `WHERE TRUE`). Values are always bound, never interpolated.
//!
//! Null handling mirrors the in-memory `matches` implementations in the core
//! crate: comparisons against `NULL` are never true, so `notEquals`, `notIn`
//! and `doesNotContain` reject null columns.

use sqlx::{Encode, Postgres, QueryBuilder, Type};

use online_shop_core::criteria::{Filter, RangeFilter, StringFilter};

/// Append the conditions of a [`Filter`] on `column`.
pub fn push_filter<'args, T>(qb: &mut QueryBuilder<'args, Postgres>, column: &str, filter: &Filter<T>)
where
    T: Clone + Encode<'args, Postgres> + Type<Postgres> + Send + 'args,
{
    if let Some(specified) = filter.specified {
        let test = if specified { "IS NOT NULL" } else { "IS NULL" };
        qb.push(format_args!(" AND {column} {test}"));
    }
    if let Some(value) = &filter.equals {
        qb.push(format_args!(" AND {column} = "));
        qb.push_bind(value.clone());
    }
    if let Some(value) = &filter.not_equals {
        qb.push(format_args!(" AND {column} <> "));
        qb.push_bind(value.clone());
    }
    if let Some(values) = &filter.in_list {
        push_list(qb, column, "IN", values);
    }
    if let Some(values) = &filter.not_in {
        push_list(qb, column, "NOT IN", values);
    }
}

fn push_list<'args, T>(qb: &mut QueryBuilder<'args, Postgres>, column: &str, op: &str, values: &[T])
where
    T: Clone + Encode<'args, Postgres> + Type<Postgres> + Send + 'args,
{
    if values.is_empty() {
        // `IN ()` is not valid SQL
        if op == "IN" {
            qb.push(" AND FALSE");
        } else {
            qb.push(format_args!(" AND {column} IS NOT NULL"));
        }
        return;
    }

    qb.push(format_args!(" AND {column} {op} ("));
    let mut list = qb.separated(", ");
    for value in values {
        list.push_bind(value.clone());
    }
    list.push_unseparated(")");
}

/// Append the conditions of a [`RangeFilter`] on `column`.
pub fn push_range_filter<'args, T>(
    qb: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    filter: &RangeFilter<T>,
) where
    T: Clone + Encode<'args, Postgres> + Type<Postgres> + Send + 'args,
{
    push_filter(qb, column, &filter.base);

    let bounds = [
        (">", &filter.greater_than),
        ("<", &filter.less_than),
        (">=", &filter.greater_than_or_equal),
        ("<=", &filter.less_than_or_equal),
    ];
    for (op, bound) in bounds {
        if let Some(value) = bound {
            qb.push(format_args!(" AND {column} {op} "));
            qb.push_bind(value.clone());
        }
    }
}

/// Append the conditions of a [`StringFilter`] on `column`. Substring
/// matches ignore case.
pub fn push_string_filter(qb: &mut QueryBuilder<'_, Postgres>, column: &str, filter: &StringFilter) {
    push_filter(qb, column, &filter.base);

    if let Some(needle) = &filter.contains {
        qb.push(format_args!(" AND {column} ILIKE "));
        qb.push_bind(like_pattern(needle));
    }
    if let Some(needle) = &filter.does_not_contain {
        qb.push(format_args!(" AND {column} NOT ILIKE "));
        qb.push_bind(like_pattern(needle));
    }
}

/// `%needle%` with `LIKE` wildcards in `needle` escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new("SELECT w.id FROM wish_list w WHERE TRUE")
    }

    #[test]
    fn test_empty_filter_adds_nothing() {
        let mut qb = builder();
        push_filter::<i64>(&mut qb, "w.id", &Filter::default());
        assert_eq!(qb.sql(), "SELECT w.id FROM wish_list w WHERE TRUE");
    }

    #[test]
    fn test_filter_clauses() {
        let mut qb = builder();
        let filter = Filter {
            equals: Some(3_i64),
            not_equals: Some(4),
            specified: Some(true),
            in_list: Some(vec![1, 2]),
            not_in: None,
        };
        push_filter(&mut qb, "w.customer_id", &filter);

        assert_eq!(
            qb.sql(),
            "SELECT w.id FROM wish_list w WHERE TRUE \
             AND w.customer_id IS NOT NULL \
             AND w.customer_id = $1 \
             AND w.customer_id <> $2 \
             AND w.customer_id IN ($3, $4)"
        );
    }

    #[test]
    fn test_empty_lists() {
        let mut qb = builder();
        let filter = Filter::<i64> {
            in_list: Some(Vec::new()),
            not_in: Some(Vec::new()),
            ..Filter::default()
        };
        push_filter(&mut qb, "w.id", &filter);

        assert!(qb.sql().ends_with(" AND FALSE AND w.id IS NOT NULL"));
    }

    #[test]
    fn test_range_filter_clauses() {
        let mut qb = builder();
        let filter = RangeFilter {
            greater_than_or_equal: Some(2_i32),
            less_than: Some(5),
            ..RangeFilter::default()
        };
        push_range_filter(&mut qb, "p.rating", &filter);

        assert!(qb.sql().ends_with(" AND p.rating < $1 AND p.rating >= $2"));
    }

    #[test]
    fn test_string_filter_uses_ilike() {
        let mut qb = builder();
        let filter = StringFilter {
            contains: Some("birth".to_owned()),
            does_not_contain: Some("day".to_owned()),
            ..StringFilter::default()
        };
        push_string_filter(&mut qb, "w.title", &filter);

        assert!(
            qb.sql()
                .ends_with(" AND w.title ILIKE $1 AND w.title NOT ILIKE $2")
        );
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("birth"), "%birth%");
        assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }
}
