//! Table mapping shared by the `PostgreSQL` repositories.
//!
//! Each entity describes its table once ([`Table`]); the functions here build
//! the criteria `SELECT` and `COUNT` statements and the by-id statements from
//! that description. They run on a borrowed connection so the calling
//! repository decides the transaction.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};

use online_shop_core::page::PageRequest;

use super::RepositoryError;
use crate::models::Entity;

/// How an entity is stored.
pub trait Table: Entity {
    /// Row as selected by [`Table::COLUMNS`].
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin + Into<Self>;

    /// Table name.
    const TABLE: &'static str;

    /// Alias used for the table in criteria queries.
    const ALIAS: &'static str;

    /// Selected columns, unqualified. The first one is `id`.
    const COLUMNS: &'static [&'static str];

    /// Raw key for an id.
    fn key(id: Self::Id) -> i64;

    /// Append the joins needed by `criteria`, then `WHERE TRUE` followed by
    /// one ` AND` condition per constraint.
    fn push_criteria(qb: &mut QueryBuilder<'static, Postgres>, criteria: &Self::Criteria);
}

/// Columns qualified with the table alias, for criteria queries.
pub fn qualified_columns<T: Table>() -> String {
    T::COLUMNS
        .iter()
        .map(|c| format!("{}.{c}", T::ALIAS))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Plain column list, for `RETURNING` and by-id queries.
pub fn columns<T: Table>() -> String {
    T::COLUMNS.join(", ")
}

/// Build the paged `SELECT` for `criteria`.
///
/// Related-collection filters join to-many tables, so rows are made
/// distinct. Requested sort orders are applied first, then `id ASC` breaks
/// ties so paging is stable.
pub fn select_query<T: Table>(
    criteria: &T::Criteria,
    request: &PageRequest,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT DISTINCT {} FROM {} {}",
        qualified_columns::<T>(),
        T::TABLE,
        T::ALIAS
    ));
    T::push_criteria(&mut qb, criteria);

    qb.push(" ORDER BY ");
    for sort in request.sort() {
        if let Some(column) = T::sort_column(&sort.property) {
            qb.push(format_args!(
                "{}.{column} {}, ",
                T::ALIAS,
                sort.direction.as_sql()
            ));
        }
    }
    qb.push(format_args!("{}.id ASC", T::ALIAS));

    qb.push(" LIMIT ");
    qb.push_bind(request.limit());
    qb.push(" OFFSET ");
    qb.push_bind(request.offset());
    qb
}

/// Build the `COUNT` for `criteria`.
pub fn count_query<T: Table>(criteria: &T::Criteria) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT COUNT(DISTINCT {alias}.id) FROM {} {alias}",
        T::TABLE,
        alias = T::ALIAS
    ));
    T::push_criteria(&mut qb, criteria);
    qb
}

/// Fetch one page of rows.
pub async fn fetch_rows<T: Table>(
    conn: &mut PgConnection,
    criteria: &T::Criteria,
    request: &PageRequest,
) -> Result<Vec<T::Row>, RepositoryError> {
    let mut qb = select_query::<T>(criteria, request);
    let rows = qb.build_query_as::<T::Row>().fetch_all(conn).await?;
    Ok(rows)
}

/// Count matching rows.
pub async fn count_rows<T: Table>(
    conn: &mut PgConnection,
    criteria: &T::Criteria,
) -> Result<i64, RepositoryError> {
    let mut qb = count_query::<T>(criteria);
    let count = qb.build_query_scalar::<i64>().fetch_one(conn).await?;
    Ok(count)
}

/// Fetch one row by id.
pub async fn fetch_row<T: Table>(
    conn: &mut PgConnection,
    id: T::Id,
) -> Result<Option<T::Row>, RepositoryError> {
    let sql = format!("SELECT {} FROM {} WHERE id = $1", columns::<T>(), T::TABLE);
    let row = sqlx::query_as::<_, T::Row>(&sql)
        .bind(T::key(id))
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

/// Delete one row by id, ignoring a missing row.
pub async fn delete_row<T: Table>(conn: &mut PgConnection, id: T::Id) -> Result<(), RepositoryError> {
    let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
    sqlx::query(&sql).bind(T::key(id)).execute(conn).await?;
    Ok(())
}
