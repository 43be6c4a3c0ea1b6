//! Gid resolution with redirect support.
//!
//! A gid can be superseded (e.g. when two entities are merged). The old gid
//! is then kept in a redirect table pointing at the numeric id of the
//! canonical entity. Resolution tries the gid directly first and falls back
//! to a single redirect hop; redirect chains are not followed.

use super::session::CatalogSession;
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row, ToSql};
use tracing::debug;

/// An entity type addressable by gid, with a parallel redirect table of
/// `(gid, new_id)` rows.
pub trait GidEntity {
    const TABLE: &'static str;
    const REDIRECT_TABLE: &'static str;
}

/// The base query used to load an entity once it has been located.
///
/// `select_sql` must select from the entity table aliased as `e`, joins are
/// allowed, and must not contain a `WHERE` clause; the resolver appends the
/// lookup condition.
pub trait EntityQuery {
    type Target: GidEntity;
    type Entity;

    fn select_sql(&self) -> &str;

    fn map_row(row: &Row) -> rusqlite::Result<Self::Entity>;
}

/// How an entity was located.
#[derive(Debug, PartialEq)]
pub enum Resolution<T> {
    /// The gid belongs to the entity itself.
    Direct(T),
    /// The gid was superseded and the redirect led to the entity.
    Redirected(T),
}

impl<T> Resolution<T> {
    pub fn into_inner(self) -> T {
        match self {
            Resolution::Direct(entity) | Resolution::Redirected(entity) => entity,
        }
    }

    pub fn is_redirected(&self) -> bool {
        matches!(self, Resolution::Redirected(_))
    }
}

fn find_one<Q: EntityQuery>(
    session: &CatalogSession<'_>,
    query: &Q,
    column: &str,
    value: &dyn ToSql,
) -> Result<Option<Q::Entity>> {
    let sql = format!("{} WHERE e.{} = ?1", query.select_sql(), column);
    let mut stmt = session.prepare(&sql)?;
    Ok(stmt.query_row([value], Q::map_row).optional()?)
}

/// Resolve `gid` to an entity loaded with `query`.
///
/// The gid is expected to be well-formed already; it is not validated here.
/// Returns `None` if neither an entity nor a redirect matches, or if the
/// redirect points at an entity that no longer exists.
pub fn resolve_by_gid<Q: EntityQuery>(
    session: &CatalogSession<'_>,
    query: &Q,
    gid: &str,
) -> Result<Option<Resolution<Q::Entity>>> {
    if let Some(entity) = find_one(session, query, "gid", &gid)? {
        return Ok(Some(Resolution::Direct(entity)));
    }

    let redirect_sql = format!(
        "SELECT new_id FROM {} WHERE gid = ?1",
        <Q::Target as GidEntity>::REDIRECT_TABLE
    );
    let new_id: Option<i64> = session
        .prepare(&redirect_sql)?
        .query_row(params![gid], |r| r.get(0))
        .optional()?;

    let Some(new_id) = new_id else {
        return Ok(None);
    };

    debug!(
        "{} gid {} redirects to id {}",
        <Q::Target as GidEntity>::TABLE,
        gid,
        new_id
    );
    Ok(find_one(session, query, "id", &new_id)?.map(Resolution::Redirected))
}
