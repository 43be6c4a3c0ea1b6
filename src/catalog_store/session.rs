//! Per-request handle on the catalog.

use anyhow::Result;
use rusqlite::{CachedStatement, Connection};
use std::cell::Cell;

/// A catalog connection checked out for the duration of one request.
///
/// Every lookup a request performs goes through the same session, so the
/// whole chain of queries runs sequentially on one connection. The session
/// also counts the statements it hands out, which bounds the number of
/// round-trips a request costs.
pub struct CatalogSession<'a> {
    conn: &'a Connection,
    queries: Cell<usize>,
}

impl<'a> CatalogSession<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        CatalogSession {
            conn,
            queries: Cell::new(0),
        }
    }

    /// Prepare (or fetch from the statement cache) a query for execution.
    pub fn prepare(&self, sql: &str) -> Result<CachedStatement<'a>> {
        self.queries.set(self.queries.get() + 1);
        Ok(self.conn.prepare_cached(sql)?)
    }

    /// Number of queries issued through this session so far.
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }
}
