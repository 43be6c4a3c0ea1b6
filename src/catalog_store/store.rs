//! SQLite-backed catalog store implementation.
//!
//! This module provides the `SqliteCatalogStore` which serves release lookups
//! from a MusicBrainz-style catalog database.

use super::assembler::{assemble_release, PlainReleaseQuery};
use super::models::ReleaseDetails;
use super::resolver::resolve_by_gid;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::session::CatalogSession;
use super::trait_def::CatalogStore;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{anyhow, bail, Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

/// SQLite-backed release catalog.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    read_index: Arc<AtomicUsize>,
}

/// Check that an existing database is a catalog we know how to read.
fn validate_schema(conn: &Connection) -> Result<()> {
    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;
    if table_count == 0 {
        bail!("Database has no tables, it is not a catalog db");
    }

    let latest_version = CATALOG_VERSIONED_SCHEMAS.len() - 1;
    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if db_version < BASE_DB_VERSION as i64 {
        bail!(
            "Database has user_version {}, it does not look like a catalog db",
            db_version
        );
    }
    let version = (db_version - BASE_DB_VERSION as i64) as usize;
    let Some(schema) = CATALOG_VERSIONED_SCHEMAS.get(version) else {
        bail!(
            "Catalog db version {} is newer than the latest known version {}",
            version,
            latest_version
        );
    };
    schema
        .validate(conn)
        .with_context(|| format!("Catalog db does not match schema version {}", version))
}

/// Open an existing catalog file. Writes are rejected on the connection.
fn open_catalog_conn(db_path: &Path) -> Result<Connection> {
    // Not SQLITE_OPEN_READ_ONLY: readers of a WAL db need to be able
    // to create the -shm file. query_only rejects writes instead.
    let conn = Connection::open_with_flags(
        db_path,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
            | rusqlite::OpenFlags::SQLITE_OPEN_URI
            | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("Failed to open catalog database {:?}", db_path))?;
    conn.pragma_update(None, "query_only", true)?;
    Ok(conn)
}

impl SqliteCatalogStore {
    /// Open the catalog at `db_path`.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `read_pool_size` - Number of connections for concurrent lookups (default: 4)
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path_ref = db_path.as_ref();
        if read_pool_size == 0 {
            bail!("Read pool size must be at least 1");
        }

        let setup_conn = open_catalog_conn(db_path_ref)?;
        validate_schema(&setup_conn)?;

        let release_count: i64 =
            setup_conn.query_row("SELECT COUNT(*) FROM release", [], |r| r.get(0))?;
        let track_count: i64 =
            setup_conn.query_row("SELECT COUNT(*) FROM track", [], |r| r.get(0))?;
        info!(
            "Opened catalog {:?}: {} releases, {} tracks",
            db_path_ref, release_count, track_count
        );
        drop(setup_conn);

        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            read_pool.push(Arc::new(Mutex::new(open_catalog_conn(db_path_ref)?)));
        }

        Ok(SqliteCatalogStore {
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    /// Run `f` against a session on one pooled connection.
    ///
    /// The connection stays checked out until `f` returns, so every query of
    /// one lookup runs on it in order.
    pub fn with_session<T>(&self, f: impl FnOnce(&CatalogSession<'_>) -> Result<T>) -> Result<T> {
        let conn = self.get_read_conn();
        let conn = conn
            .lock()
            .map_err(|_| anyhow!("Catalog connection mutex poisoned"))?;
        let session = CatalogSession::new(&conn);
        f(&session)
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn get_release_details(&self, gid: &str) -> Result<Option<ReleaseDetails>> {
        self.with_session(|session| assemble_release(session, gid))
    }

    fn resolve_release_gid(&self, gid: &str) -> Result<Option<String>> {
        self.with_session(|session| {
            Ok(resolve_by_gid(session, &PlainReleaseQuery, gid)?
                .map(|resolution| resolution.into_inner().gid))
        })
    }

    fn get_releases_count(&self) -> usize {
        self.with_session(|session| {
            let count: i64 = session
                .prepare("SELECT COUNT(*) FROM release")?
                .query_row([], |r| r.get(0))?;
            Ok(count as usize)
        })
        .unwrap_or(0)
    }
}
