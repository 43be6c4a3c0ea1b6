//! CatalogStore trait definition.

use super::models::ReleaseDetails;
use anyhow::Result;

/// Trait for catalog storage backends.
///
/// Lookups return `Ok(None)` when the gid matches nothing, directly or
/// through a redirect. `Err` is reserved for failures of the catalog itself.
pub trait CatalogStore: Send + Sync {
    /// Get the full details view of a release.
    fn get_release_details(&self, gid: &str) -> Result<Option<ReleaseDetails>>;

    /// Get the canonical gid of a release, following a redirect if needed.
    fn resolve_release_gid(&self, gid: &str) -> Result<Option<String>>;

    /// Get the number of releases in the catalog.
    fn get_releases_count(&self) -> usize;
}
