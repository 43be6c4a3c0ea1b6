//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (catalog gids, names, etc.), update only this file.

// ============================================================================
// Test Catalog Gids
// ============================================================================

/// "Live at the Test Hall": two CDs, every optional label recorded
pub const RELEASE_1_GID: &str = "3f1d5c8e-6a5b-4c8f-9d3e-2b7a1c4e9f01";

/// Superseded gid that redirects to release 1
pub const RELEASE_1_OLD_GID: &str = "9a0b7e64-2f3c-4d1e-8b5a-6c7d8e9f0a12";

/// "Side by Side": one vinyl, no optional labels, numbered A1/A2/B1
pub const RELEASE_2_GID: &str = "c2e4f6a8-1b3d-4f5a-8c7e-9d0b2a4c6e83";

/// Redirect whose target release no longer exists
pub const DANGLING_REDIRECT_GID: &str = "5e6f7a8b-9c0d-4e1f-a2b3-c4d5e6f7a8b9";

/// Well-formed gid that matches nothing in the catalog
pub const UNKNOWN_GID: &str = "00000000-0000-4000-8000-000000000000";

/// Release group of release 1
pub const RELEASE_GROUP_1_GID: &str = "e1d2c3b4-a596-4877-8899-aabbccddeeff";

/// Release group of release 2
pub const RELEASE_GROUP_2_GID: &str = "f0e1d2c3-b4a5-4968-8778-99aabbccddee";

/// First track of release 1, first CD
pub const TRACK_1_GID: &str = "11111111-1111-4111-8111-111111111111";

// ============================================================================
// Test Catalog Metadata
// ============================================================================

pub const RELEASE_1_NAME: &str = "Live at the Test Hall";

pub const RELEASE_2_NAME: &str = "Side by Side";

pub const RELEASE_GROUP_1_NAME: &str = "Live at the Test Hall";

pub const RELEASE_GROUP_2_NAME: &str = "Side by Side";

pub const TRACK_1_NAME: &str = "Opening";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
