//! Shared constants for end-to-end tests

/// Album used by the create scenarios.
pub const TEST_ALBUM_TITLE: &str = "test album";
pub const TEST_ALBUM_ARTIST: &str = "test artist";
pub const TEST_ALBUM_PRICE: f64 = 11.22;

// ============================================================================
// Timeouts
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
