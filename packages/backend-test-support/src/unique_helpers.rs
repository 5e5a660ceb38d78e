//! Helpers for generating unique test data
//!
//! Ids and display names built here never collide across tests, so suites
//! that share a store can run concurrently without stepping on each other.

use uuid::Uuid;

/// Generate a unique string with the given prefix, e.g. `player-1f3a…`.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Generate a short unique display name with the given prefix.
///
/// Uses the first eight hex digits of a fresh UUID, which keeps log lines
/// readable while remaining unique for test purposes.
pub fn unique_name(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &id[..8])
}
