//! Infrastructure layer - concurrency primitives shared across requests.

pub mod game_locks;

pub use game_locks::GameLocks;
