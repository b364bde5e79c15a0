//! Port traits for infrastructure boundaries.
//!
//! Storage is the only abstraction in the engine; everything else is a
//! concrete type. The player store can be swapped between the in-memory and
//! SQLite adapters without touching use cases.

mod error;
mod repos;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::PlayerRepo;

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::MockPlayerRepo;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
