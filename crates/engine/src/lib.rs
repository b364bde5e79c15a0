//! Roster engine library.
//!
//! Server-side code for the player registry.
//!
//! ## Structure
//!
//! - `use_cases/` - Player management (validation, progression, store calls)
//! - `infrastructure/` - Configuration, storage port and its adapters
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
