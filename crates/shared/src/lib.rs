//! Roster Protocol - Wire types for the player REST API
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, chrono and the domain vocabulary
//! 2. **No business logic** - Pure data types and conversions
//! 3. **No domain IDs** - raw `i64` ids and epoch-millisecond timestamps on the wire

pub mod player;

pub use player::{PlayerPayload, PlayerResponse};
