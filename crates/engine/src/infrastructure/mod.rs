//! Infrastructure implementations.
//!
//! Contains configuration loading and the player storage adapters behind
//! the [`ports::PlayerRepo`] trait.

pub mod config;
pub mod persistence;
pub mod ports;
