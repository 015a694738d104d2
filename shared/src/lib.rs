//! Shared types for the Blinky marketplace
//!
//! Common types used across crates: the unified error system and the
//! order pipeline data models.

pub mod error;
pub mod models;
