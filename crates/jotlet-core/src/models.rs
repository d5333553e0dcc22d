//! Domain models for Jotlet.
//!
//! These are the core types shared across all crates.

pub mod note;
pub mod tenant;
pub mod user;
