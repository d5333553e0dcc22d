//! Jotlet Core — domain models, shared error types, and repository
//! trait definitions for the multi-tenant note service.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{Error, Result};
