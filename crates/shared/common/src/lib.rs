//! Common utilities shared across services.
//!
//! This crate provides:
//! - Unified error handling for the identity aggregates
//! - Database configuration

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, LookupKey};
