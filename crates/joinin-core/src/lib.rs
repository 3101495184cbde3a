//! # joinin-core
//!
//! Core crate for the JoinIn coordination engine. Contains configuration
//! schemas, typed identifiers, domain events, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other JoinIn crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
