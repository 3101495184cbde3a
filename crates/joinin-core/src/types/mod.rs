//! Core type definitions used across the JoinIn workspace.

pub mod id;

pub use id::*;
