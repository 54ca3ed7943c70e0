//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling for credential and storage failures
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt, StorageError, StorageResult};
