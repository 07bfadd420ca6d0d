//! Shared types, errors, and configuration for Tidemark.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for vessels, organizations, voyages, pools and ledger entries
//! - Closed fuel classification enums
//! - Integer gram quantities for ledger amounts
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
