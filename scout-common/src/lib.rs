//! Common types and utilities shared across the Lead Scout crates.
//!
//! This crate defines the lead domain model, observability helpers, and the
//! shared error type used throughout the workspace. It stays lightweight so
//! that every crate can depend on it without heavy transitive costs.
//!
//! # Overview
//!
//! - [`Lead`] and [`LeadColumn`]: the structured record the model extracts
//! - [`LeadCriteria`]: what the user asked for (sector, region, extras)
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`ScoutError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use scout_common::{LeadColumn, LeadCriteria};
//!
//! let criteria = LeadCriteria::new("IT-diensten", "Utrecht", "");
//! assert_eq!(criteria.region, "Utrecht");
//! assert_eq!(LeadColumn::ALL[0].header(), "Bedrijfsnaam");
//! ```

pub mod lead;
pub mod observability;

pub use lead::{Lead, LeadColumn, LeadCriteria};

/// Error types used by provider clients across the workspace.
#[derive(thiserror::Error, Debug)]
pub enum ScoutError {
    /// A remote provider (search, LLM) failed to complete a request.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation exceeded the configured timeout.
    #[error("Timeout occurred")]
    Timeout,
}

/// Convenient alias for results that use [`ScoutError`].
pub type Result<T> = std::result::Result<T, ScoutError>;
