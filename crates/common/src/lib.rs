//! Shared utilities, configuration, and error handling for the TeachPortal client
//!
//! This crate provides common functionality used across the TeachPortal client:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Client-side field validators

pub mod config;
pub mod error;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use validation::{validate_email, validate_length, FieldErrors};
