//! Shared types, configuration, and email service for Sabliere.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Configuration management
//! - Email service for receipt delivery

pub mod config;
pub mod email;
pub mod types;

pub use config::AppConfig;
pub use email::{EmailError, EmailService};
