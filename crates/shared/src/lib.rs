//! Shared types, errors, and configuration for Payline.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error taxonomy with HTTP status mapping
//! - Token claims and the JWT issuer/verifier
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{TokenError, TokenService};
