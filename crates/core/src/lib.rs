//! Core business logic for Payline.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies.
//!
//! # Modules
//!
//! - `auth` - Password hashing pipeline
//! - `currency` - Cross-currency amount conversion

pub mod auth;
pub mod currency;
