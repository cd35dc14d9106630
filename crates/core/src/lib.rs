//! Online Shop Core - Shared types library.
//!
//! This crate provides the types shared by every online shop component:
//! - `api` - REST backend for customers, addresses, categories, products and wish lists
//! - `cli` - Command-line tools for migrations and sample data
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and the category status
//! - [`dto`] - Transfer objects exchanged over the API
//! - [`validation`] - Field-level constraints checked at the API boundary
//! - [`criteria`] - Per-field filters for dynamic queries
//! - [`page`] - Page requests and pages of results

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod criteria;
pub mod dto;
pub mod page;
pub mod types;
pub mod validation;

pub use types::*;
