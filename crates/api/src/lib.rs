//! Online Shop API library.
//!
//! REST backend for customers, addresses, wish lists, categories and
//! products, built as a library so the binary, the CLI and the tests share
//! one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod headers;
pub mod mapper;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
