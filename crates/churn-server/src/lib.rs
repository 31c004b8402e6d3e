//! Churn prediction HTTP server library
//!
//! Exposes the router and its state so the API can be driven in-process.

pub mod api;
pub mod config;
pub mod error;
pub mod loader;
