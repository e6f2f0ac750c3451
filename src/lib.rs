//! Gramdash library
//!
//! Exposes the application modules for use in integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod speech;
pub mod view;
