//! Integration test suite for docs-server
//!
//! End-to-end tests against documentation sites written to temporary
//! directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **render**: Library rendering from an on-disk site
//! - **cache_behavior**: Shared cache under concurrent requests
//! - **config**: Configuration discovery and loading
//! - **cli**: The `docs-server` binary

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cache_behavior;
mod cli;
mod config;
mod render;
