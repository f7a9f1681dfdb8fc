//! Comforty Core - Shared types library.
//!
//! This crate provides common types used across the Comforty admin components:
//! - `admin` - Catalog administration panel
//! - `integration-tests` - End-to-end tests against a running admin
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe document IDs and tag lists

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
