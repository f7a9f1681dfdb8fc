//! Core types for the Comforty catalog.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod tags;

pub use id::*;
pub use tags::TagList;
