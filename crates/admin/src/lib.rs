//! Comforty Catalog Admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! This crate holds a write-capable content store token. Only deploy it on
//! internal infrastructure; it has no authentication layer of its own.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod routes;
pub mod sanity;
pub mod state;
