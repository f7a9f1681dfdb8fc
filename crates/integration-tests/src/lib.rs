//! Integration tests for the Comforty catalog admin.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the admin with real store credentials in the environment
//! cargo run -p comforty-admin
//!
//! # Run the live tests against it
//! cargo test -p comforty-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running admin over HTTP (`ADMIN_BASE_URL`, default
//! `http://localhost:3001`) and exercise the real content store dataset, so
//! they are `#[ignore]`d by default. Use a throwaway dataset: the product
//! tests create and delete documents.
