//! Content store (Sanity) HTTP API client.
//!
//! # Security
//!
//! **This module holds the write-capable dataset token.** The admin must only
//! run on trusted, internal infrastructure.
//!
//! # Architecture
//!
//! - GROQ queries via `GET /v{version}/data/query/{dataset}` with `$param`
//!   bindings passed as JSON-encoded query-string values
//! - Writes via `POST /v{version}/data/mutate/{dataset}` using
//!   `create` / `patch` / `delete` mutations, committed atomically per request
//! - Bearer token authentication on every call
//! - No retries and no client-side timeouts: every operation is one
//!   request/response round trip, consistency is delegated to the store
//!
//! # Example
//!
//! ```rust,ignore
//! use comforty_admin::sanity::{Mutation, SanityClient};
//!
//! let client = SanityClient::new(&config.sanity);
//!
//! // Query documents
//! let titles: Option<Vec<String>> = client
//!     .query("*[_type == \"products\"].title", &[])
//!     .await?;
//!
//! // Delete a document
//! client.mutate(&[Mutation::delete("prod-123")]).await?;
//! ```

mod client;
pub mod types;

pub use client::{MutateResponse, MutateResult, Mutation, PatchMutation, SanityClient};
pub use types::{ImageField, Reference};

use thiserror::Error;

/// Errors that can occur when talking to the content store.
#[derive(Debug, Error)]
pub enum SanityError {
    /// HTTP request failed (network, TLS, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-success status.
    #[error("Store API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the store.
        status: u16,
        /// Error description from the store, or the raw body.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
