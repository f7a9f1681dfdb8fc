//! Catalog API Facade.
//!
//! The single data-access boundary between the admin and the content store:
//! every read query and every mutation for products, categories, and orders
//! goes through [`Catalog`]. GROQ lives only in this module, so the store's
//! query language never leaks into route handlers or templates.
//!
//! Writes take validated, already-coerced commands ([`NewProduct`],
//! [`ProductPatch`]); raw request parsing happens upstream in
//! `models::product_form`.

mod categories;
mod orders;
mod products;

pub use categories::{CategoryOption, CategorySummary};
pub use orders::{OrderItem, OrderSummary};
pub use products::{NewProduct, Product, ProductDocument, ProductPatch, ProductSummary};

use serde::{Deserialize, Deserializer};
use tracing::instrument;

use crate::config::SanityConfig;
use crate::sanity::{SanityClient, SanityError};

/// GROQ projections yield explicit `null` for attributes a document lacks;
/// fold both "absent" and "null" into the type's default.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Typed facade over the content store.
///
/// Cheap to clone; all clones share the underlying HTTP client.
#[derive(Clone)]
pub struct Catalog {
    sanity: SanityClient,
}

impl Catalog {
    /// Create a facade for the configured project and dataset.
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        Self {
            sanity: SanityClient::new(config),
        }
    }

    /// Cheap readiness probe: one minimal query round trip to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the request.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), SanityError> {
        let _: Option<Vec<serde_json::Value>> = self
            .sanity
            .query("*[_type == \"products\"][0...1]{_id}", &[])
            .await?;
        Ok(())
    }
}
