//! Low-level content store client: GROQ queries and mutations.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::instrument;

use crate::config::SanityConfig;

use super::SanityError;

/// A single mutation in a mutate request.
///
/// Serializes to the store's externally-tagged wire form, e.g.
/// `{"create": {...}}` or `{"patch": {"id": "...", "set": {...}}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutation {
    /// Create a new document; the store assigns `_id` when absent.
    Create(Value),
    /// Partial-field merge into an existing document.
    Patch(PatchMutation),
    /// Delete a document by ID.
    Delete(DeleteById),
}

impl Mutation {
    /// Build a `patch` mutation setting only the given fields.
    #[must_use]
    pub fn patch_set(id: impl Into<String>, set: serde_json::Map<String, Value>) -> Self {
        Self::Patch(PatchMutation {
            id: id.into(),
            set,
        })
    }

    /// Build a `delete` mutation for the given document ID.
    #[must_use]
    pub fn delete(id: impl Into<String>) -> Self {
        Self::Delete(DeleteById { id: id.into() })
    }
}

/// Body of a `patch` mutation: the target ID and the fields to set.
#[derive(Debug, Clone, Serialize)]
pub struct PatchMutation {
    /// Target document ID.
    pub id: String,
    /// Fields to merge into the document. Absent fields are left unchanged.
    pub set: serde_json::Map<String, Value>,
}

/// Body of a `delete` mutation.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteById {
    /// Target document ID.
    pub id: String,
}

/// Response from the mutation endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResponse {
    /// Transaction ID assigned by the store.
    pub transaction_id: Option<String>,
    /// Per-mutation results. Empty when nothing was affected.
    #[serde(default)]
    pub results: Vec<MutateResult>,
}

/// One result entry from a mutate call.
#[derive(Debug, Deserialize)]
pub struct MutateResult {
    /// ID of the affected document.
    pub id: String,
    /// Operation performed (`create`, `update`, `delete`).
    pub operation: Option<String>,
    /// The resulting document, when `returnDocuments` is requested.
    #[serde(default)]
    pub document: Option<Value>,
}

/// GROQ query response envelope.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

/// Error envelope returned by the store on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    description: Option<String>,
}

/// Content store HTTP client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct SanityClient {
    inner: Arc<SanityClientInner>,
}

struct SanityClientInner {
    client: reqwest::Client,
    /// Versioned API base, e.g. `https://{project}.api.sanity.io/v2024-01-01`
    base_url: String,
    dataset: String,
    token: String,
}

impl SanityClient {
    /// Create a new client for the configured project and dataset.
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        let base_url = format!(
            "https://{}.api.sanity.io/v{}",
            config.project_id, config.api_version
        );

        Self {
            inner: Arc::new(SanityClientInner {
                client: reqwest::Client::new(),
                base_url,
                dataset: config.dataset.clone(),
                token: config.token.expose_secret().to_string(),
            }),
        }
    }

    /// Run a GROQ query with optional `$name` parameter bindings.
    ///
    /// Parameter values are JSON-encoded into the query string, so string
    /// bindings arrive quoted the way the store expects.
    ///
    /// Returns `None` when the query result is `null` (e.g. a `[0]`
    /// projection with no match).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store reports an error.
    #[instrument(skip(self, params), fields(dataset = %self.inner.dataset))]
    pub async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, Value)],
    ) -> Result<Option<T>, SanityError> {
        let url = format!("{}/data/query/{}", self.inner.base_url, self.inner.dataset);

        let mut pairs: Vec<(String, String)> = vec![("query".to_string(), groq.to_string())];
        for (name, value) in params {
            pairs.push((format!("${name}"), serde_json::to_string(value)?));
        }

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.token)
            .query(&pairs)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let envelope: QueryResponse<T> = response.json().await?;
        Ok(envelope.result)
    }

    /// Commit a batch of mutations atomically, returning resulting documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects the
    /// transaction.
    #[instrument(skip(self, mutations), fields(dataset = %self.inner.dataset, count = mutations.len()))]
    pub async fn mutate(&self, mutations: &[Mutation]) -> Result<MutateResponse, SanityError> {
        let url = format!("{}/data/mutate/{}", self.inner.base_url, self.inner.dataset);

        let body = serde_json::json!({ "mutations": mutations });

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.token)
            .query(&[("returnDocuments", "true")])
            .json(&body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Turn non-success responses into `SanityError::Api` with the store's
    /// error description when one is present.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SanityError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error.description)
            .unwrap_or(body);

        Err(SanityError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_mutation_wire_form() {
        let mutation = Mutation::Create(json!({"_type": "products", "title": "Chair"}));
        let wire = serde_json::to_value(&mutation).unwrap();
        assert_eq!(
            wire,
            json!({"create": {"_type": "products", "title": "Chair"}})
        );
    }

    #[test]
    fn test_patch_mutation_wire_form() {
        let mut set = serde_json::Map::new();
        set.insert("title".to_string(), json!("New title"));

        let mutation = Mutation::patch_set("prod-1", set);
        let wire = serde_json::to_value(&mutation).unwrap();
        assert_eq!(
            wire,
            json!({"patch": {"id": "prod-1", "set": {"title": "New title"}}})
        );
    }

    #[test]
    fn test_delete_mutation_wire_form() {
        let mutation = Mutation::delete("prod-1");
        let wire = serde_json::to_value(&mutation).unwrap();
        assert_eq!(wire, json!({"delete": {"id": "prod-1"}}));
    }

    #[test]
    fn test_mutate_response_parses_results() {
        let body = json!({
            "transactionId": "abc123",
            "results": [
                {"id": "prod-1", "operation": "update", "document": {"_id": "prod-1"}}
            ]
        });
        let response: MutateResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.transaction_id.as_deref(), Some("abc123"));
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].operation.as_deref(), Some("update"));
    }

    #[test]
    fn test_mutate_response_tolerates_empty_results() {
        let body = json!({"transactionId": "abc123"});
        let response: MutateResponse = serde_json::from_value(body).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_query_response_null_result() {
        let envelope: QueryResponse<Vec<String>> =
            serde_json::from_str(r#"{"ms": 3, "result": null}"#).unwrap();
        assert!(envelope.result.is_none());
    }
}
