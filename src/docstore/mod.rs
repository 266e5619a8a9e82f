//! Elasticsearch docstore client.
//!
//! Point lookups of Irei records by ID. Nothing is cached and nothing is
//! retried: a miss or a failure is reported straight to the caller.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::MODEL;

/// Prefix shared by all indices of the names database.
pub const INDEX_PREFIX: &str = "names";

/// Read-only client for the record index.
pub struct Docstore {
    client: reqwest::Client,
    host: String,
    index: String,
}

impl Docstore {
    pub fn new(host: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            index: format!("{}{}", INDEX_PREFIX, MODEL),
        })
    }

    /// Name of the index records are read from.
    pub fn index(&self) -> &str {
        &self.index
    }

    fn document_url(&self, irei_id: &str) -> String {
        format!("{}/{}/_doc/{}", self.host, self.index, irei_id)
    }

    /// Fetch a record hit by ID.
    ///
    /// Returns `Ok(None)` when the document (or the whole index) is missing.
    pub async fn get(&self, irei_id: &str) -> Result<Option<Value>, AppError> {
        let unavailable = |reason: String| {
            tracing::error!(irei_id, index = %self.index, "Docstore error: {}", reason);
            AppError::Docstore {
                irei_id: irei_id.to_string(),
                reason,
            }
        };

        let response = self
            .client
            .get(self.document_url(irei_id))
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let hit: Value = response
                    .json()
                    .await
                    .map_err(|e| unavailable(e.to_string()))?;
                if hit.get("found").and_then(Value::as_bool) == Some(false) {
                    return Ok(None);
                }
                Ok(Some(hit))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(unavailable(format!("unexpected status {}", status))),
        }
    }
}
