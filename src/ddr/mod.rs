//! DDR API client.
//!
//! Looks up the archival objects attached to a person in the Densho Digital
//! Repository. Non-2xx answers are not errors here: the caller decides what
//! an upstream status means.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::config::DdrCredentials;
use crate::models::NrId;

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// Result of one DDR lookup.
#[derive(Debug, Clone)]
pub struct DdrObjects {
    /// Public page for the person.
    pub ui_url: String,
    /// API endpoint that was queried.
    pub api_url: String,
    pub status: StatusCode,
    /// Raw objects; empty unless the API answered 200 with a non-empty list.
    pub objects: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct NrIdResponse {
    #[serde(default)]
    objects: Option<Vec<Value>>,
}

/// Transport-level failures talking to the DDR API.
#[derive(Debug)]
pub enum DdrError {
    /// No answer within the configured timeout
    Timeout(String),
    /// Connection or protocol failure
    Unreachable(String),
    /// 200 answer whose body is not the expected JSON
    InvalidBody(String),
}

impl fmt::Display for DdrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DdrError::Timeout(msg) => write!(f, "DDR API timed out: {}", msg),
            DdrError::Unreachable(msg) => write!(f, "DDR API unreachable: {}", msg),
            DdrError::InvalidBody(msg) => write!(f, "DDR API returned invalid data: {}", msg),
        }
    }
}

impl std::error::Error for DdrError {}

impl From<reqwest::Error> for DdrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DdrError::Timeout(err.to_string())
        } else if err.is_decode() {
            DdrError::InvalidBody(err.to_string())
        } else {
            DdrError::Unreachable(err.to_string())
        }
    }
}

/// Client for the DDR person-objects endpoint.
pub struct DdrClient {
    client: reqwest::Client,
    ui_url: String,
    api_url: String,
    credentials: Option<DdrCredentials>,
}

impl DdrClient {
    pub fn new(
        ui_url: &str,
        api_url: &str,
        credentials: Option<DdrCredentials>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            client,
            ui_url: ui_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Public page for a person.
    pub fn ui_url(&self, nr_id: &NrId) -> String {
        format!("{}/nrid/{}/{}/", self.ui_url, nr_id.naan, nr_id.noid)
    }

    /// API endpoint listing a person's objects.
    pub fn api_url(&self, nr_id: &NrId) -> String {
        format!("{}/api/0.2/nrid/{}/{}/", self.api_url, nr_id.naan, nr_id.noid)
    }

    /// Fetch the objects linked to a person.
    pub async fn fetch(&self, nr_id: &NrId) -> Result<DdrObjects, DdrError> {
        let ui_url = self.ui_url(nr_id);
        let api_url = self.api_url(nr_id);

        let mut request = self.client.get(&api_url);
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%nr_id, %status, "DDR API answered");

        let mut objects = Vec::new();
        if status == StatusCode::OK {
            let body: NrIdResponse = response.json().await?;
            objects = body.objects.unwrap_or_default();
        }

        Ok(DdrObjects {
            ui_url,
            api_url,
            status,
            objects,
        })
    }
}
