#![doc = "Submitter implementations for the CLI: the HTTP client for the release-notes admin API and a print-only dry run."]
//
//! # Submitters
//!
//! Bridges the core [`Submitter`] trait to real destinations.
//!
//! - [`ReleaseNotesClient`] POSTs each payload as JSON to the admin endpoint
//!   and reads the echoed `header` back from the response.
//! - [`DryRunSubmitter`] prints each payload as pretty JSON on stdout and
//!   never touches the network.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use releasenotes_core::contract::{SubmitError, SubmittedNote, Submitter};
use releasenotes_core::format::ReleaseNotePayload;

/// Subset of the admin API's response we care about.
#[derive(Debug, Deserialize)]
struct ReleaseNoteResponse {
    #[serde(default)]
    header: Option<String>,
}

pub struct ReleaseNotesClient {
    endpoint: String,
    client: Client,
}

impl ReleaseNotesClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        tracing::info!(endpoint = %endpoint, "Initialized ReleaseNotesClient");
        Self {
            endpoint,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Submitter for ReleaseNotesClient {
    async fn submit(&self, payload: &ReleaseNotePayload) -> Result<SubmittedNote, SubmitError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            header = %payload.header,
            "Posting release note"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, endpoint = %self.endpoint, "Transport error posting release note");
                SubmitError::Transport(e.to_string())
            })?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
                request_body: serde_json::to_string(payload).unwrap_or_default(),
                response_body,
            });
        }

        let parsed: ReleaseNoteResponse = serde_json::from_str(&response_body).map_err(|e| {
            tracing::error!(error = %e, body = %response_body, "Release-notes API returned non-JSON body");
            SubmitError::Decode(e.to_string())
        })?;

        Ok(SubmittedNote {
            header: parsed.header,
        })
    }
}

/// Prints payloads instead of sending them.
#[derive(Debug, Default)]
pub struct DryRunSubmitter;

#[async_trait]
impl Submitter for DryRunSubmitter {
    async fn submit(&self, payload: &ReleaseNotePayload) -> Result<SubmittedNote, SubmitError> {
        let json = serde_json::to_string_pretty(payload)
            .map_err(|e| SubmitError::Decode(e.to_string()))?;
        println!("{json}");
        Ok(SubmittedNote {
            header: Some(payload.header.clone()),
        })
    }
}
