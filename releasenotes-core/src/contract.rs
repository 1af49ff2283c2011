//! # contract: the submission boundary
//!
//! The core never talks HTTP itself. Everything that leaves the process goes
//! through the [`Submitter`] trait, implemented by the CLI's HTTP client, by
//! its print-only dry-run submitter, and by `mockall` mocks in tests.
//!
//! ## Mocking & Testing
//! - With the `test-export-mocks` feature (on by default) the trait is annotated
//!   with `automock`, so downstream crates get `MockSubmitter` as well.
//!
//! ## Error handling
//! - A failed submission is reported as a [`SubmitError`]. Callers decide what
//!   to do with it; the directory processor logs it and moves on to the next note.

use async_trait::async_trait;
use thiserror::Error;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::format::ReleaseNotePayload;

/// What the destination answered for an accepted note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedNote {
    /// `header` echoed back by the service, if it sent one.
    pub header: Option<String>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The service answered with a non-2xx status.
    #[error("release-notes API returned {status}: {response_body}")]
    Status {
        status: u16,
        request_body: String,
        response_body: String,
    },
    /// The request never got a response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response could not be read as JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Sends one formatted note to its destination.
///
/// Implementations must not retry; one call is one attempt.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: &ReleaseNotePayload) -> Result<SubmittedNote, SubmitError>;
}
