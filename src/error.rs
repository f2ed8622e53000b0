//! Error types for the retrieval pipeline.
//!
//! None of these cross `Pipeline::retrieve`: provider and extraction errors
//! route to the fallback corpus, and selection errors become the error entry.

use thiserror::Error;

/// Failures talking to the generative text provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key configured, so the provider cannot be called at all
    #[error("provider API key is not configured")]
    MissingApiKey,

    /// Network errors, DNS failures, timeouts
    #[error("failed to reach provider: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("provider API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// The provider returned no usable text (e.g. blocked by safety filters)
    #[error("provider returned no text{}", .reason.as_ref().map(|r| format!(" ({r})")).unwrap_or_default())]
    EmptyResponse { reason: Option<String> },
}

/// The response extractor found nothing usable in a provider response
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no candidate texts found in provider response ({length} chars)")]
    NoCandidates { length: usize },
}

/// The fallback selector could not run
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("sample corpus has no texts for language '{language}'")]
    EmptyCorpus { language: String },
}
