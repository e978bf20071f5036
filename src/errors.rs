//! Error types for the failure paths the engine actually has.
//!
//! Only two things can fail here: starting a round (bad configuration) and
//! acquiring images (provider problems). Flipping, matching, and best-time
//! persistence are infallible by design; storage hiccups are logged and
//! swallowed at the store layer.

use thiserror::Error;

/// Failures while acquiring image locators from a provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The provider delivered fewer unique locators than requested.
    /// Partial results are never returned silently.
    #[error("provider returned {got} image locators, {wanted} required")]
    Insufficient { wanted: usize, got: usize },

    /// The provider rejected the credential.
    #[error("provider rejected the credential: {0}")]
    Unauthorized(String),

    /// Transport failure or an unexpected provider response.
    #[error("network failure: {0}")]
    Network(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

/// Failures surfaced to the caller of `start_game`.
///
/// Both variants abort the start attempt and leave the controller in the
/// menu state; neither is fatal to the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Missing or placeholder credential, or another precondition that is
    /// checked before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// The image provider failed; the round is abandoned.
    #[error("image acquisition failed: {0}")]
    Acquisition(#[from] SourceError),
}
