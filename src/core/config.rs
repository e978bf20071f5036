//! Engine and image-provider configuration.
//!
//! The credential for the image provider is process-wide configuration with
//! a defined lifecycle: resolved once from the environment at startup,
//! validated before any network call, never read ambiently from inside the
//! engine.

use std::env;
use std::time::Duration;

use crate::errors::GameError;

/// Default image provider endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.thecatapi.com";

/// Environment variable holding the image provider credential.
pub const API_KEY_ENV: &str = "CAT_API_KEY";

/// Header carrying the credential on provider requests.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Placeholder value that templates ship with; treated the same as a
/// missing credential.
const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Image-provider connection settings.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    /// Base URL of the provider.
    pub api_base: String,

    /// Access credential. `None` when unset in the environment.
    pub api_key: Option<String>,
}

impl SourceConfig {
    /// Create a config with an explicit base URL and credential.
    #[must_use]
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key,
        }
    }

    /// Resolve the credential from the environment, with the default base.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(DEFAULT_API_BASE, env::var(API_KEY_ENV).ok())
    }

    /// The validated credential.
    ///
    /// A missing, empty, or placeholder credential is a configuration error
    /// and must be surfaced before any network call.
    pub fn credential(&self) -> Result<&str, GameError> {
        match self.api_key.as_deref().map(str::trim) {
            None | Some("") => Err(GameError::Config(format!(
                "no image provider credential; set the {} environment variable",
                API_KEY_ENV
            ))),
            Some(PLACEHOLDER_API_KEY) => Err(GameError::Config(format!(
                "the {} credential is still the placeholder value",
                API_KEY_ENV
            ))),
            Some(key) => Ok(key),
        }
    }
}

/// Engine settings.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// How long a mismatched pair stays visible before closing.
    pub mismatch_delay: Duration,

    /// Shuffle seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mismatch_delay: Duration::from_millis(1000),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Override the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the mismatch delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_is_config_error() {
        let config = SourceConfig::new(DEFAULT_API_BASE, None);
        let err = config.credential().unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_empty_credential_is_config_error() {
        let config = SourceConfig::new(DEFAULT_API_BASE, Some("   ".to_string()));
        assert!(config.credential().is_err());
    }

    #[test]
    fn test_placeholder_credential_is_config_error() {
        let config = SourceConfig::new(DEFAULT_API_BASE, Some("your-api-key-here".to_string()));
        let err = config.credential().unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_valid_credential_passes() {
        let config = SourceConfig::new(DEFAULT_API_BASE, Some("live_abc123".to_string()));
        assert_eq!(config.credential().unwrap(), "live_abc123");
    }

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.mismatch_delay, Duration::from_millis(1000));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_game_config_builders() {
        let config = GameConfig::default()
            .with_seed(42)
            .with_mismatch_delay(Duration::from_millis(250));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.mismatch_delay, Duration::from_millis(250));
    }
}
