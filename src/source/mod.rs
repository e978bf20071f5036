//! Image acquisition.
//!
//! The remote image-search service is an opaque external data source that
//! hands back a list of image locators. `ImageSource` is the seam: the
//! controller asks for exactly `count` unique locators and either gets them
//! or gets a typed failure. Partial results are never returned silently.

use async_trait::async_trait;

use crate::core::CardValue;
use crate::errors::{GameError, SourceError};

pub mod cat_api;
pub mod fixed;

pub use cat_api::CatApiSource;
pub use fixed::FixedImageSource;

/// Opaque locator for one image, typically a URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageLocator(String);

impl ImageLocator {
    /// Create a new locator.
    #[must_use]
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// The raw locator string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ImageLocator> for CardValue {
    fn from(locator: ImageLocator) -> Self {
        CardValue::new(locator.0)
    }
}

/// Provider of unique image locators.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Check static preconditions (credentials and the like) before any
    /// network traffic. The default has none.
    fn validate(&self) -> Result<(), GameError> {
        Ok(())
    }

    /// Fetch exactly `count` unique locators.
    ///
    /// Implementations must fail with [`SourceError::Insufficient`] rather
    /// than return fewer.
    async fn fetch_values(&self, count: usize) -> Result<Vec<ImageLocator>, SourceError>;
}

#[async_trait]
impl ImageSource for Box<dyn ImageSource> {
    fn validate(&self) -> Result<(), GameError> {
        (**self).validate()
    }

    async fn fetch_values(&self, count: usize) -> Result<Vec<ImageLocator>, SourceError> {
        (**self).fetch_values(count).await
    }
}
