use cwfetch_core::{ExtractError, MediaDescriptor};

/// A site extractor that can recognize and resolve page URLs.
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Stable key identifying this extractor, e.g. `CWTV`.
    fn name(&self) -> &str;

    /// Whether `url` is a page this extractor understands.
    fn suitable(&self, url: &str) -> bool;

    /// Resolve a page URL into a media descriptor.
    ///
    /// Returns [`ExtractError::Unsupported`] when `url` is not suitable.
    async fn extract(&self, url: &str) -> Result<MediaDescriptor, ExtractError>;
}
