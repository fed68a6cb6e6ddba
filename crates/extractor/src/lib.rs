pub mod cwtv;
pub mod extractor;
pub mod registry;

pub use cwtv::CwtvExtractor;
pub use extractor::Extractor;
pub use registry::ExtractorRegistry;

const DEFAULT_API_BASE: &str = "https://images.cwtv.com";
const DEFAULT_FALLBACK_MEDIA_BASE: &str = "https://link.theplatform.com/s/cwtv/media/guid/2703454149";

/// Endpoint configuration for the extractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Scheme and host of the video-meta feed, without trailing slash.
    pub api_base: String,
    /// Media URL prefix used when a document carries no `mpx_url`.
    pub fallback_media_base: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            fallback_media_base: DEFAULT_FALLBACK_MEDIA_BASE.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Defaults overlaid with `CWFETCH_API_BASE` and `CWFETCH_FALLBACK_MEDIA_BASE`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("CWFETCH_API_BASE") {
            config.api_base = v;
        }
        if let Ok(v) = std::env::var("CWFETCH_FALLBACK_MEDIA_BASE") {
            config.fallback_media_base = v;
        }
        config.normalize()
    }

    /// Strip trailing slashes so paths can be appended with `/`.
    pub fn normalize(mut self) -> Self {
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        self.fallback_media_base = self.fallback_media_base.trim_end_matches('/').to_string();
        self
    }
}
