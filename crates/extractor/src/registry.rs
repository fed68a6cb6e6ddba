//! Extractor registry.
//!
//! Dispatch rules:
//! 1. Entries are tried in ascending priority.
//! 2. Equal priorities keep registration order.
//! 3. The first extractor whose pattern matches handles the URL.

use tracing::debug;

use cwfetch_core::{ExtractError, MediaDescriptor};

use crate::ExtractorConfig;
use crate::cwtv::CwtvExtractor;
use crate::extractor::Extractor;

/// Priority for site-specific extractors.
pub const DEFAULT_PRIORITY: i32 = 100;

struct Entry {
    priority: i32,
    extractor: Box<dyn Extractor>,
}

#[derive(Default)]
pub struct ExtractorRegistry {
    entries: Vec<Entry>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in extractor, sharing one HTTP client.
    pub fn with_defaults(config: ExtractorConfig, client: reqwest::Client) -> Self {
        let mut registry = Self::new();
        registry.register(
            DEFAULT_PRIORITY,
            Box::new(CwtvExtractor::with_client(config, client)),
        );
        registry
    }

    pub fn register(&mut self, priority: i32, extractor: Box<dyn Extractor>) {
        let pos = self.entries.partition_point(|e| e.priority <= priority);
        self.entries.insert(
            pos,
            Entry {
                priority,
                extractor,
            },
        );
    }

    /// Extractor names in dispatch order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.extractor.name()).collect()
    }

    pub fn find(&self, url: &str) -> Option<&dyn Extractor> {
        self.entries
            .iter()
            .map(|e| e.extractor.as_ref())
            .find(|x| x.suitable(url))
    }

    pub async fn extract(&self, url: &str) -> Result<MediaDescriptor, ExtractError> {
        let extractor = self
            .find(url)
            .ok_or_else(|| ExtractError::Unsupported(url.to_string()))?;
        debug!(extractor = extractor.name(), url, "dispatching");
        extractor.extract(url).await
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("extractors", &self.names())
            .finish()
    }
}
