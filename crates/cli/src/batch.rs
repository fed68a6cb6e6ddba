use std::io::Write;

use anyhow::Context;
use cwfetch_core::error::ErrorEnvelope;
use cwfetch_extractor::ExtractorRegistry;
use serde_json::Value;
use tracing::{error, info, warn};

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub resolved: usize,
    /// Unsupported URLs and failures reported by the site.
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.skipped == 0 && self.failed == 0
    }
}

/// Resolve each URL in order, writing one JSON document per URL to `out`.
///
/// A failing URL produces an error envelope and the batch moves on; only
/// write failures abort the run.
pub async fn run_batch<W: Write>(
    registry: &ExtractorRegistry,
    urls: &[String],
    pretty: bool,
    out: &mut W,
) -> anyhow::Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for url in urls {
        let doc = match registry.extract(url).await {
            Ok(desc) => {
                info!(id = %desc.id, title = %desc.title, "resolved");
                summary.resolved += 1;
                serde_json::to_value(&desc)?
            }
            Err(e) => {
                if e.is_expected() {
                    warn!(url = %url, error = %e, "skipped");
                    summary.skipped += 1;
                } else {
                    error!(url = %url, error = %e, "extraction failed");
                    summary.failed += 1;
                }
                serde_json::to_value(ErrorEnvelope::for_input(&e, url))?
            }
        };
        write_doc(out, &doc, pretty)?;
    }

    out.flush().context("failed to flush output")?;
    Ok(summary)
}

fn write_doc<W: Write>(out: &mut W, doc: &Value, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_json::to_string(doc)?
    };
    writeln!(out, "{text}").context("failed to write output")
}
