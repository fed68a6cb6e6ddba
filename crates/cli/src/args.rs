use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use cwfetch_extractor::ExtractorConfig;

/// Resolve CW video pages into media descriptors, one JSON document per line.
#[derive(Debug, Parser)]
#[command(name = "cwfetch", version)]
pub struct Args {
    /// Page URLs to resolve.
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Override the video-meta feed host (scheme and authority).
    #[arg(long, env = "CWFETCH_API_BASE")]
    pub api_base: Option<String>,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "CWFETCH_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,

    #[arg(long, env = "CWFETCH_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Pretty-print each JSON document.
    #[arg(long)]
    pub pretty: bool,

    /// Emit logs as JSON on stderr.
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// Environment defaults, then command-line overrides.
    pub fn extractor_config(&self) -> ExtractorConfig {
        let mut config = ExtractorConfig::from_env();
        if let Some(base) = &self.api_base {
            config.api_base = base.clone();
        }
        config.normalize()
    }

    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(self.timeout));
        if let Some(ua) = &self.user_agent {
            builder = builder.user_agent(ua.as_str());
        }
        builder.build().context("failed to build HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urls_and_flags() {
        let args = Args::try_parse_from([
            "cwfetch",
            "--api-base",
            "http://127.0.0.1:9000/",
            "--timeout",
            "5",
            "--pretty",
            "https://www.cwtv.com/shows/a/b/?play=d848488f-f62a-40fd-af1f-6440b1821aab",
        ])
        .unwrap();
        assert_eq!(args.urls.len(), 1);
        assert_eq!(args.timeout, 5);
        assert!(args.pretty);
        assert_eq!(args.extractor_config().api_base, "http://127.0.0.1:9000");
    }

    #[test]
    fn requires_at_least_one_url() {
        assert!(Args::try_parse_from(["cwfetch"]).is_err());
    }
}
