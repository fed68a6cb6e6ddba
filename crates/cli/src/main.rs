use std::process::ExitCode;

use clap::Parser;
use cwfetch_cli::args::Args;
use cwfetch_cli::batch::run_batch;
use cwfetch_extractor::ExtractorRegistry;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only JSON documents.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = args.extractor_config();
    info!(api_base = %config.api_base, urls = args.urls.len(), "resolving");

    let client = args.http_client()?;
    let registry = ExtractorRegistry::with_defaults(config, client);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = run_batch(&registry, &args.urls, args.pretty, &mut out).await?;

    info!(
        resolved = summary.resolved,
        skipped = summary.skipped,
        failed = summary.failed,
        "batch complete"
    );

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
