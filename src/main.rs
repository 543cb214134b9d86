use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::sync::Arc;

use umurage::api::{ContentService, HttpFetcher, QueryCache};
use umurage::core::config::{self, CliOverrides};
use umurage::core::content::ContentKind;

#[derive(Parser)]
#[command(name = "umurage", about = "Browse the Rwandan cultural heritage archive")]
struct Args {
    /// API origin, e.g. http://localhost:5000/api
    #[arg(long)]
    api_url: Option<String>,

    /// Content kind to open first
    #[arg(short, long, value_enum)]
    kind: Option<ContentKind>,

    /// Show every moderation status and the submissions queue
    #[arg(long)]
    admin: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config is read before the logger exists, so hold on to any error
    let (file_config, load_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (config::UmurageConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        api_url: args.api_url,
        kind: args.kind,
        admin: args.admin,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - writes to umurage.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("umurage.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = load_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!(
        "Umurage starting up: api={}, kind={:?}, audience={:?}",
        resolved.api_base_url,
        resolved.default_kind,
        resolved.audience
    );

    let fetcher = HttpFetcher::new(&resolved.api_base_url, resolved.timeout).map_err(|e| {
        log::error!("Cannot build API client: {}", e);
        std::io::Error::other(e)
    })?;
    let cache = Arc::new(QueryCache::new());
    let service = Arc::new(ContentService::new(Arc::new(fetcher), cache));

    umurage::tui::run(resolved, service)
}
