// src/bin/catalog_admin.rs

use catalog_admin::transport::cli::{self, Cli};
use catalog_admin::Settings;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let settings = Settings::from_env()?;

    // Logs go to stderr so that tables on stdout stay clean.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "catalog_admin=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    tracing::debug!(base_url = %settings.api_base_url, page_size = settings.page_size.get(), "starting");

    if cli::run(args, settings).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
