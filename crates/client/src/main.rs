//! `damage-tool` binary.
//!
//! Resolves one shared damage or healing value across the selected tokens of
//! a JSON scene file and applies it as a single batch.
//!
//! # Examples
//!
//! ```bash
//! # Preview 8 damage, halving it for the second token
//! damage-tool preview -8 --tier 1=half
//!
//! # Heal everyone for 5, doubled
//! damage-tool apply 5 --tier all=double --store ./scene.json
//! ```

use anyhow::Result;
use clap::Parser;
use damage_client::cli::Cli;
use damage_runtime::RuntimeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RuntimeConfig::from_env();

    damage_client::run(cli, config, &mut std::io::stdout().lock()).await
}
