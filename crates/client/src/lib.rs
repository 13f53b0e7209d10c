//! Operator front end for the damage resolution engine.
//!
//! The binary parses a [`cli::Cli`], opens a session on the configured store,
//! applies the requested tiers and either previews or commits the batch.
pub mod cli;
pub mod render;

use std::io::Write;

use anyhow::{Context, Result, bail};
use damage_core::{ResolutionSession, TokenId};
use damage_runtime::{ResolutionService, RuntimeConfig};

use crate::cli::{Cli, Command, ResolveArgs, TierAssignment, TierTarget};

/// Execute `cli` against the store described by `config`, writing the
/// result to `out`.
pub async fn run<W: Write>(cli: Cli, mut config: RuntimeConfig, out: &mut W) -> Result<()> {
    if let Some(path) = cli.store {
        config.store_path = path;
    }
    tracing::debug!(store = %config.store_path.display(), "using scene file");

    let service = ResolutionService::file_backed(&config);
    match cli.command {
        Command::Preview(args) => {
            let session = open(&service, &args).await?;
            let tokens = session.preview();
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &tokens)?;
                writeln!(out)?;
            } else {
                render::write_table(out, session.raw_delta(), &tokens, false)?;
            }
            session.cancel();
        }
        Command::Apply(args) => {
            let session = open(&service, &args).await?;
            let raw_delta = session.raw_delta();
            let report = service
                .commit(session)
                .await
                .context("batch was not applied")?;
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &report.tokens)?;
                writeln!(out)?;
            } else {
                render::write_table(out, raw_delta, &report.tokens, true)?;
            }
        }
    }
    Ok(())
}

async fn open(service: &ResolutionService, args: &ResolveArgs) -> Result<ResolutionSession> {
    let mut session = if args.select.is_empty() {
        service.open_session().await?
    } else {
        let ids: Vec<TokenId> = args
            .select
            .iter()
            .map(|id| TokenId::from(id.as_str()))
            .collect();
        service.open_session_for(&ids).await?
    };

    session.set_delta_input(&args.delta);
    apply_tiers(&mut session, &args.tiers)?;
    Ok(session)
}

/// Apply `--tier` flags in order; later flags win.
fn apply_tiers(session: &mut ResolutionSession, tiers: &[TierAssignment]) -> Result<()> {
    for assignment in tiers {
        match assignment.target {
            TierTarget::All => {
                for index in 0..session.len() {
                    session.set_tier(index, assignment.tier);
                }
            }
            TierTarget::Index(index) => {
                if index >= session.len() {
                    bail!(
                        "tier index {index} is out of range, session has {} token(s)",
                        session.len()
                    );
                }
                session.set_tier(index, assignment.tier);
            }
        }
    }
    Ok(())
}
