//! Command line definition for `damage-tool`.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use damage_core::ScalingTier;

/// Apply one health change to many tokens at once
#[derive(Debug, Parser)]
#[command(name = "damage-tool")]
#[command(about = "Resolve and apply a shared damage or healing value", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON scene file (overrides DAMAGE_TOOL_STORE)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show what the change would do without writing anything
    Preview(ResolveArgs),

    /// Resolve the change and write it to every token in one batch
    Apply(ResolveArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Health change: negative for damage, positive for healing.
    /// Decimals are truncated toward zero; anything unparseable counts as 0.
    #[arg(allow_hyphen_values = true)]
    pub delta: String,

    /// Scaling tier per token, as INDEX=TIER or all=TIER (TIER: none, half, full, double)
    #[arg(long = "tier", value_name = "INDEX=TIER")]
    pub tiers: Vec<TierAssignment>,

    /// Token ids to resolve instead of the store's current selection
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which tokens a `--tier` flag applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierTarget {
    All,
    Index(usize),
}

/// A parsed `--tier` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierAssignment {
    pub target: TierTarget,
    pub tier: ScalingTier,
}

impl FromStr for TierAssignment {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (target, tier) = input
            .split_once('=')
            .ok_or_else(|| format!("expected INDEX=TIER or all=TIER, got `{input}`"))?;

        let target = match target.trim() {
            t if t.eq_ignore_ascii_case("all") => TierTarget::All,
            t => TierTarget::Index(
                t.parse()
                    .map_err(|_| format!("`{t}` is not a token index"))?,
            ),
        };
        let tier = ScalingTier::parse_lenient(tier)
            .ok_or_else(|| format!("unknown tier `{}` (none, half, full, double)", tier.trim()))?;

        Ok(Self { target, tier })
    }
}
