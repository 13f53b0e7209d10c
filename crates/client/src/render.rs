//! Plain-text rendering of resolved tokens.

use std::io::{self, Write};

use damage_core::{EngineConfig, ResolvedToken, truncate_name};

/// One line per token: name, health transition, temp transition, tier.
pub fn token_line(token: &ResolvedToken) -> String {
    format!(
        "{:<21}  health {} \u{2192} {} / {}  temp {} \u{2192} {}  {} ({})",
        truncate_name(&token.name, EngineConfig::DISPLAY_NAME_CHARS),
        token.before.health,
        token.after.health,
        token.max_health,
        token.before.temp_health,
        token.after.temp_health,
        token.tier,
        token.tier.label(),
    )
}

/// Write the table for `tokens` followed by a summary line.
pub fn write_table<W: Write>(
    out: &mut W,
    raw_delta: i64,
    tokens: &[ResolvedToken],
    committed: bool,
) -> io::Result<()> {
    for token in tokens {
        writeln!(out, "{}", token_line(token))?;
    }
    let changed = tokens.iter().filter(|token| !token.is_unchanged()).count();
    let verb = if committed { "applied" } else { "would apply" };
    writeln!(
        out,
        "{verb} {raw_delta:+} to {} token(s), {changed} changed",
        tokens.len()
    )
}
