//! Rule file output.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::rank::RankedRule;
use crate::rule::format_rule;

/// Writes one `lit AND lit => label` line per rule, in the given order.
pub fn write_rules<W: Write>(mut out: W, rules: &[RankedRule], label: &str) -> io::Result<()> {
    for ranked in rules {
        writeln!(out, "{}", format_rule(ranked.rule.antecedent(), label))?;
    }
    out.flush()
}

/// Writes the rule file at `path` (UTF-8), creating parent directories.
pub fn save_rules(path: impl AsRef<Path>, rules: &[RankedRule], label: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    write_rules(BufWriter::new(file), rules, label)?;
    info!(path = %path.display(), rules = rules.len(), "wrote rule file");
    Ok(())
}
