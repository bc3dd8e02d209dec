//! Rule text parsing and rendering.
//!
//! Input lines look like `a AND NOT b => anything`. The consequent is
//! discarded: every rule predicts the same fixed target label.

use super::types::{Antecedent, Literal, AND_SEPARATOR, IMPLIES, NOT_PREFIX};
use crate::error::{Result, RuleError};

/// Parses a single literal (`item` or `NOT item`).
///
/// Returns `None` for an empty piece.
fn parse_literal(piece: &str) -> Option<Literal> {
    let piece = piece.trim();
    if piece.is_empty() {
        return None;
    }
    // `piece` is trimmed, so anything after the prefix is non-empty.
    Some(match piece.strip_prefix(NOT_PREFIX) {
        Some(item) => Literal::negative(item.trim()),
        None => Literal::positive(piece),
    })
}

/// Parses one non-blank rule line into its antecedent.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_rule_line(line: &str, line_no: usize) -> Result<Antecedent> {
    let err = |message: &str| RuleError::Parse {
        line: line_no,
        message: message.to_string(),
    };

    let mut sides = line.split(IMPLIES);
    let lhs = sides.next().unwrap_or_default();
    if sides.next().is_none() {
        return Err(err("missing `=>`"));
    }
    if sides.next().is_some() {
        return Err(err("more than one `=>`"));
    }

    let mut literals = Vec::new();
    for piece in lhs.split(AND_SEPARATOR) {
        match parse_literal(piece) {
            Some(literal) => literals.push(literal),
            None => return Err(err("empty literal in antecedent")),
        }
    }
    Ok(Antecedent::new(literals))
}

/// Parses a block of rule text, one rule per line. Blank lines are skipped.
pub fn parse_rules(text: &str) -> Result<Vec<Antecedent>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_rule_line(line.trim(), i + 1))
        .collect()
}

/// Renders an output line (without trailing newline):
/// `lit1 AND lit2 => label`, literals in canonical order.
pub fn format_rule(antecedent: &Antecedent, label: &str) -> String {
    format!("{antecedent} {IMPLIES} {label}")
}
