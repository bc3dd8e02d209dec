//! Evaluation policy.

/// How an antecedent resolves when a row has both a missing value and a
/// literal that is determinately false.
///
/// Literals are always visited in canonical order, so either policy is
/// deterministic; they differ only on rows where an unknown and a false
/// literal coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnknownPolicy {
    /// Short-circuit on the first literal that is not true: a missing
    /// value yields `Unknown`, a failing literal yields `False`,
    /// whichever comes first.
    #[default]
    FirstCause,

    /// `Unknown` only if no literal is determinately false.
    FalseDominates,
}
