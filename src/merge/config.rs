//! Merge configuration.

use crate::eval::UnknownPolicy;

/// Which final rules a merge run emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmitPolicy {
    /// Emit a final rule only if its antecedent is not already seen.
    /// Generalized antecedents are marked seen when created, so they are
    /// never emitted.
    #[default]
    Unseen,

    /// Emit every final rule once per distinct antecedent, generalized
    /// rules included.
    Distinct,
}

/// Configuration for the generalization merger.
///
/// # Examples
///
/// ```
/// use u_rulemerge::merge::MergeConfig;
///
/// let config = MergeConfig::default()
///     .with_min_support(0.1)
///     .with_min_confidence(0.15)
///     .with_max_iterations(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeConfig {
    /// Minimum support a generalized rule must reach (inclusive).
    pub min_support: f64,

    /// Minimum confidence a generalized rule must reach (inclusive).
    pub min_confidence: f64,

    /// Iteration cap. The run stops before a pop once more than
    /// `max_iterations` pops have happened, so at most `max_iterations + 1`
    /// candidates are processed.
    ///
    /// Every iteration shrinks the queue by one, so a run always ends
    /// after at most as many iterations as there are input rules; the cap
    /// only cuts very large inputs short.
    pub max_iterations: usize,

    /// Evaluation policy used when scoring generalized antecedents.
    pub unknown_policy: UnknownPolicy,

    /// Which final rules reach the output.
    pub emit_policy: EmitPolicy,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            min_support: 0.0,
            min_confidence: 0.0,
            max_iterations: 10_000,
            unknown_policy: UnknownPolicy::default(),
            emit_policy: EmitPolicy::default(),
        }
    }
}

impl MergeConfig {
    pub fn with_min_support(mut self, s: f64) -> Self {
        self.min_support = s;
        self
    }

    pub fn with_min_confidence(mut self, c: f64) -> Self {
        self.min_confidence = c;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_unknown_policy(mut self, policy: UnknownPolicy) -> Self {
        self.unknown_policy = policy;
        self
    }

    pub fn with_emit_policy(mut self, policy: EmitPolicy) -> Self {
        self.emit_policy = policy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_support) {
            return Err(format!(
                "min_support must be in [0, 1], got {}",
                self.min_support
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            ));
        }
        Ok(())
    }
}
