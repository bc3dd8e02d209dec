//! Pipeline configuration.

use crate::eval::UnknownPolicy;
use crate::merge::{EmitPolicy, MergeConfig};
use crate::prune::PruneConfig;

/// Configuration for a full compression run.
///
/// # Examples
///
/// ```
/// use u_rulemerge::pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default()
///     .with_alpha(0.7)
///     .with_min_support(0.1)
///     .with_min_confidence(0.15)
///     .with_label("donor_is_old");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    /// Ranking weight of confidence; support gets `1 - alpha`.
    pub alpha: f64,

    /// Minimum support for a rule to be kept or synthesized.
    pub min_support: f64,

    /// Minimum confidence for a rule to be kept or synthesized.
    pub min_confidence: f64,

    /// Merge iteration cap; at most `max_iterations + 1` queue pops.
    pub max_iterations: usize,

    /// Confidence ratio at which a general rule prunes a specific one.
    pub prune_tolerance: f64,

    /// How unknown and false literals combine during evaluation.
    pub unknown_policy: UnknownPolicy,

    /// Whether generalized rules reach the output.
    pub emit_policy: EmitPolicy,

    /// Score the initial rules in parallel (needs the `parallel` feature).
    pub parallel: bool,

    /// Consequent written after `=>` in the output.
    pub label: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            min_support: 0.0,
            min_confidence: 0.0,
            max_iterations: 10_000,
            prune_tolerance: 0.98,
            unknown_policy: UnknownPolicy::FirstCause,
            emit_policy: EmitPolicy::Unseen,
            parallel: false,
            label: "donor_is_old".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

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

    pub fn with_prune_tolerance(mut self, t: f64) -> Self {
        self.prune_tolerance = t;
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

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The merge stage's view of this configuration.
    pub fn merge_config(&self) -> MergeConfig {
        MergeConfig::default()
            .with_min_support(self.min_support)
            .with_min_confidence(self.min_confidence)
            .with_max_iterations(self.max_iterations)
            .with_unknown_policy(self.unknown_policy)
            .with_emit_policy(self.emit_policy)
    }

    /// The pruning stage's view of this configuration.
    pub fn prune_config(&self) -> PruneConfig {
        PruneConfig::default().with_tolerance(self.prune_tolerance)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(format!("alpha must be in [0, 1], got {}", self.alpha));
        }
        if self.label.trim().is_empty() {
            return Err("label must not be empty".into());
        }
        self.merge_config().validate()?;
        self.prune_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!((config.alpha - 0.8).abs() < 1e-10);
        assert!(config.min_support.abs() < 1e-10);
        assert!(config.min_confidence.abs() < 1e-10);
        assert_eq!(config.max_iterations, 10_000);
        assert!((config.prune_tolerance - 0.98).abs() < 1e-10);
        assert!(!config.parallel);
        assert_eq!(config.emit_policy, EmitPolicy::Unseen);
    }

    #[test]
    fn test_validate_ok() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_alpha() {
        assert!(PipelineConfig::default().with_alpha(1.1).validate().is_err());
        assert!(PipelineConfig::default().with_alpha(-0.1).validate().is_err());
    }

    #[test]
    fn test_validate_delegates_to_stages() {
        assert!(PipelineConfig::default().with_min_support(2.0).validate().is_err());
        assert!(PipelineConfig::default().with_prune_tolerance(1.5).validate().is_err());
        assert!(PipelineConfig::default().with_label(" ").validate().is_err());
    }

    #[test]
    fn test_stage_configs() {
        let config = PipelineConfig::default()
            .with_min_support(0.1)
            .with_min_confidence(0.15)
            .with_max_iterations(7)
            .with_unknown_policy(UnknownPolicy::FalseDominates)
            .with_emit_policy(EmitPolicy::Distinct);
        let merge = config.merge_config();
        assert!((merge.min_support - 0.1).abs() < 1e-10);
        assert!((merge.min_confidence - 0.15).abs() < 1e-10);
        assert_eq!(merge.max_iterations, 7);
        assert_eq!(merge.unknown_policy, UnknownPolicy::FalseDominates);
        assert_eq!(merge.emit_policy, EmitPolicy::Distinct);
    }
}
