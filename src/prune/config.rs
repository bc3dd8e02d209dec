//! Pruning configuration.

/// Configuration for redundancy pruning.
///
/// # Examples
///
/// ```
/// use u_rulemerge::prune::PruneConfig;
///
/// let config = PruneConfig::default().with_tolerance(0.95);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PruneConfig {
    /// A more general rule makes a specific one redundant when its
    /// confidence is at least `tolerance` times the specific rule's.
    pub tolerance: f64,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self { tolerance: 0.98 }
    }
}

impl PruneConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.tolerance) {
            return Err(format!(
                "prune tolerance must be in [0, 1], got {}",
                self.tolerance
            ));
        }
        Ok(())
    }
}
