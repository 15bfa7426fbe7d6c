//! Fixed parameters of the move evaluator.
//!
//! Parameters can be built in code or read from a YAML fragment such as
//!
//! ```yaml
//! cutoff: 2.5
//! low_acceptance: 0.3
//! high_acceptance: 0.5
//! ```
//!
//! Missing fields fall back to [`IntegratorConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::McError;

/// Cutoff and acceptance band for an [`Integrator`](crate::Integrator)
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Interaction cutoff distance (pairs at or beyond it are skipped)
    pub cutoff: f64,
    /// Acceptance rate below which the trial displacement shrinks
    pub low_acceptance: f64,
    /// Acceptance rate above which the trial displacement grows
    pub high_acceptance: f64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            cutoff: 3.0,
            low_acceptance: 0.38,
            high_acceptance: 0.42,
        }
    }
}

impl IntegratorConfig {
    pub fn new(cutoff: f64, low_acceptance: f64, high_acceptance: f64) -> Self {
        Self {
            cutoff,
            low_acceptance,
            high_acceptance,
        }
    }

    /// Parse a configuration from YAML, rejecting a non-positive cutoff.
    ///
    /// The ordering `0 < low_acceptance < high_acceptance < 1` is not checked.
    pub fn from_yaml_str(content: &str) -> Result<Self, McError> {
        let config: IntegratorConfig =
            serde_yml::from_str(content).map_err(|e| McError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), McError> {
        if self.cutoff.is_nan() || self.cutoff <= 0.0 {
            return Err(McError::Config(format!(
                "cutoff must be positive, got {}",
                self.cutoff
            )));
        }
        Ok(())
    }
}
