use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::TransitionMatrix;

/// Treatment effect size: relative-risk point estimate with its 95% CI.
///
/// The CI bounds parameterize the log-normal relative-risk draw used by
/// probabilistic sensitivity analysis; the fixed-parameter path only uses
/// the point estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentEffect {
    pub rr: f64,
    pub rr_ci_lower: f64,
    pub rr_ci_upper: f64,
}

impl TreatmentEffect {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = self.rr > 0.0
            && self.rr_ci_lower > 0.0
            && self.rr_ci_lower < self.rr_ci_upper
            && self.rr.is_finite()
            && self.rr_ci_upper.is_finite();
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidRelativeRisk {
                rr: self.rr,
                ci_lower: self.rr_ci_lower,
                ci_upper: self.rr_ci_upper,
            })
        }
    }
}

/// Complete configuration for one cohort simulation.
///
/// An explicit value passed into constructors; there is no process-global
/// settings state. The `Default` impl carries the published base case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Cohort population size
    pub pop_size: usize,
    /// Simulation horizon in time steps
    pub sim_length: usize,
    /// Length of one time step in years
    pub delta_t: f64,
    /// Significance level for confidence intervals
    pub alpha: f64,
    /// Base (no-therapy) transition probability matrix
    pub transition_matrix: Vec<Vec<f64>>,
    pub treatment: TreatmentEffect,
    /// Resample transition parameters from their uncertainty distributions
    #[serde(default)]
    pub psa_on: bool,
    /// Seed for the PSA parameter draws; derived from the cohort seed if unset
    #[serde(default)]
    pub psa_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            pop_size: 2000,
            sim_length: 50,
            delta_t: 1.0,
            alpha: 0.05,
            transition_matrix: vec![
                vec![0.75, 0.15, 0.0, 0.1],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.25, 0.55, 0.2],
                vec![0.0, 0.0, 0.0, 1.0],
            ],
            treatment: TreatmentEffect {
                rr: 0.65,
                rr_ci_lower: 0.53,
                rr_ci_upper: 0.80,
            },
            psa_on: false,
            psa_seed: None,
        }
    }
}

impl SimulationConfig {
    /// Fail-fast validation of every scalar plus the transition matrix.
    /// Returns the validated matrix so callers need not re-parse the rows.
    pub fn validate(&self) -> Result<TransitionMatrix, ConfigError> {
        if self.pop_size == 0 {
            return Err(ConfigError::InvalidPopulationSize(self.pop_size));
        }
        if self.sim_length == 0 {
            return Err(ConfigError::InvalidSimulationLength(self.sim_length));
        }
        if !(self.delta_t > 0.0 && self.delta_t.is_finite()) {
            return Err(ConfigError::InvalidDeltaT(self.delta_t));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        self.treatment.validate()?;
        TransitionMatrix::from_rows(self.transition_matrix.clone())
    }
}
