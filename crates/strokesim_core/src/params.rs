//! Parameter providers: the seam between configuration and the patient walk.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SimulationConfig;
use crate::error::{ConfigError, SimulationError};
use crate::model::{HealthState, Therapy, TransitionMatrix};
use crate::sampling::{DirichletRow, LnRelativeRisk};

/// Source of transition probabilities for a patient walk.
///
/// The provider is read-only for the duration of a cohort's simulation;
/// probabilistic providers mutate their matrix only between PSA runs.
pub trait ParameterSource {
    /// Transition probabilities out of `state`, ordered by next-state index
    fn transition_probabilities(&self, state: HealthState) -> &[f64];

    fn initial_state(&self) -> HealthState {
        HealthState::Well
    }

    fn delta_t(&self) -> f64;
}

/// Fixed transition parameters: the base matrix, with the anticoagulation
/// transform applied once at construction when that therapy is selected.
#[derive(Debug, Clone)]
pub struct FixedParameters {
    matrix: TransitionMatrix,
    delta_t: f64,
}

impl FixedParameters {
    pub fn new(therapy: Therapy, config: &SimulationConfig) -> Result<Self, ConfigError> {
        let base = config.validate()?;
        let matrix = match therapy {
            Therapy::NoTherapy => base,
            Therapy::Anticoagulation => base.anticoagulation_transform(config.treatment.rr)?,
        };
        Ok(Self {
            matrix,
            delta_t: config.delta_t,
        })
    }

    #[must_use]
    pub fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }
}

impl ParameterSource for FixedParameters {
    fn transition_probabilities(&self, state: HealthState) -> &[f64] {
        self.matrix.row(state)
    }

    fn delta_t(&self) -> f64 {
        self.delta_t
    }
}

/// Probabilistic transition parameters for sensitivity analysis.
///
/// Each non-absorbing state carries a Dirichlet generator over its reachable
/// sub-simplex (transitions to states of equal or higher index), parameterized
/// by the base matrix row. `resample` draws a fresh matrix, and under
/// anticoagulation a fresh relative risk from the log-normal effect draw.
/// Resampling advances the provider's own seeded generator and never alters
/// the distributions' parameters, so successive draws are independent.
#[derive(Debug, Clone)]
pub struct ProbabilisticParameters {
    rng: StdRng,
    therapy: Therapy,
    row_samplers: Vec<Option<DirichletRow>>,
    ln_rr: Option<LnRelativeRisk>,
    matrix: TransitionMatrix,
    current_rr: Option<f64>,
    delta_t: f64,
}

impl ProbabilisticParameters {
    pub fn new(
        seed: u64,
        therapy: Therapy,
        config: &SimulationConfig,
    ) -> Result<Self, SimulationError> {
        let base = config.validate()?;

        let mut row_samplers = Vec::with_capacity(HealthState::COUNT);
        for state in HealthState::ALL {
            if state.is_absorbing() {
                row_samplers.push(None);
            } else {
                let alpha = &base.row(state)[state.index()..];
                row_samplers.push(Some(DirichletRow::new(state, alpha)?));
            }
        }

        let ln_rr = match therapy {
            Therapy::NoTherapy => None,
            Therapy::Anticoagulation => Some(LnRelativeRisk::new(&config.treatment)?),
        };

        let mut params = Self {
            rng: StdRng::seed_from_u64(seed),
            therapy,
            row_samplers,
            ln_rr,
            matrix: base,
            current_rr: None,
            delta_t: config.delta_t,
        };
        params.resample()?;
        Ok(params)
    }

    /// Draw an independent new transition matrix (and relative risk, when the
    /// therapy has one) from the parameter uncertainty distributions.
    pub fn resample(&mut self) -> Result<(), SimulationError> {
        let mut rows = vec![vec![0.0; HealthState::COUNT]; HealthState::COUNT];
        for state in HealthState::ALL {
            let i = state.index();
            match &self.row_samplers[i] {
                None => rows[i][i] = 1.0,
                Some(sampler) => {
                    let sample = sampler.sample(&mut self.rng);
                    rows[i][i..].copy_from_slice(&sample);
                }
            }
        }
        let mut matrix = TransitionMatrix::from_rows(rows)?;

        if let Some(ln_rr) = &self.ln_rr {
            let rr = ln_rr.sample_rr(&mut self.rng);
            matrix = matrix.anticoagulation_transform(rr)?;
            self.current_rr = Some(rr);
        }

        self.matrix = matrix;
        Ok(())
    }

    #[must_use]
    pub fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn therapy(&self) -> Therapy {
        self.therapy
    }

    /// Relative risk used by the current matrix draw, when the therapy has one
    #[must_use]
    pub fn current_rr(&self) -> Option<f64> {
        self.current_rr
    }
}

impl ParameterSource for ProbabilisticParameters {
    fn transition_probabilities(&self, state: HealthState) -> &[f64] {
        self.matrix.row(state)
    }

    fn delta_t(&self) -> f64 {
        self.delta_t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ROW_SUM_TOL;

    #[test]
    fn fixed_no_therapy_matches_base_matrix() {
        let config = SimulationConfig::default();
        let params = FixedParameters::new(Therapy::NoTherapy, &config).unwrap();
        assert_eq!(
            params.transition_probabilities(HealthState::Well),
            &[0.75, 0.15, 0.0, 0.1]
        );
        assert!((params.delta_t() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fixed_anticoagulation_scales_forward_entries() {
        let config = SimulationConfig::default();
        let params = FixedParameters::new(Therapy::Anticoagulation, &config).unwrap();
        let well = params.transition_probabilities(HealthState::Well);
        assert!((well[1] - 0.15 * 0.65).abs() < 1e-12);
        assert!((well[3] - 0.1 * 0.65).abs() < 1e-12);
    }

    #[test]
    fn probabilistic_rows_stay_stochastic_across_resamples() {
        let config = SimulationConfig::default();
        let mut params =
            ProbabilisticParameters::new(5, Therapy::Anticoagulation, &config).unwrap();

        for _ in 0..20 {
            for state in HealthState::ALL {
                let sum: f64 = params.transition_probabilities(state).iter().sum();
                assert!((sum - 1.0).abs() <= ROW_SUM_TOL, "{state:?} sums to {sum}");
            }
            assert_eq!(
                params.transition_probabilities(HealthState::Death),
                &[0.0, 0.0, 0.0, 1.0]
            );
            params.resample().unwrap();
        }
    }

    #[test]
    fn resample_produces_independent_draws() {
        let config = SimulationConfig::default();
        let mut params = ProbabilisticParameters::new(9, Therapy::NoTherapy, &config).unwrap();
        let first = params.matrix().clone();
        params.resample().unwrap();
        assert_ne!(&first, params.matrix());
    }

    #[test]
    fn probabilistic_is_reproducible_for_a_seed() {
        let config = SimulationConfig::default();
        let a = ProbabilisticParameters::new(21, Therapy::Anticoagulation, &config).unwrap();
        let b = ProbabilisticParameters::new(21, Therapy::Anticoagulation, &config).unwrap();
        assert_eq!(a.matrix(), b.matrix());
        assert_eq!(a.current_rr(), b.current_rr());
    }

    #[test]
    fn no_therapy_draws_no_relative_risk() {
        let config = SimulationConfig::default();
        let params = ProbabilisticParameters::new(1, Therapy::NoTherapy, &config).unwrap();
        assert_eq!(params.current_rr(), None);
    }
}
