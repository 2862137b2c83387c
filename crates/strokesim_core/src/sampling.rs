//! Random variate generators for the probabilistic parameter layer.

use rand::Rng;
use rand_distr::{Distribution, Gamma, Normal};

use crate::config::TreatmentEffect;
use crate::error::SamplingError;
use crate::model::HealthState;

/// Two-sided 97.5% normal quantile, for recovering a sigma from a 95% CI
const Z_975: f64 = 1.959_963_984_540_054;

/// Dirichlet sampler over one transition row's reachable sub-simplex.
///
/// Uses the Gamma construction: independent Gamma(alpha_i, 1) draws
/// normalized by their sum. A zero alpha component is a point mass at zero;
/// an all-zero alpha vector has no valid distribution and fails fast.
/// Sampling never mutates the parameters, so repeated draws are independent.
#[derive(Debug, Clone)]
pub struct DirichletRow {
    state: HealthState,
    gammas: Vec<Option<Gamma<f64>>>,
}

impl DirichletRow {
    pub fn new(state: HealthState, alpha: &[f64]) -> Result<Self, SamplingError> {
        let mut gammas = Vec::with_capacity(alpha.len());
        let mut any_positive = false;

        for (index, &a) in alpha.iter().enumerate() {
            if a < 0.0 || !a.is_finite() {
                return Err(SamplingError::NegativeAlpha {
                    state,
                    index,
                    value: a,
                });
            }
            if a > 0.0 {
                any_positive = true;
                let gamma = Gamma::new(a, 1.0)
                    .map_err(|_| SamplingError::NegativeAlpha {
                        state,
                        index,
                        value: a,
                    })?;
                gammas.push(Some(gamma));
            } else {
                gammas.push(None);
            }
        }

        if !any_positive {
            return Err(SamplingError::DegenerateAlpha { state });
        }

        Ok(Self { state, gammas })
    }

    #[must_use]
    pub fn state(&self) -> HealthState {
        self.state
    }

    /// Draw one probability vector summing to 1 over the row's support
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let draws: Vec<f64> = self
            .gammas
            .iter()
            .map(|g| g.as_ref().map_or(0.0, |gamma| gamma.sample(rng)))
            .collect();
        let total: f64 = draws.iter().sum();
        draws.into_iter().map(|x| x / total).collect()
    }
}

/// Log-space normal draw over the treatment relative risk.
///
/// Mean is ln(RR); sigma is recovered from the RR 95% confidence interval
/// by the usual effect-size convention, (ln upper - ln lower) / (2 z).
#[derive(Debug, Clone)]
pub struct LnRelativeRisk {
    dist: Normal<f64>,
}

impl LnRelativeRisk {
    pub fn new(effect: &TreatmentEffect) -> Result<Self, SamplingError> {
        let mean = effect.rr.ln();
        let std_dev = (effect.rr_ci_upper.ln() - effect.rr_ci_lower.ln()) / (2.0 * Z_975);
        let dist =
            Normal::new(mean, std_dev).map_err(|_| SamplingError::InvalidLogNormal {
                mean,
                std_dev,
            })?;
        Ok(Self { dist })
    }

    /// Draw a relative risk (already exponentiated back out of log space)
    pub fn sample_rr<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.dist.sample(rng).exp()
    }
}
