use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::model::{HealthState, SimulationOutput, Therapy};
use crate::params::{FixedParameters, ParameterSource, ProbabilisticParameters};
use crate::patient::Patient;

/// Parameter provider selected by the PSA flag
#[derive(Debug, Clone)]
enum Parameters {
    Fixed(FixedParameters),
    Probabilistic(ProbabilisticParameters),
}

impl ParameterSource for Parameters {
    fn transition_probabilities(&self, state: HealthState) -> &[f64] {
        match self {
            Parameters::Fixed(p) => p.transition_probabilities(state),
            Parameters::Probabilistic(p) => p.transition_probabilities(state),
        }
    }

    fn delta_t(&self) -> f64 {
        match self {
            Parameters::Fixed(p) => p.delta_t(),
            Parameters::Probabilistic(p) => p.delta_t(),
        }
    }
}

/// A simulated population under one therapy policy.
///
/// Patients run one at a time in id order against a single seeded generator,
/// so a given configuration and seed always reproduces the same outcomes.
/// Two cohorts (the two therapy arms) carry independent generators.
#[derive(Debug)]
pub struct Cohort {
    id: usize,
    therapy: Therapy,
    config: SimulationConfig,
    params: Parameters,
    rng: StdRng,
}

impl Cohort {
    /// Fails fast on any invalid configuration; no partial cohort exists.
    ///
    /// With PSA enabled the parameter provider gets its own generator, seeded
    /// from `psa_seed` when set and derived from the cohort seed otherwise.
    pub fn new(
        id: usize,
        therapy: Therapy,
        config: &SimulationConfig,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let params = if config.psa_on {
            let psa_seed = config.psa_seed.unwrap_or_else(|| seed.wrapping_add(1));
            Parameters::Probabilistic(ProbabilisticParameters::new(psa_seed, therapy, config)?)
        } else {
            Parameters::Fixed(FixedParameters::new(therapy, config)?)
        };

        Ok(Self {
            id,
            therapy,
            config: config.clone(),
            params,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn therapy(&self) -> Therapy {
        self.therapy
    }

    /// Redraw the PSA parameter matrix ahead of an independent resampling
    /// run. Fixed parameters are left untouched.
    pub fn resample_parameters(&mut self) -> Result<(), SimulationError> {
        if let Parameters::Probabilistic(p) = &mut self.params {
            p.resample()?;
        }
        Ok(())
    }

    /// Simulate every patient and aggregate the cohort-level output.
    pub fn simulate(&mut self) -> SimulationOutput {
        let pop_size = self.config.pop_size;
        let horizon = self.config.sim_length;
        let delta_t = self.config.delta_t;

        let mut survival_times = Vec::with_capacity(pop_size);
        let mut censored_count = 0;
        let mut times_to_post_stroke = Vec::new();
        let mut stroke_times = Vec::new();

        for id in 0..pop_size {
            let outcome = Patient::new(id).simulate(horizon, &self.params, &mut self.rng);
            survival_times.push(outcome.survival_time);
            if !outcome.death_observed {
                censored_count += 1;
            }
            if let Some(t) = outcome.time_to_post_stroke {
                times_to_post_stroke.push(t);
            }
            stroke_times.extend(outcome.stroke_times);
        }

        // Alive at step t means surviving at least until time t
        let survival_curve = (0..=horizon)
            .map(|t| {
                let time = t as f64 * delta_t;
                let alive = survival_times.iter().filter(|&&s| s >= time).count();
                (time, alive)
            })
            .collect();

        SimulationOutput {
            cohort_id: self.id,
            therapy: self.therapy,
            survival_times,
            censored_count,
            times_to_post_stroke,
            stroke_times,
            survival_curve,
        }
    }
}
