use rand::Rng;

use crate::model::{HealthState, PatientOutcome};
use crate::params::ParameterSource;

/// One simulated individual.
///
/// Created by the cohort, walked step by step through the chain, and
/// discarded once its outcome scalars have been aggregated.
#[derive(Debug)]
pub struct Patient {
    id: usize,
    state: HealthState,
}

impl Patient {
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self {
            id,
            state: HealthState::Well,
        }
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> HealthState {
        self.state
    }

    /// Walk the chain for up to `time_horizon` steps.
    ///
    /// Each step draws one uniform value and selects the next state by
    /// inverse-CDF sampling over the current state's transition row. The walk
    /// stops the instant the absorbing state is reached; a patient still
    /// alive at the horizon is right-censored at the horizon bound.
    pub fn simulate<P, R>(&mut self, time_horizon: usize, params: &P, rng: &mut R) -> PatientOutcome
    where
        P: ParameterSource + ?Sized,
        R: Rng + ?Sized,
    {
        let delta_t = params.delta_t();
        self.state = params.initial_state();

        let mut path = Vec::with_capacity(time_horizon + 1);
        path.push(self.state);

        let mut stroke_times = Vec::new();
        let mut time_to_post_stroke = None;
        let mut survival_time = time_horizon as f64 * delta_t;
        let mut death_observed = false;

        for t in 0..time_horizon {
            let row = params.transition_probabilities(self.state);
            self.state = next_state(row, rng.random::<f64>());
            path.push(self.state);

            let time = (t + 1) as f64 * delta_t;
            match self.state {
                HealthState::Stroke => stroke_times.push(time),
                HealthState::PostStroke => {
                    if time_to_post_stroke.is_none() {
                        time_to_post_stroke = Some(time);
                    }
                }
                HealthState::Death => {
                    survival_time = time;
                    death_observed = true;
                    break;
                }
                HealthState::Well => {}
            }
        }

        PatientOutcome {
            id: self.id,
            path,
            survival_time,
            death_observed,
            time_to_post_stroke,
            stroke_times,
        }
    }
}

/// Inverse-CDF selection: first state whose cumulative bound exceeds the draw
fn next_state(row: &[f64], u: f64) -> HealthState {
    let mut cumulative = 0.0;
    let mut selected = None;
    for (i, &p) in row.iter().enumerate() {
        cumulative += p;
        if u < cumulative {
            selected = HealthState::from_index(i);
            break;
        }
    }
    // Cumulative rounding can leave u just past the final bound; fall back to
    // the last state with any probability mass.
    selected.unwrap_or_else(|| {
        let last = row
            .iter()
            .rposition(|&p| p > 0.0)
            .unwrap_or(HealthState::COUNT - 1);
        HealthState::from_index(last).unwrap_or(HealthState::Death)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::model::Therapy;
    use crate::params::FixedParameters;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn next_state_selects_by_cumulative_bounds() {
        let row = [0.75, 0.15, 0.0, 0.1];
        assert_eq!(next_state(&row, 0.0), HealthState::Well);
        assert_eq!(next_state(&row, 0.7499), HealthState::Well);
        assert_eq!(next_state(&row, 0.75), HealthState::Stroke);
        assert_eq!(next_state(&row, 0.8999), HealthState::Stroke);
        assert_eq!(next_state(&row, 0.9), HealthState::Death);
        assert_eq!(next_state(&row, 0.9999), HealthState::Death);
    }

    #[test]
    fn next_state_falls_back_past_the_final_bound() {
        // row that rounds just short of 1
        let row = [0.5, 0.5 - 1e-12, 0.0, 0.0];
        assert_eq!(next_state(&row, 1.0 - 1e-13), HealthState::Stroke);
    }

    #[test]
    fn walk_terminates_at_death_and_records_it() {
        let config = SimulationConfig::default();
        let params = FixedParameters::new(Therapy::NoTherapy, &config).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let outcome = Patient::new(0).simulate(50, &params, &mut rng);
        if outcome.death_observed {
            assert_eq!(*outcome.path.last().unwrap(), HealthState::Death);
            assert!(outcome.survival_time <= 50.0);
            // death ends the walk immediately
            let deaths = outcome
                .path
                .iter()
                .filter(|s| **s == HealthState::Death)
                .count();
            assert_eq!(deaths, 1);
        }
    }

    #[test]
    fn survivor_is_censored_at_the_horizon() {
        // Wellness forever: identity-ish matrix with no path to death
        let config = SimulationConfig {
            transition_matrix: vec![
                vec![1.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 1.0],
            ],
            ..Default::default()
        };
        let params = FixedParameters::new(Therapy::NoTherapy, &config).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = Patient::new(7).simulate(50, &params, &mut rng);
        assert!(!outcome.death_observed);
        assert!((outcome.survival_time - 50.0).abs() < f64::EPSILON);
        assert_eq!(outcome.path.len(), 51);
    }

    #[test]
    fn stroke_events_are_timestamped() {
        // Well always strokes, stroke always advances, post-stroke relapses
        let config = SimulationConfig {
            transition_matrix: vec![
                vec![0.0, 1.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![0.0, 1.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 1.0],
            ],
            ..Default::default()
        };
        let params = FixedParameters::new(Therapy::NoTherapy, &config).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = Patient::new(0).simulate(6, &params, &mut rng);
        assert_eq!(outcome.stroke_times, vec![1.0, 3.0, 5.0]);
        assert_eq!(outcome.time_to_post_stroke, Some(2.0));
    }
}
