use serde::{Deserialize, Serialize};

use crate::error::StatError;
use crate::model::{HealthState, Therapy};
use crate::stats::SummaryStat;

/// Outcome of one patient's walk through the state chain.
///
/// The full state path is kept for inspection; the cohort aggregates the
/// derived scalars and drops the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientOutcome {
    pub id: usize,
    /// Visited states, starting with the initial state at t = 0
    pub path: Vec<HealthState>,
    /// Time at which death occurred, or the horizon bound if censored
    pub survival_time: f64,
    /// False when the patient was still alive at the horizon (right-censored)
    pub death_observed: bool,
    /// Time of first arrival in `PostStroke`, if ever reached
    pub time_to_post_stroke: Option<f64>,
    /// Times of every transition into `Stroke`
    pub stroke_times: Vec<f64>,
}

/// Aggregated results of one cohort simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub cohort_id: usize,
    pub therapy: Therapy,
    /// Per-patient survival times, in patient-id order
    pub survival_times: Vec<f64>,
    /// Patients still alive at the horizon (contribute censored observations)
    pub censored_count: usize,
    /// Times to first post-stroke arrival, for patients who reached it
    pub times_to_post_stroke: Vec<f64>,
    /// Every stroke event time across the cohort
    pub stroke_times: Vec<f64>,
    /// (time, patients alive) for each step from 0 to the horizon
    pub survival_curve: Vec<(f64, usize)>,
}

impl SimulationOutput {
    #[must_use]
    pub fn survival_curve(&self) -> &[(f64, usize)] {
        &self.survival_curve
    }

    #[must_use]
    pub fn survival_times(&self) -> &[f64] {
        &self.survival_times
    }

    #[must_use]
    pub fn stroke_times(&self) -> &[f64] {
        &self.stroke_times
    }

    /// Total stroke events observed across the cohort
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.stroke_times.len()
    }

    pub fn summary_survival_time(&self) -> Result<SummaryStat, StatError> {
        SummaryStat::new(self.survival_times.clone())
    }

    /// Summary over patients who reached `PostStroke`; patients who never
    /// did are excluded rather than contributing a sentinel.
    pub fn summary_time_to_post_stroke(&self) -> Result<SummaryStat, StatError> {
        SummaryStat::new(self.times_to_post_stroke.clone())
    }
}
