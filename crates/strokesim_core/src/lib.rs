//! Markov cohort simulation engine for stroke therapy comparison
//!
//! This crate simulates disease progression for a patient cohort across
//! discrete annual time steps using a finite-state Markov chain with
//! therapy-dependent transition probabilities. It supports:
//! - Two treatment arms (no therapy vs. anticoagulation) via a relative-risk
//!   transform of the base transition matrix
//! - Per-patient stochastic state walks with stroke-event and survival tracking
//! - Cohort-level aggregation: survival curves, time-to-event collections
//! - Probabilistic sensitivity analysis through Dirichlet resampling of
//!   transition rows and a log-normal relative-risk draw
//! - Student-t summary statistics and paired/independent arm comparisons
//!
//! # Example
//!
//! ```ignore
//! use strokesim_core::{Cohort, SimulationConfig, Therapy, survival_time_increase};
//!
//! let config = SimulationConfig::default();
//! let mut control = Cohort::new(0, Therapy::NoTherapy, &config, 1)?;
//! let mut treated = Cohort::new(1, Therapy::Anticoagulation, &config, 2)?;
//!
//! let reference = control.simulate();
//! let intervention = treated.simulate();
//! let increase = survival_time_increase(&intervention, &reference, config.psa_on)?;
//! println!("mean gain: {:.2} years", increase.mean());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod cohort;
pub mod config;
pub mod error;
pub mod params;
pub mod patient;
pub mod sampling;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cohort::Cohort;
pub use config::{SimulationConfig, TreatmentEffect};
pub use error::{ConfigError, SamplingError, SimulationError, StatError};
pub use model::{HealthState, PatientOutcome, SimulationOutput, Therapy, TransitionMatrix};
pub use params::{FixedParameters, ParameterSource, ProbabilisticParameters};
pub use stats::{
    DifferenceStat, DifferenceStatIndp, DifferenceStatPaired, SummaryStat, survival_time_increase,
};
