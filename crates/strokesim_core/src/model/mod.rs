//! Model types: health states, therapies, transition matrices, and results.

mod health;
mod matrix;
mod results;

pub use health::{HealthState, Therapy};
pub use matrix::{ROW_SUM_TOL, TransitionMatrix};
pub use results::{PatientOutcome, SimulationOutput};
