use std::fmt;

use crate::model::{HealthState, Therapy};

/// Errors raised while validating simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonSquareMatrix {
        rows: usize,
        expected: usize,
    },
    RowLengthMismatch {
        state: HealthState,
        len: usize,
        expected: usize,
    },
    NegativeEntry {
        state: HealthState,
        next: HealthState,
        value: f64,
    },
    RowNotStochastic {
        state: HealthState,
        sum: f64,
    },
    /// The absorbing row must be exactly the identity row
    AbsorbingRowInvalid {
        state: HealthState,
    },
    /// Therapy transform drove a diagonal entry negative
    TransformedRowInvalid {
        state: HealthState,
        therapy: Therapy,
        diagonal: f64,
    },
    InvalidPopulationSize(usize),
    InvalidSimulationLength(usize),
    InvalidDeltaT(f64),
    InvalidAlpha(f64),
    InvalidRelativeRisk {
        rr: f64,
        ci_lower: f64,
        ci_upper: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonSquareMatrix { rows, expected } => {
                write!(f, "transition matrix has {rows} rows, expected {expected}")
            }
            ConfigError::RowLengthMismatch {
                state,
                len,
                expected,
            } => {
                write!(
                    f,
                    "transition row for {state:?} has {len} entries, expected {expected}"
                )
            }
            ConfigError::NegativeEntry { state, next, value } => {
                write!(
                    f,
                    "transition probability {state:?} -> {next:?} is negative ({value})"
                )
            }
            ConfigError::RowNotStochastic { state, sum } => {
                write!(f, "transition row for {state:?} sums to {sum}, expected 1")
            }
            ConfigError::AbsorbingRowInvalid { state } => {
                write!(f, "absorbing row for {state:?} is not the identity row")
            }
            ConfigError::TransformedRowInvalid {
                state,
                therapy,
                diagonal,
            } => {
                write!(
                    f,
                    "{therapy:?} transform gives negative diagonal {diagonal} for {state:?}"
                )
            }
            ConfigError::InvalidPopulationSize(n) => {
                write!(f, "population size must be positive, got {n}")
            }
            ConfigError::InvalidSimulationLength(n) => {
                write!(f, "simulation length must be positive, got {n}")
            }
            ConfigError::InvalidDeltaT(dt) => {
                write!(f, "time step must be positive, got {dt}")
            }
            ConfigError::InvalidAlpha(a) => {
                write!(f, "significance level must be in (0, 1), got {a}")
            }
            ConfigError::InvalidRelativeRisk {
                rr,
                ci_lower,
                ci_upper,
            } => {
                write!(
                    f,
                    "invalid relative risk {rr} with CI ({ci_lower}, {ci_upper}): \
                     all must be positive with lower < upper"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised at a summary statistic's construction
#[derive(Debug, Clone, PartialEq)]
pub enum StatError {
    EmptyObservations,
    LengthMismatch { x_len: usize, y_len: usize },
}

impl fmt::Display for StatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatError::EmptyObservations => {
                write!(f, "cannot summarize an empty observation collection")
            }
            StatError::LengthMismatch { x_len, y_len } => {
                write!(
                    f,
                    "paired samples have mismatched lengths ({x_len} vs {y_len})"
                )
            }
        }
    }
}

impl std::error::Error for StatError {}

/// Errors raised while building random variate generators
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    /// No valid Dirichlet distribution exists over an all-zero alpha vector
    DegenerateAlpha { state: HealthState },
    NegativeAlpha {
        state: HealthState,
        index: usize,
        value: f64,
    },
    InvalidLogNormal {
        mean: f64,
        std_dev: f64,
    },
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingError::DegenerateAlpha { state } => {
                write!(
                    f,
                    "Dirichlet alpha for {state:?} is all zero; no distribution exists"
                )
            }
            SamplingError::NegativeAlpha {
                state,
                index,
                value,
            } => {
                write!(
                    f,
                    "Dirichlet alpha[{index}] for {state:?} is negative ({value})"
                )
            }
            SamplingError::InvalidLogNormal { mean, std_dev } => {
                write!(
                    f,
                    "invalid log-normal parameters (mean={mean}, std_dev={std_dev})"
                )
            }
        }
    }
}

impl std::error::Error for SamplingError {}

/// Top-level error for cohort construction and simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Config(ConfigError),
    Sampling(SamplingError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(e) => write!(f, "{e}"),
            SimulationError::Sampling(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            SimulationError::Sampling(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}

impl From<SamplingError> for SimulationError {
    fn from(e: SamplingError) -> Self {
        SimulationError::Sampling(e)
    }
}
