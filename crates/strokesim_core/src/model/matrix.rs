use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{HealthState, Therapy};

/// Row-sum tolerance for validating stochastic rows
pub const ROW_SUM_TOL: f64 = 1e-9;

/// A validated row-stochastic transition matrix over the health states.
///
/// Rows are indexed by the current state, columns by the next state. The
/// absorbing `Death` row is always the identity row. Construction validates
/// the full invariant set; once built, the matrix is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    rows: Vec<Vec<f64>>,
}

impl TransitionMatrix {
    /// Validate and build a matrix from raw probability rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ConfigError> {
        if rows.len() != HealthState::COUNT {
            return Err(ConfigError::NonSquareMatrix {
                rows: rows.len(),
                expected: HealthState::COUNT,
            });
        }

        for (i, row) in rows.iter().enumerate() {
            let state = HealthState::ALL[i];
            if row.len() != HealthState::COUNT {
                return Err(ConfigError::RowLengthMismatch {
                    state,
                    len: row.len(),
                    expected: HealthState::COUNT,
                });
            }

            for (j, &p) in row.iter().enumerate() {
                if p < 0.0 || !p.is_finite() {
                    return Err(ConfigError::NegativeEntry {
                        state,
                        next: HealthState::ALL[j],
                        value: p,
                    });
                }
            }

            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOL {
                return Err(ConfigError::RowNotStochastic { state, sum });
            }

            if state.is_absorbing() {
                let identity = row
                    .iter()
                    .enumerate()
                    .all(|(j, &p)| if j == i { p == 1.0 } else { p == 0.0 });
                if !identity {
                    return Err(ConfigError::AbsorbingRowInvalid { state });
                }
            }
        }

        Ok(Self { rows })
    }

    /// Transition probabilities out of `state`, ordered by next-state index
    #[must_use]
    pub fn row(&self, state: HealthState) -> &[f64] {
        &self.rows[state.index()]
    }

    /// Apply the anticoagulation treatment effect.
    ///
    /// Every state-advancing entry (next-state index above the current state)
    /// is scaled by the relative risk; the diagonal is recomputed so each row
    /// still sums to 1. Backward entries and the absorbing row are unchanged.
    /// A relative risk of 1.0 therefore reproduces the input matrix exactly.
    pub fn anticoagulation_transform(&self, rr: f64) -> Result<Self, ConfigError> {
        let mut rows = self.rows.clone();

        for (i, row) in rows.iter_mut().enumerate() {
            let state = HealthState::ALL[i];
            if state.is_absorbing() {
                continue;
            }

            for p in row.iter_mut().skip(i + 1) {
                *p *= rr;
            }

            let off_diagonal: f64 = row
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, p)| p)
                .sum();
            let diagonal = 1.0 - off_diagonal;
            if diagonal < 0.0 {
                return Err(ConfigError::TransformedRowInvalid {
                    state,
                    therapy: Therapy::Anticoagulation,
                    diagonal,
                });
            }
            row[i] = diagonal;
        }

        Self::from_rows(rows)
    }
}
