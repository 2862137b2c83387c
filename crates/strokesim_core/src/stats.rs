//! Summary statistics over per-patient outcome collections.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StatError};
use crate::model::SimulationOutput;

/// Moments of one observation collection, with Student-t intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStat {
    n: usize,
    mean: f64,
    st_dev: f64,
}

impl SummaryStat {
    /// Empty collections are a fatal input error.
    pub fn new(observations: Vec<f64>) -> Result<Self, StatError> {
        if observations.is_empty() {
            return Err(StatError::EmptyObservations);
        }

        let n = observations.len();
        let mean = observations.iter().sum::<f64>() / n as f64;
        let st_dev = if n < 2 {
            0.0
        } else {
            let ss: f64 = observations.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        };

        Ok(Self { n, mean, st_dev })
    }

    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation (n - 1 denominator)
    #[must_use]
    pub fn st_dev(&self) -> f64 {
        self.st_dev
    }

    /// Standard error of the mean
    #[must_use]
    pub fn st_err(&self) -> f64 {
        self.st_dev / (self.n as f64).sqrt()
    }

    /// Two-sided Student-t confidence interval with n - 1 degrees of freedom.
    /// Degenerate inputs (single observation, zero spread) give a zero-width
    /// interval at the mean.
    pub fn t_ci(&self, alpha: f64) -> Result<(f64, f64), ConfigError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha(alpha));
        }
        let se = self.st_err();
        if self.n < 2 || se == 0.0 {
            return Ok((self.mean, self.mean));
        }
        let half_width = t_quantile(1.0 - alpha / 2.0, self.n - 1) * se;
        Ok((self.mean - half_width, self.mean + half_width))
    }
}

/// Difference of independent-sample means with pooled-variance standard error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceStatIndp {
    mean_diff: f64,
    st_err: f64,
    df: usize,
}

impl DifferenceStatIndp {
    pub fn new(x: &[f64], y_ref: &[f64]) -> Result<Self, StatError> {
        let sx = SummaryStat::new(x.to_vec())?;
        let sy = SummaryStat::new(y_ref.to_vec())?;

        let (nx, ny) = (sx.n() as f64, sy.n() as f64);
        let df = sx.n() + sy.n() - 2;
        let st_err = if df == 0 {
            0.0
        } else {
            let pooled_var = ((nx - 1.0) * sx.st_dev().powi(2)
                + (ny - 1.0) * sy.st_dev().powi(2))
                / df as f64;
            (pooled_var * (1.0 / nx + 1.0 / ny)).sqrt()
        };

        Ok(Self {
            mean_diff: sx.mean() - sy.mean(),
            st_err,
            df,
        })
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean_diff
    }

    pub fn t_ci(&self, alpha: f64) -> Result<(f64, f64), ConfigError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha(alpha));
        }
        if self.df == 0 || self.st_err == 0.0 {
            return Ok((self.mean_diff, self.mean_diff));
        }
        let half_width = t_quantile(1.0 - alpha / 2.0, self.df) * self.st_err;
        Ok((self.mean_diff - half_width, self.mean_diff + half_width))
    }
}

/// Summary of element-wise paired differences. Requires equal-length samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceStatPaired {
    stat: SummaryStat,
}

impl DifferenceStatPaired {
    pub fn new(x: &[f64], y_ref: &[f64]) -> Result<Self, StatError> {
        if x.len() != y_ref.len() {
            return Err(StatError::LengthMismatch {
                x_len: x.len(),
                y_len: y_ref.len(),
            });
        }
        let diffs: Vec<f64> = x.iter().zip(y_ref).map(|(a, b)| a - b).collect();
        Ok(Self {
            stat: SummaryStat::new(diffs)?,
        })
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.stat.mean()
    }

    pub fn t_ci(&self, alpha: f64) -> Result<(f64, f64), ConfigError> {
        self.stat.t_ci(alpha)
    }
}

/// Comparative difference statistic, keyed by sampling design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DifferenceStat {
    Paired(DifferenceStatPaired),
    Independent(DifferenceStatIndp),
}

impl DifferenceStat {
    #[must_use]
    pub fn mean(&self) -> f64 {
        match self {
            DifferenceStat::Paired(s) => s.mean(),
            DifferenceStat::Independent(s) => s.mean(),
        }
    }

    pub fn t_ci(&self, alpha: f64) -> Result<(f64, f64), ConfigError> {
        match self {
            DifferenceStat::Paired(s) => s.t_ci(alpha),
            DifferenceStat::Independent(s) => s.t_ci(alpha),
        }
    }
}

/// Increase in survival time of `intervention` over `reference`.
///
/// When the arms were simulated with paired parameter draws (PSA on), the
/// paired statistic applies; otherwise the arms are treated as independent.
pub fn survival_time_increase(
    intervention: &SimulationOutput,
    reference: &SimulationOutput,
    paired: bool,
) -> Result<DifferenceStat, StatError> {
    if paired {
        Ok(DifferenceStat::Paired(DifferenceStatPaired::new(
            intervention.survival_times(),
            reference.survival_times(),
        )?))
    } else {
        Ok(DifferenceStat::Independent(DifferenceStatIndp::new(
            intervention.survival_times(),
            reference.survival_times(),
        )?))
    }
}

/// Two-sided Student-t quantile for `p` in (0.5, 1) and `df >= 1`.
///
/// Exact closed forms for df 1 and 2; otherwise the normal quantile plus the
/// Cornish-Fisher tail expansion in 1/df, good to about 1e-4 for df >= 3.
fn t_quantile(p: f64, df: usize) -> f64 {
    match df {
        1 => (std::f64::consts::PI * (p - 0.5)).tan(),
        2 => (2.0 * p - 1.0) * (2.0 / (4.0 * p * (1.0 - p))).sqrt(),
        _ => {
            let x = normal_quantile(p);
            let v = df as f64;
            let x2 = x * x;
            let g1 = x * (x2 + 1.0) / 4.0;
            let g2 = x * (5.0 * x2 * x2 + 16.0 * x2 + 3.0) / 96.0;
            let g3 = x * (3.0 * x2.powi(3) + 19.0 * x2 * x2 + 17.0 * x2 - 15.0) / 384.0;
            let g4 = x
                * (79.0 * x2.powi(4) + 776.0 * x2.powi(3) + 1482.0 * x2 * x2
                    - 1920.0 * x2
                    - 945.0)
                / 92160.0;
            x + g1 / v + g2 / (v * v) + g3 / v.powi(3) + g4 / v.powi(4)
        }
    }
}

/// Standard normal quantile by Acklam's rational approximation.
fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e1,
        2.209460984245205e2,
        -2.759285104469687e2,
        1.383577518672690e2,
        -3.066479806614716e1,
        2.506628277459239e0,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e1,
        1.615858368580409e2,
        -1.556989798598866e2,
        6.680131188771972e1,
        -1.328068155288572e1,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-3,
        -3.223964580411365e-1,
        -2.400758277161838e0,
        -2.549732539343734e0,
        4.374664141464968e0,
        2.938163982698783e0,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-3,
        3.224671290700398e-1,
        2.445134137142996e0,
        3.754408661907416e0,
    ];
    const P_LOW: f64 = 0.02425;

    if p <= P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p < 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_stat_rejects_empty_input() {
        assert_eq!(
            SummaryStat::new(Vec::new()).unwrap_err(),
            StatError::EmptyObservations
        );
    }

    #[test]
    fn summary_stat_moments() {
        let stat = SummaryStat::new(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stat.mean() - 5.0).abs() < 1e-12);
        // sample variance of this set is 32/7
        assert!((stat.st_dev() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn t_ci_covers_the_mean_symmetrically() {
        let stat = SummaryStat::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let (lo, hi) = stat.t_ci(0.05).unwrap();
        assert!(lo < stat.mean() && stat.mean() < hi);
        assert!((stat.mean() - lo - (hi - stat.mean())).abs() < 1e-12);
        // half width = t(0.975, 4) * se = 2.7764 * sqrt(2.5)/sqrt(5)
        let expected = 2.7764 * (2.5f64 / 5.0).sqrt();
        assert!((hi - stat.mean() - expected).abs() < 1e-3);
    }

    #[test]
    fn t_ci_rejects_invalid_alpha() {
        let stat = SummaryStat::new(vec![1.0, 2.0]).unwrap();
        assert!(matches!(stat.t_ci(0.0), Err(ConfigError::InvalidAlpha(_))));
        assert!(matches!(stat.t_ci(1.0), Err(ConfigError::InvalidAlpha(_))));
    }

    #[test]
    fn single_observation_gives_degenerate_interval() {
        let stat = SummaryStat::new(vec![3.5]).unwrap();
        assert_eq!(stat.t_ci(0.05).unwrap(), (3.5, 3.5));
    }

    #[test]
    fn paired_difference_of_identical_samples_is_degenerate() {
        let x = vec![1.0, 2.5, 4.0, 8.0];
        let stat = DifferenceStatPaired::new(&x, &x).unwrap();
        assert_eq!(stat.mean(), 0.0);
        assert_eq!(stat.t_ci(0.05).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn paired_difference_rejects_mismatched_lengths() {
        assert_eq!(
            DifferenceStatPaired::new(&[1.0, 2.0], &[1.0]).unwrap_err(),
            StatError::LengthMismatch { x_len: 2, y_len: 1 }
        );
    }

    #[test]
    fn independent_difference_of_shifted_samples() {
        let x = vec![4.0, 5.0, 6.0];
        let y = vec![1.0, 2.0, 3.0];
        let stat = DifferenceStatIndp::new(&x, &y).unwrap();
        assert!((stat.mean() - 3.0).abs() < 1e-12);
        let (lo, hi) = stat.t_ci(0.05).unwrap();
        assert!(lo < 3.0 && 3.0 < hi);
    }

    #[test]
    fn independent_difference_rejects_empty_samples() {
        assert!(DifferenceStatIndp::new(&[], &[1.0]).is_err());
    }

    #[test]
    fn t_quantile_matches_tables() {
        let cases = [
            (0.975, 1, 12.706),
            (0.975, 2, 4.303),
            (0.975, 5, 2.571),
            (0.975, 10, 2.228),
            (0.975, 30, 2.042),
            (0.95, 10, 1.812),
        ];
        for (p, df, expected) in cases {
            let got = t_quantile(p, df);
            assert!(
                (got - expected).abs() < 5e-3,
                "t({p}, {df}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn normal_quantile_matches_tables() {
        let cases = [(0.975, 1.95996), (0.95, 1.64485), (0.5, 0.0), (0.025, -1.95996)];
        for (p, expected) in cases {
            assert!((normal_quantile(p) - expected).abs() < 1e-4);
        }
    }
}
