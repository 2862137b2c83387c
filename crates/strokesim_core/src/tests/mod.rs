//! Integration tests for the cohort simulation engine
//!
//! Tests are organized by topic:
//! - `cohort` - Cohort mechanics: determinism, survival curve, censoring
//! - `psa` - Probabilistic sensitivity analysis and paired comparison
//! - `scenario` - End-to-end two-arm therapy comparison

mod psa;
