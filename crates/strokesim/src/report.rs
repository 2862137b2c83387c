//! Text and JSON reporting over simulation outputs.

use serde::Serialize;
use strokesim_core::{DifferenceStat, SimulationOutput, survival_time_increase};

use crate::format::{format_confidence_level, format_estimate_interval};

/// Per-arm outcome summary, ready for printing or serialization
#[derive(Debug, Clone, Serialize)]
pub struct ArmSummary {
    pub therapy: String,
    pub population: usize,
    pub censored: usize,
    pub mean_survival_time: f64,
    pub survival_time_ci: (f64, f64),
    /// None when no patient ever reached the post-stroke state
    pub mean_time_to_post_stroke: Option<f64>,
    pub time_to_post_stroke_ci: Option<(f64, f64)>,
    pub stroke_count: usize,
}

impl ArmSummary {
    pub fn from_output(output: &SimulationOutput, alpha: f64) -> color_eyre::Result<Self> {
        let survival = output.summary_survival_time()?;
        let post_stroke = match output.summary_time_to_post_stroke() {
            Ok(stat) => Some((stat.mean(), stat.t_ci(alpha)?)),
            Err(_) => None,
        };

        Ok(Self {
            therapy: output.therapy.label().to_string(),
            population: output.survival_times().len(),
            censored: output.censored_count,
            mean_survival_time: survival.mean(),
            survival_time_ci: survival.t_ci(alpha)?,
            mean_time_to_post_stroke: post_stroke.map(|(m, _)| m),
            time_to_post_stroke_ci: post_stroke.map(|(_, ci)| ci),
            stroke_count: output.stroke_count(),
        })
    }
}

/// Comparative survival-time gain of the intervention arm
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    pub paired: bool,
    pub mean_increase: f64,
    pub increase_ci: (f64, f64),
}

impl ComparisonSummary {
    pub fn from_outputs(
        intervention: &SimulationOutput,
        reference: &SimulationOutput,
        alpha: f64,
        paired: bool,
    ) -> color_eyre::Result<Self> {
        let increase: DifferenceStat = survival_time_increase(intervention, reference, paired)?;
        Ok(Self {
            paired,
            mean_increase: increase.mean(),
            increase_ci: increase.t_ci(alpha)?,
        })
    }
}

/// Everything the run produced, for `--output json`
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub no_therapy: ArmSummary,
    pub anticoagulation: ArmSummary,
    pub comparison: ComparisonSummary,
    pub survival_curves: SurvivalCurves,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurvivalCurves {
    pub no_therapy: Vec<(f64, usize)>,
    pub anticoagulation: Vec<(f64, usize)>,
}

/// Print one arm's outcomes in the classic estimate-and-interval form.
pub fn print_outcomes(summary: &ArmSummary, alpha: f64) {
    let level = format_confidence_level(alpha);

    println!("{}", summary.therapy);
    println!(
        "  Estimate of mean survival time and {level} confidence interval: {}",
        format_estimate_interval(summary.mean_survival_time, summary.survival_time_ci, 2)
    );
    match (summary.mean_time_to_post_stroke, summary.time_to_post_stroke_ci) {
        (Some(mean), Some(ci)) => println!(
            "  Estimate of mean time to post-stroke and {level} confidence interval: {}",
            format_estimate_interval(mean, ci, 2)
        ),
        _ => println!("  No patient reached the post-stroke state"),
    }
    println!("  Stroke events observed: {}", summary.stroke_count);
    println!(
        "  Patients alive at the horizon (censored): {} of {}",
        summary.censored, summary.population
    );
}

/// Print the average survival-time increase under the intervention.
pub fn print_comparative_outcomes(comparison: &ComparisonSummary, alpha: f64) {
    let design = if comparison.paired {
        "paired"
    } else {
        "independent"
    };
    println!(
        "Average increase in survival time ({design}) and {} confidence interval: {}",
        format_confidence_level(alpha),
        format_estimate_interval(comparison.mean_increase, comparison.increase_ci, 2)
    );
}

/// Print both arms' survival curves side by side.
pub fn print_survival_curves(reference: &SimulationOutput, intervention: &SimulationOutput) {
    println!("Survival curve (patients alive at each time step)");
    println!("{:>6}  {:>12}  {:>16}", "year", "no therapy", "anticoagulation");
    for ((time, ref_alive), (_, int_alive)) in reference
        .survival_curve()
        .iter()
        .zip(intervention.survival_curve())
    {
        println!("{time:>6.1}  {ref_alive:>12}  {int_alive:>16}");
    }
}
