//! Command-line front end for the stroke Markov cohort simulator.

pub mod format;
pub mod logging;
pub mod report;

use std::path::Path;

use color_eyre::eyre::WrapErr;
use strokesim_core::SimulationConfig;

pub use logging::init_logging;

/// Load a simulation configuration from a JSON file.
pub fn load_config(path: &Path) -> color_eyre::Result<SimulationConfig> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
    let config: SimulationConfig = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_round_tripped_config() {
        let config = SimulationConfig {
            pop_size: 123,
            ..Default::default()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&config).unwrap().as_bytes())
            .unwrap();

        let loaded = load_config(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/config.json")).is_err());
    }
}
