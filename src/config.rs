//! TOML-based cost and yield assumptions used by the evaluator.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Capital-expenditure and generation-yield assumptions.
///
/// All fields default to the planning figures the evaluator was built
/// around. Load overrides from TOML with
/// [`CostAssumptions::from_toml_file`] or use
/// [`CostAssumptions::default`] directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostAssumptions {
    /// Capital cost per MW of solar capacity.
    pub capex_solar_per_mw: f64,
    /// Capital cost per MW of battery storage.
    pub capex_bess_per_mw: f64,
    /// Capital cost per MW of wind capacity.
    pub capex_wind_per_mw: f64,
    /// Annual generation per installed solar MW (kWh/year).
    pub solar_gen_kwh_per_mw_year: f64,
    /// Annual generation per installed wind MW (kWh/year).
    pub wind_gen_kwh_per_mw_year: f64,
    /// Baseline avoided-charge rate unlocked by BESS (currency/kWh).
    pub bess_impact_rate_per_kwh: f64,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            capex_solar_per_mw: 3.5e6,
            capex_bess_per_mw: 4.0e6,
            capex_wind_per_mw: 6.5e6,
            solar_gen_kwh_per_mw_year: 16.5e5,
            wind_gen_kwh_per_mw_year: 26.0e5,
            bess_impact_rate_per_kwh: 1.65,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Field name (e.g., `"capex_solar_per_mw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl CostAssumptions {
    /// Parses assumptions from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "assumptions".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses assumptions from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Every assumption is a divisor or multiplier in an ROI formula, so
    /// each must be strictly positive and finite. Returns an empty vector
    /// if the assumptions are valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let fields = [
            ("capex_solar_per_mw", self.capex_solar_per_mw),
            ("capex_bess_per_mw", self.capex_bess_per_mw),
            ("capex_wind_per_mw", self.capex_wind_per_mw),
            ("solar_gen_kwh_per_mw_year", self.solar_gen_kwh_per_mw_year),
            ("wind_gen_kwh_per_mw_year", self.wind_gen_kwh_per_mw_year),
            ("bess_impact_rate_per_kwh", self.bess_impact_rate_per_kwh),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                errors.push(ConfigError {
                    field: name.into(),
                    message: format!("must be a finite value > 0, got {value}"),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let assumptions = CostAssumptions::default();
        let errors = assumptions.validate();
        assert!(errors.is_empty(), "defaults should be valid: {errors:?}");
    }

    #[test]
    fn defaults_match_planning_figures() {
        let a = CostAssumptions::default();
        assert_eq!(a.capex_solar_per_mw, 3.5e6);
        assert_eq!(a.capex_bess_per_mw, 4.0e6);
        assert_eq!(a.capex_wind_per_mw, 6.5e6);
        assert_eq!(a.solar_gen_kwh_per_mw_year, 16.5e5);
        assert_eq!(a.wind_gen_kwh_per_mw_year, 26.0e5);
        assert_eq!(a.bess_impact_rate_per_kwh, 1.65);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
capex_solar_per_mw = 3.2e6
capex_wind_per_mw = 7.0e6
"#;
        let a = CostAssumptions::from_toml_str(toml);
        assert!(a.is_ok(), "valid TOML should parse: {:?}", a.err());
        let a = a.ok();
        // overridden
        assert_eq!(a.as_ref().map(|a| a.capex_solar_per_mw), Some(3.2e6));
        assert_eq!(a.as_ref().map(|a| a.capex_wind_per_mw), Some(7.0e6));
        // kept default
        assert_eq!(a.as_ref().map(|a| a.capex_bess_per_mw), Some(4.0e6));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
capex_solar_per_mw = 3.2e6
bogus_field = true
"#;
        let result = CostAssumptions::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_zero_capex() {
        let mut a = CostAssumptions::default();
        a.capex_bess_per_mw = 0.0;
        let errors = a.validate();
        assert!(errors.iter().any(|e| e.field == "capex_bess_per_mw"));
    }

    #[test]
    fn validation_catches_negative_rate() {
        let mut a = CostAssumptions::default();
        a.bess_impact_rate_per_kwh = -1.65;
        let errors = a.validate();
        assert!(errors.iter().any(|e| e.field == "bess_impact_rate_per_kwh"));
    }

    #[test]
    fn validation_catches_nan_yield() {
        let mut a = CostAssumptions::default();
        a.solar_gen_kwh_per_mw_year = f64::NAN;
        let errors = a.validate();
        assert!(errors.iter().any(|e| e.field == "solar_gen_kwh_per_mw_year"));
    }
}
