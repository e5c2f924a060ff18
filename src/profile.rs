//! Client electrical profiles, evaluation parameters, and demo presets.

use std::path::Path;

use crate::adapter::RawClientProfile;
use crate::eval::error::EvalError;

/// Electrical profile of a single utility client.
///
/// Immutable input to the evaluator. Capacities follow utility metering
/// conventions: demand figures in kVA, solar nameplate in kW, energy in
/// kWh. `sanctioned_load_kva >= contract_demand_kva` is typical but not
/// enforced; real connection data violates it in places and the
/// viability checks report such rows rather than rejecting them.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientProfile {
    /// Client name, used for display only.
    pub name: String,
    /// Supply voltage level (kV).
    pub voltage_level_kv: f64,
    /// Contracted peak demand capacity (kVA).
    pub contract_demand_kva: f64,
    /// Maximum load the connection is sanctioned for (kVA).
    pub sanctioned_load_kva: f64,
    /// Installed solar inverter-rated capacity (kW AC).
    pub installed_solar_ac_kw: f64,
    /// Installed solar panel-rated capacity (kW DC).
    pub installed_solar_dc_kw: f64,
    /// Annual energy consumption (kWh).
    pub annual_consumption_kwh: f64,
    /// Base energy tariff (currency per kWh).
    pub base_tariff_per_kwh: f64,
    /// Share of consumption already met from green sources (0.0 to 1.0).
    pub percent_green_consumption: f64,
    /// Average load factor (0.0 to 1.0). Display only.
    pub average_load_factor: f64,
    /// Share of consumption falling in the 6-10 PM window (0.0 to 1.0). Display only.
    pub evening_peak_share: f64,
    /// Share of consumption falling in the 6-8 AM window (0.0 to 1.0). Display only.
    pub morning_peak_share: f64,
    /// Annual solar generation already set off against consumption (kWh). Display only.
    pub annual_setoff_kwh: f64,
}

/// User-tunable evaluation parameters.
///
/// The charge-waiver percentage is derived deterministically from the
/// BESS sizing (see [`crate::eval::evaluator::waiver_percent`]) and is
/// not independently settable.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationParameters {
    /// BESS sizing as a percent of installed DC solar capacity (0 to 100).
    pub bess_percent_of_solar: f64,
}

impl Default for EvaluationParameters {
    fn default() -> Self {
        Self {
            bess_percent_of_solar: 10.0,
        }
    }
}

impl ClientProfile {
    /// Returns the textile-mill demo client: mid-size 33 kV consumer
    /// with headroom under both contract demand and sanctioned load.
    pub fn textile_mill() -> Self {
        Self {
            name: "Textile Mill".to_string(),
            voltage_level_kv: 33.0,
            contract_demand_kva: 2000.0,
            sanctioned_load_kva: 2500.0,
            installed_solar_ac_kw: 500.0,
            installed_solar_dc_kw: 700.0,
            annual_consumption_kwh: 3.0e6,
            base_tariff_per_kwh: 8.5,
            percent_green_consumption: 0.12,
            average_load_factor: 0.62,
            evening_peak_share: 0.18,
            morning_peak_share: 0.07,
            annual_setoff_kwh: 8.2e5,
        }
    }

    /// Returns the steel-rolling demo client: heavy 132 kV consumer
    /// whose sanctioned load sits below contract demand, a shape that
    /// occurs in real connection data.
    pub fn steel_rolling() -> Self {
        Self {
            name: "Steel Rolling".to_string(),
            voltage_level_kv: 132.0,
            contract_demand_kva: 12_000.0,
            sanctioned_load_kva: 11_000.0,
            installed_solar_ac_kw: 3000.0,
            installed_solar_dc_kw: 4200.0,
            annual_consumption_kwh: 4.8e7,
            base_tariff_per_kwh: 7.75,
            percent_green_consumption: 0.08,
            average_load_factor: 0.81,
            evening_peak_share: 0.22,
            morning_peak_share: 0.09,
            annual_setoff_kwh: 4.9e6,
        }
    }

    /// Returns the cold-storage demo client: small 11 kV consumer with
    /// thin contract-demand headroom but room under sanctioned load.
    pub fn cold_storage() -> Self {
        Self {
            name: "Cold Storage".to_string(),
            voltage_level_kv: 11.0,
            contract_demand_kva: 750.0,
            sanctioned_load_kva: 900.0,
            installed_solar_ac_kw: 650.0,
            installed_solar_dc_kw: 910.0,
            annual_consumption_kwh: 2.1e6,
            base_tariff_per_kwh: 9.1,
            percent_green_consumption: 0.34,
            average_load_factor: 0.58,
            evening_peak_share: 0.26,
            morning_peak_share: 0.11,
            annual_setoff_kwh: 1.05e6,
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["textile_mill", "steel_rolling", "cold_storage"];

    /// Loads a client profile from a named preset.
    ///
    /// # Errors
    ///
    /// Returns an `EvalError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, EvalError> {
        match name {
            "textile_mill" => Ok(Self::textile_mill()),
            "steel_rolling" => Ok(Self::steel_rolling()),
            "cold_storage" => Ok(Self::cold_storage()),
            _ => Err(EvalError::InvalidInput {
                field: "preset".to_string(),
                reason: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a client profile from a TOML file.
    ///
    /// Required fields that are absent fail with
    /// [`EvalError::MissingField`]; they are never defaulted to zero.
    ///
    /// # Errors
    ///
    /// Returns an `EvalError` if the file cannot be read, the TOML is
    /// invalid, or a required field is missing.
    pub fn from_toml_file(path: &Path) -> Result<Self, EvalError> {
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::InvalidInput {
            field: "client".to_string(),
            reason: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a client profile from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an `EvalError` if the TOML is invalid or a required field
    /// is missing.
    pub fn from_toml_str(s: &str) -> Result<Self, EvalError> {
        let raw: RawClientProfile = toml::from_str(s).map_err(|e| EvalError::InvalidInput {
            field: "toml".to_string(),
            reason: e.to_string(),
        })?;
        raw.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_preset_textile_mill() {
        let profile = ClientProfile::from_preset("textile_mill");
        assert!(profile.is_ok());
    }

    #[test]
    fn from_preset_unknown() {
        let err = ClientProfile::from_preset("nonexistent");
        assert!(err.is_err());
        let msg = err.unwrap_err().to_string();
        assert!(msg.contains("unknown preset"));
    }

    #[test]
    fn all_presets_load() {
        for name in ClientProfile::PRESETS {
            let profile = ClientProfile::from_preset(name);
            assert!(profile.is_ok(), "preset \"{name}\" should load");
        }
    }

    #[test]
    fn steel_rolling_has_inverted_sanctioned_load() {
        // Deliberately ships the SL < CD data shape seen in the field.
        let p = ClientProfile::steel_rolling();
        assert!(p.sanctioned_load_kva < p.contract_demand_kva);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
name = "Spinning Unit"
voltage_level_kv = 33.0
contract_demand_kva = 1500.0
sanctioned_load_kva = 1800.0
installed_solar_ac_kw = 400.0
installed_solar_dc_kw = 560.0
annual_consumption_kwh = 2.4e6
base_tariff_per_kwh = 8.2
percent_green_consumption = 0.15
"#;
        let profile = ClientProfile::from_toml_str(toml);
        assert!(profile.is_ok(), "valid TOML should parse: {:?}", profile.err());
        let profile = profile.ok();
        assert_eq!(
            profile.as_ref().map(|p| p.contract_demand_kva),
            Some(1500.0)
        );
        // display-only fields default to zero when absent
        assert_eq!(profile.as_ref().map(|p| p.average_load_factor), Some(0.0));
    }

    #[test]
    fn toml_missing_required_field_errors() {
        // No tariff: must fail, never default to zero.
        let toml = r#"
name = "Spinning Unit"
contract_demand_kva = 1500.0
sanctioned_load_kva = 1800.0
installed_solar_ac_kw = 400.0
installed_solar_dc_kw = 560.0
annual_consumption_kwh = 2.4e6
"#;
        let err = ClientProfile::from_toml_str(toml);
        assert!(err.is_err());
        let msg = err.unwrap_err().to_string();
        assert!(msg.contains("base_tariff_per_kwh"), "got: {msg}");
    }

    #[test]
    fn default_parameters_match_slider_default() {
        let params = EvaluationParameters::default();
        assert_eq!(params.bess_percent_of_solar, 10.0);
    }
}
