//! Shared test fixtures for integration tests.

use roi_eval::config::CostAssumptions;
use roi_eval::profile::{ClientProfile, EvaluationParameters};

/// Worked-example client profile (CD 2000 kVA, SL 2500 kVA, 500/700 kW
/// solar, 3 GWh/yr at 8.5/kWh).
pub fn example_profile() -> ClientProfile {
    ClientProfile {
        name: "Worked Example".to_string(),
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

/// Default evaluation parameters (BESS at 10% of DC solar).
pub fn default_params() -> EvaluationParameters {
    EvaluationParameters {
        bess_percent_of_solar: 10.0,
    }
}

/// Default cost assumptions (the built-in planning figures).
pub fn default_assumptions() -> CostAssumptions {
    CostAssumptions::default()
}
