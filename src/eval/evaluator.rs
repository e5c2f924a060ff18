//! Core ROI evaluation over a client profile.

use crate::config::CostAssumptions;
use crate::profile::{ClientProfile, EvaluationParameters};

use super::error::EvalError;
use super::opportunity::{Evaluation, OpportunityKind, OpportunityResult};

/// Derives the charge-waiver percentage from the BESS sizing percent.
///
/// The waiver steps up in 5-point increments with the sizing slider and
/// saturates at 100 once the BESS reaches 30% of installed DC solar:
///
/// - `pct == 0` yields 0 (no BESS, no waiver);
/// - `0 < pct < 30` yields `75 + (floor(pct / 5) - 1) * 5`;
/// - `pct >= 30` yields 100.
///
/// Monotonically non-decreasing over the valid domain [0, 100].
pub fn waiver_percent(bess_percent_of_solar: f64) -> f64 {
    if bess_percent_of_solar == 0.0 {
        0.0
    } else if bess_percent_of_solar < 30.0 {
        75.0 + ((bess_percent_of_solar / 5.0).floor() - 1.0) * 5.0
    } else {
        100.0
    }
}

/// Checks that every field the ROI formulas read is finite and within
/// its domain.
///
/// Display-only profile fields are not validated here; they never enter
/// the arithmetic.
fn validate(profile: &ClientProfile, params: &EvaluationParameters) -> Result<(), EvalError> {
    let required = [
        ("contract_demand_kva", profile.contract_demand_kva),
        ("sanctioned_load_kva", profile.sanctioned_load_kva),
        ("installed_solar_ac_kw", profile.installed_solar_ac_kw),
        ("installed_solar_dc_kw", profile.installed_solar_dc_kw),
        ("annual_consumption_kwh", profile.annual_consumption_kwh),
        ("base_tariff_per_kwh", profile.base_tariff_per_kwh),
    ];

    for (field, value) in required {
        if !value.is_finite() {
            return Err(EvalError::InvalidInput {
                field: field.to_string(),
                reason: format!("must be a finite number, got {value}"),
            });
        }
        if value < 0.0 {
            return Err(EvalError::InvalidInput {
                field: field.to_string(),
                reason: format!("must be >= 0, got {value}"),
            });
        }
    }

    let green = profile.percent_green_consumption;
    if !green.is_finite() || !(0.0..=1.0).contains(&green) {
        return Err(EvalError::InvalidInput {
            field: "percent_green_consumption".to_string(),
            reason: format!("must be a fraction in [0.0, 1.0], got {green}"),
        });
    }

    let pct = params.bess_percent_of_solar;
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(EvalError::InvalidInput {
            field: "bess_percent_of_solar".to_string(),
            reason: format!("must be in [0, 100], got {pct}"),
        });
    }

    if profile.contract_demand_kva == 0.0 {
        // Wind is sized to full contract demand, so its ROI divides by CD.
        return Err(EvalError::DegenerateInput {
            reason: "contract_demand_kva is 0, wind ROI is undefined".to_string(),
        });
    }

    Ok(())
}

/// Evaluates the four capacity-extension options for one client.
///
/// Pure function: reads only its arguments, performs no I/O, and
/// identical inputs always produce identical outputs.
///
/// # Arguments
///
/// * `profile` - Client electrical profile
/// * `params` - Tunable evaluation parameters
/// * `assumptions` - Capex and yield assumptions
///
/// # Errors
///
/// Returns an `EvalError` if a formula input is out of domain
/// (`InvalidInput`) or contract demand is zero (`DegenerateInput`).
pub fn evaluate(
    profile: &ClientProfile,
    params: &EvaluationParameters,
    assumptions: &CostAssumptions,
) -> Result<Evaluation, EvalError> {
    validate(profile, params)?;

    let ac_mw = profile.installed_solar_ac_kw / 1000.0;
    let dc_mw = profile.installed_solar_dc_kw / 1000.0;
    let cd_mw = profile.contract_demand_kva / 1000.0;
    let sl_mw = profile.sanctioned_load_kva / 1000.0;
    let tariff = profile.base_tariff_per_kwh;

    let solar_row = |kind: OpportunityKind, available_mw: f64| {
        // The capacity term cancels algebraically, leaving ROI constant
        // whenever any headroom exists at all.
        let (saving, roi) = if available_mw > 0.0 {
            let saving = available_mw * assumptions.solar_gen_kwh_per_mw_year * tariff;
            let roi = saving / (available_mw * assumptions.capex_solar_per_mw);
            (saving, roi)
        } else {
            (0.0, 0.0)
        };
        OpportunityResult {
            kind,
            capacity_mw: available_mw.max(0.0),
            annual_saving: saving,
            roi_percent: roi * 100.0,
        }
    };

    let cd_available_mw = (cd_mw - ac_mw).max(0.0);
    let sl_available_mw = (sl_mw - ac_mw).max(0.0);
    let solar_to_cd = solar_row(OpportunityKind::SolarToContractDemand, cd_available_mw);
    let solar_to_sl = solar_row(OpportunityKind::SolarToSanctionedLoad, sl_available_mw);

    let pct = params.bess_percent_of_solar;
    let waiver = waiver_percent(pct);
    let bess_mw = dc_mw * pct / 100.0;
    let (bess_saving, bess_roi) = if bess_mw > 0.0 {
        let saving =
            profile.annual_consumption_kwh * assumptions.bess_impact_rate_per_kwh * waiver / 100.0;
        (saving, saving / (bess_mw * assumptions.capex_bess_per_mw))
    } else {
        (0.0, 0.0)
    };
    let bess = OpportunityResult {
        kind: OpportunityKind::Bess,
        capacity_mw: bess_mw,
        annual_saving: bess_saving,
        roi_percent: bess_roi * 100.0,
    };

    // Wind is sized to full contract demand with no headroom check;
    // cd_mw > 0 is guaranteed by validation above.
    let wind_mw = cd_mw;
    let wind_saving = wind_mw * assumptions.wind_gen_kwh_per_mw_year * tariff;
    let wind_roi = wind_saving / (wind_mw * assumptions.capex_wind_per_mw);
    let wind = OpportunityResult {
        kind: OpportunityKind::Wind,
        capacity_mw: wind_mw,
        annual_saving: wind_saving,
        roi_percent: wind_roi * 100.0,
    };

    let results = [solar_to_cd, solar_to_sl, bess, wind];

    // Argmax scan in evaluation order; strict comparison keeps the
    // earlier option on ties.
    let mut best = 0;
    for (i, r) in results.iter().enumerate() {
        if r.roi_percent > results[best].roi_percent {
            best = i;
        }
    }
    let recommended = results[best].kind;

    Ok(Evaluation {
        results,
        recommended,
        bess_percent_of_solar: pct,
        waiver_percent: waiver,
    })
}
