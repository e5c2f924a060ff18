//! Field-mapping adapter between raw client records and [`ClientProfile`].
//!
//! Ingestion collaborators hand over string-keyed records whose column
//! names vary per source sheet. The mapping from columns to canonical
//! fields lives here, in one place, together with the numeric cleanup
//! (thousands separators, percent suffixes). A required field that is
//! absent or blank fails with [`EvalError::MissingField`]; it is never
//! substituted with zero.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::eval::error::EvalError;
use crate::profile::ClientProfile;

/// Client profile with optional fields, as deserialized from TOML or a
/// JSON request body.
///
/// [`RawClientProfile::resolve`] enforces presence of the required
/// fields and applies the display-only defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawClientProfile {
    /// Client name. Defaults to `"Unnamed Client"`.
    pub name: Option<String>,
    /// Supply voltage level (kV). Display only, defaults to 0.
    pub voltage_level_kv: Option<f64>,
    /// Contracted peak demand capacity (kVA). Required.
    pub contract_demand_kva: Option<f64>,
    /// Sanctioned load (kVA). Required.
    pub sanctioned_load_kva: Option<f64>,
    /// Installed solar AC capacity (kW). Required.
    pub installed_solar_ac_kw: Option<f64>,
    /// Installed solar DC capacity (kW). Required.
    pub installed_solar_dc_kw: Option<f64>,
    /// Annual consumption (kWh). Required.
    pub annual_consumption_kwh: Option<f64>,
    /// Base tariff (currency/kWh). Required.
    pub base_tariff_per_kwh: Option<f64>,
    /// Green consumption share (0.0 to 1.0). Defaults to 0.
    pub percent_green_consumption: Option<f64>,
    /// Average load factor (0.0 to 1.0). Display only, defaults to 0.
    pub average_load_factor: Option<f64>,
    /// 6-10 PM consumption share. Display only, defaults to 0.
    pub evening_peak_share: Option<f64>,
    /// 6-8 AM consumption share. Display only, defaults to 0.
    pub morning_peak_share: Option<f64>,
    /// Annual solar setoff (kWh). Display only, defaults to 0.
    pub annual_setoff_kwh: Option<f64>,
}

impl RawClientProfile {
    /// Resolves the raw record into a [`ClientProfile`].
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::MissingField`] naming the first required
    /// field that is absent.
    pub fn resolve(self) -> Result<ClientProfile, EvalError> {
        fn required(value: Option<f64>, field: &str) -> Result<f64, EvalError> {
            value.ok_or_else(|| EvalError::MissingField {
                field: field.to_string(),
            })
        }

        Ok(ClientProfile {
            name: self.name.unwrap_or_else(|| "Unnamed Client".to_string()),
            voltage_level_kv: self.voltage_level_kv.unwrap_or(0.0),
            contract_demand_kva: required(self.contract_demand_kva, "contract_demand_kva")?,
            sanctioned_load_kva: required(self.sanctioned_load_kva, "sanctioned_load_kva")?,
            installed_solar_ac_kw: required(self.installed_solar_ac_kw, "installed_solar_ac_kw")?,
            installed_solar_dc_kw: required(self.installed_solar_dc_kw, "installed_solar_dc_kw")?,
            annual_consumption_kwh: required(self.annual_consumption_kwh, "annual_consumption_kwh")?,
            base_tariff_per_kwh: required(self.base_tariff_per_kwh, "base_tariff_per_kwh")?,
            percent_green_consumption: self.percent_green_consumption.unwrap_or(0.0),
            average_load_factor: self.average_load_factor.unwrap_or(0.0),
            evening_peak_share: self.evening_peak_share.unwrap_or(0.0),
            morning_peak_share: self.morning_peak_share.unwrap_or(0.0),
            annual_setoff_kwh: self.annual_setoff_kwh.unwrap_or(0.0),
        })
    }
}

/// Column-name mapping from a source sheet to canonical profile fields.
///
/// The default mapping carries the long-form sheet headers. Sources
/// with renamed columns override individual fields with struct-update
/// syntax.
#[derive(Debug, Clone)]
pub struct FieldMap {
    /// Client name column.
    pub name: String,
    /// Voltage level column.
    pub voltage_level: String,
    /// Contract demand column.
    pub contract_demand: String,
    /// Sanctioned load column.
    pub sanctioned_load: String,
    /// Installed solar AC column.
    pub installed_solar_ac: String,
    /// Installed solar DC column.
    pub installed_solar_dc: String,
    /// Annual consumption column.
    pub annual_consumption: String,
    /// Tariff column.
    pub tariff: String,
    /// Green consumption share column.
    pub percent_green: String,
    /// Average load factor column.
    pub average_load_factor: String,
    /// Evening (6-10 PM) consumption share column.
    pub evening_peak_share: String,
    /// Morning (6-8 AM) consumption share column.
    pub morning_peak_share: String,
    /// Annual setoff column.
    pub annual_setoff: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            name: "Client Name".to_string(),
            voltage_level: "Voltage Level".to_string(),
            contract_demand: "Contract Demand (kVA)".to_string(),
            sanctioned_load: "Sanctioned Load (kVA)".to_string(),
            installed_solar_ac: "Installed Solar Capacity (AC)".to_string(),
            installed_solar_dc: "Installed Solar Capacity (DC)".to_string(),
            annual_consumption: "Annual Consumption".to_string(),
            tariff: "Tariff".to_string(),
            percent_green: "Percent Green Consumption".to_string(),
            average_load_factor: "Average Load Factor".to_string(),
            evening_peak_share: "6-10 PM Consumption".to_string(),
            morning_peak_share: "6-8 AM Consumption".to_string(),
            annual_setoff: "Annual Setoff".to_string(),
        }
    }
}

/// Parses a cell value into a number.
///
/// Strips surrounding whitespace and `,` thousands separators. A
/// trailing `%` divides the value by 100, matching how the source
/// sheets store share columns.
fn parse_number(value: &str, field: &str) -> Result<f64, EvalError> {
    let trimmed = value.trim();
    let (body, percent) = match trimmed.strip_suffix('%') {
        Some(body) => (body.trim_end(), true),
        None => (trimmed, false),
    };
    let cleaned: String = body.chars().filter(|c| *c != ',').collect();

    match cleaned.parse::<f64>() {
        Ok(n) if percent => Ok(n / 100.0),
        Ok(n) => Ok(n),
        Err(_) => Err(EvalError::InvalidInput {
            field: field.to_string(),
            reason: format!("cannot parse \"{trimmed}\" as a number"),
        }),
    }
}

fn cell<'a>(record: &'a BTreeMap<String, String>, column: &str) -> Option<&'a str> {
    record
        .get(column)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn required_cell(
    record: &BTreeMap<String, String>,
    column: &str,
    field: &str,
) -> Result<f64, EvalError> {
    match cell(record, column) {
        Some(value) => parse_number(value, field),
        None => Err(EvalError::MissingField {
            field: field.to_string(),
        }),
    }
}

fn optional_cell(
    record: &BTreeMap<String, String>,
    column: &str,
    field: &str,
) -> Result<f64, EvalError> {
    match cell(record, column) {
        // Present but malformed is an error, not a silent zero.
        Some(value) => parse_number(value, field),
        None => Ok(0.0),
    }
}

/// Builds a [`ClientProfile`] from a raw string-keyed record.
///
/// # Arguments
///
/// * `record` - One row of the source sheet, keyed by column name
/// * `map` - Column mapping for this source
///
/// # Errors
///
/// Returns [`EvalError::MissingField`] for an absent or blank required
/// column and [`EvalError::InvalidInput`] for an unparsable value.
pub fn profile_from_record(
    record: &BTreeMap<String, String>,
    map: &FieldMap,
) -> Result<ClientProfile, EvalError> {
    Ok(ClientProfile {
        name: cell(record, &map.name)
            .unwrap_or("Unnamed Client")
            .to_string(),
        voltage_level_kv: optional_cell(record, &map.voltage_level, "voltage_level_kv")?,
        contract_demand_kva: required_cell(record, &map.contract_demand, "contract_demand_kva")?,
        sanctioned_load_kva: required_cell(record, &map.sanctioned_load, "sanctioned_load_kva")?,
        installed_solar_ac_kw: required_cell(
            record,
            &map.installed_solar_ac,
            "installed_solar_ac_kw",
        )?,
        installed_solar_dc_kw: required_cell(
            record,
            &map.installed_solar_dc,
            "installed_solar_dc_kw",
        )?,
        annual_consumption_kwh: required_cell(
            record,
            &map.annual_consumption,
            "annual_consumption_kwh",
        )?,
        base_tariff_per_kwh: required_cell(record, &map.tariff, "base_tariff_per_kwh")?,
        percent_green_consumption: optional_cell(
            record,
            &map.percent_green,
            "percent_green_consumption",
        )?,
        average_load_factor: optional_cell(
            record,
            &map.average_load_factor,
            "average_load_factor",
        )?,
        evening_peak_share: optional_cell(record, &map.evening_peak_share, "evening_peak_share")?,
        morning_peak_share: optional_cell(record, &map.morning_peak_share, "morning_peak_share")?,
        annual_setoff_kwh: optional_cell(record, &map.annual_setoff, "annual_setoff_kwh")?,
    })
}
