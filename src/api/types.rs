//! API request and response types.
//!
//! Field names follow the CSV schema v1 conventions for consistency
//! across export formats.

use serde::{Deserialize, Serialize};

use crate::adapter::RawClientProfile;
use crate::eval::opportunity::{Evaluation, OpportunityResult};

/// Request body for `POST /evaluate`.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Client profile; required fields must be present.
    pub profile: RawClientProfile,
    /// Tunable parameters; defaults apply when omitted.
    #[serde(default)]
    pub params: ParamsBody,
}

/// Tunable parameters accepted by the API.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamsBody {
    /// BESS sizing as a percent of installed DC solar capacity.
    pub bess_percent_of_solar: f64,
}

impl Default for ParamsBody {
    fn default() -> Self {
        Self {
            bess_percent_of_solar: 10.0,
        }
    }
}

/// Single opportunity row using CSV schema v1 field names.
#[derive(Debug, Serialize)]
pub struct OpportunityRow {
    /// Stable option identifier (e.g., `"solar_to_cd"`).
    pub option: String,
    /// Human-readable option label.
    pub label: String,
    /// Sizing of the opportunity (MW).
    pub capacity_mw: f64,
    /// Annualized saving (currency).
    pub annual_saving: f64,
    /// Annualized return on capital (percent).
    pub roi_percent: f64,
}

impl From<&OpportunityResult> for OpportunityRow {
    fn from(r: &OpportunityResult) -> Self {
        Self {
            option: r.kind.id().to_string(),
            label: r.kind.label().to_string(),
            capacity_mw: r.capacity_mw,
            annual_saving: r.annual_saving,
            roi_percent: r.roi_percent,
        }
    }
}

/// Response body for `POST /evaluate`.
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    /// One row per option, in evaluation order.
    pub results: Vec<OpportunityRow>,
    /// Identifier of the recommended option.
    pub recommended: String,
    /// ROI of the recommended option (percent).
    pub recommended_roi_percent: f64,
    /// Echo of the BESS sizing parameter used.
    pub bess_percent_of_solar: f64,
    /// Charge-waiver percentage derived from the BESS sizing.
    pub waiver_percent: f64,
}

impl From<&Evaluation> for EvaluationResponse {
    fn from(e: &Evaluation) -> Self {
        Self {
            results: e.results.iter().map(OpportunityRow::from).collect(),
            recommended: e.recommended.id().to_string(),
            recommended_roi_percent: e.recommended_result().roi_percent,
            bess_percent_of_solar: e.bess_percent_of_solar,
            waiver_percent: e.waiver_percent,
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Stable error kind tag (`missing_field`, `invalid_input`,
    /// `degenerate_input`).
    pub kind: String,
}
