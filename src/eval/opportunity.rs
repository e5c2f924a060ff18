//! Opportunity result types produced by the evaluator.

use std::fmt;

use serde::Serialize;

/// The four fixed capacity-extension options, in evaluation order.
///
/// The declaration order doubles as the recommendation tie-break
/// priority: an argmax scan over results in this order keeps the first
/// occurrence on equal ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    /// Expand solar up to contract demand.
    SolarToContractDemand,
    /// Expand solar up to sanctioned load.
    SolarToSanctionedLoad,
    /// Add battery storage sized as a percent of installed DC solar.
    Bess,
    /// Add wind capacity sized to full contract demand.
    Wind,
}

impl OpportunityKind {
    /// All kinds in evaluation (and tie-break priority) order.
    pub const ALL: [Self; 4] = [
        Self::SolarToContractDemand,
        Self::SolarToSanctionedLoad,
        Self::Bess,
        Self::Wind,
    ];

    /// Stable snake_case identifier, used in CSV export.
    pub fn id(&self) -> &'static str {
        match self {
            Self::SolarToContractDemand => "solar_to_cd",
            Self::SolarToSanctionedLoad => "solar_to_sl",
            Self::Bess => "bess",
            Self::Wind => "wind",
        }
    }

    /// Human-readable label, used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SolarToContractDemand => "Solar to CD",
            Self::SolarToSanctionedLoad => "Solar to SL",
            Self::Bess => "BESS",
            Self::Wind => "Wind",
        }
    }
}

impl fmt::Display for OpportunityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sizing and annualized return for one capacity-extension option.
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityResult {
    /// Which option this row describes.
    pub kind: OpportunityKind,
    /// Sizing of the opportunity (MW).
    pub capacity_mw: f64,
    /// Annualized saving (currency). Zero when the option is sized to nothing.
    pub annual_saving: f64,
    /// Annualized return on capital as a percentage. Never negative;
    /// zero when the option is sized to nothing.
    pub roi_percent: f64,
}

/// Complete output of one evaluation: four option rows plus the
/// recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// One row per option, in fixed evaluation order.
    pub results: [OpportunityResult; 4],
    /// Option with the maximum ROI (ties keep the earlier option).
    pub recommended: OpportunityKind,
    /// Echo of the BESS sizing parameter used (percent of DC solar).
    pub bess_percent_of_solar: f64,
    /// Charge-waiver percentage derived from the BESS sizing.
    pub waiver_percent: f64,
}

impl Evaluation {
    /// Returns the full result row for the recommended option.
    pub fn recommended_result(&self) -> &OpportunityResult {
        // results always holds all four kinds, so the scan cannot fail
        self.results
            .iter()
            .find(|r| r.kind == self.recommended)
            .unwrap_or(&self.results[0])
    }
}
