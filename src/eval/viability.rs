//! Spare-capacity viability checks for expansion opportunities.
//!
//! Independent of the ROI formulas: these feed the informational
//! opportunities table, not the investment ranking.

use std::fmt;

use crate::profile::ClientProfile;

/// Planning ratio applied when sizing DC panels for an AC expansion.
pub const DC_AC_PLANNING_RATIO: f64 = 1.4;

/// Minimum spare capacity, as a fraction of contract demand, for an
/// expansion to count as available.
pub const SPARE_CAPACITY_THRESHOLD: f64 = 0.2;

/// The expansion candidates covered by the viability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionKind {
    /// Add solar within the existing contract demand.
    SolarWithinContractDemand,
    /// Add solar within the sanctioned load.
    SolarWithinSanctionedLoad,
    /// Raise contract demand up to the sanctioned load.
    ContractDemandUprate,
}

impl ExpansionKind {
    /// Human-readable label, used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SolarWithinContractDemand => "Solar within CD",
            Self::SolarWithinSanctionedLoad => "Solar within SL",
            Self::ContractDemandUprate => "CD uprate to SL",
        }
    }
}

impl fmt::Display for ExpansionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one spare-capacity check.
#[derive(Debug, Clone)]
pub struct ExpansionCheck {
    /// Which candidate this row describes.
    pub kind: ExpansionKind,
    /// Spare capacity for this candidate (kW). May be negative when the
    /// installed base already exceeds the ceiling.
    pub headroom_kw: f64,
    /// Whether the spare capacity clears the 20%-of-contract-demand bar.
    pub viable: bool,
    /// Recommended AC sizing when viable (kW), zero otherwise.
    pub recommended_ac_kw: f64,
    /// Recommended DC sizing when viable (kW, AC x 1.4), zero otherwise.
    pub recommended_dc_kw: f64,
}

fn check(kind: ExpansionKind, headroom_kw: f64, threshold_kw: f64) -> ExpansionCheck {
    let viable = headroom_kw >= threshold_kw;
    let recommended_ac_kw = if viable { headroom_kw } else { 0.0 };
    ExpansionCheck {
        kind,
        headroom_kw,
        viable,
        recommended_ac_kw,
        recommended_dc_kw: recommended_ac_kw * DC_AC_PLANNING_RATIO,
    }
}

/// Runs all spare-capacity checks for one client.
///
/// The threshold is always relative to contract demand, including for
/// the sanctioned-load rows. The contract-demand uprate additionally
/// requires the sanctioned load to exceed contract demand.
pub fn check_expansions(profile: &ClientProfile) -> Vec<ExpansionCheck> {
    let cd = profile.contract_demand_kva;
    let sl = profile.sanctioned_load_kva;
    let ac = profile.installed_solar_ac_kw;
    let threshold_kw = SPARE_CAPACITY_THRESHOLD * cd;

    let mut checks = vec![
        check(ExpansionKind::SolarWithinContractDemand, cd - ac, threshold_kw),
        check(ExpansionKind::SolarWithinSanctionedLoad, sl - ac, threshold_kw),
    ];

    let mut uprate = check(ExpansionKind::ContractDemandUprate, sl - cd, threshold_kw);
    if sl <= cd {
        uprate.viable = false;
        uprate.recommended_ac_kw = 0.0;
        uprate.recommended_dc_kw = 0.0;
    }
    checks.push(uprate);

    checks
}
