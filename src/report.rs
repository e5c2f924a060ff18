//! Text report formatting for profiles, ROI results, and viability checks.

use std::fmt;

use crate::eval::opportunity::Evaluation;
use crate::eval::viability::ExpansionCheck;
use crate::profile::ClientProfile;

/// Client summary sections: basic, load, and solar information.
#[derive(Debug, Clone, Copy)]
pub struct ProfileSummary<'a>(pub &'a ClientProfile);

impl fmt::Display for ProfileSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;
        writeln!(f, "=== {} ===", p.name)?;
        writeln!(f, "--- Basic Information ---")?;
        writeln!(f, "Voltage level:         {:.1} kV", p.voltage_level_kv)?;
        writeln!(f, "Sanctioned load:       {:.0} kVA", p.sanctioned_load_kva)?;
        writeln!(f, "Contract demand:       {:.0} kVA", p.contract_demand_kva)?;
        writeln!(f, "--- Load Information ---")?;
        writeln!(
            f,
            "Average load factor:   {:.2}%",
            p.average_load_factor * 100.0
        )?;
        writeln!(
            f,
            "Annual consumption:    {:.0} kWh",
            p.annual_consumption_kwh
        )?;
        writeln!(
            f,
            "Peak hour consumption: {:.2}% (6-10 PM + 6-8 AM)",
            (p.evening_peak_share + p.morning_peak_share) * 100.0
        )?;
        writeln!(f, "Base tariff:           {:.2}/kWh", p.base_tariff_per_kwh)?;
        writeln!(f, "--- Solar Information ---")?;
        writeln!(
            f,
            "Installed solar:       {:.0} kW AC / {:.0} kW DC",
            p.installed_solar_ac_kw, p.installed_solar_dc_kw
        )?;
        writeln!(f, "Annual setoff:         {:.0} kWh", p.annual_setoff_kwh)?;
        write!(
            f,
            "Green consumption:     {:.2}%",
            p.percent_green_consumption * 100.0
        )
    }
}

/// ROI comparison table plus the recommendation line.
#[derive(Debug, Clone, Copy)]
pub struct RoiTable<'a>(pub &'a Evaluation);

impl fmt::Display for RoiTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.0;
        writeln!(
            f,
            "--- ROI Comparison (BESS at {:.0}% of DC solar, waiver {:.0}%) ---",
            e.bess_percent_of_solar, e.waiver_percent
        )?;
        writeln!(
            f,
            "{:<14} {:>12} {:>16} {:>10}",
            "Option", "Capacity", "Annual saving", "ROI"
        )?;
        for r in &e.results {
            let marker = if r.kind == e.recommended { "*" } else { " " };
            writeln!(
                f,
                "{:<13}{} {:>9.3} MW {:>16.0} {:>9.2}%",
                r.kind.label(),
                marker,
                r.capacity_mw,
                r.annual_saving,
                r.roi_percent
            )?;
        }
        let best = e.recommended_result();
        write!(
            f,
            "Recommended: {} (ROI: {:.2}%)",
            best.kind.label(),
            best.roi_percent
        )
    }
}

/// Expansion-opportunity viability table.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionTable<'a>(pub &'a [ExpansionCheck]);

impl fmt::Display for ExpansionTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Expansion Opportunities ---")?;
        writeln!(
            f,
            "{:<16} {:>12} {:>10} {:>12} {:>12}",
            "Opportunity", "Headroom", "Available", "Rec. AC", "Rec. DC"
        )?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<16} {:>9.0} kW {:>10} {:>9.0} kW {:>9.0} kW",
                c.kind.label(),
                c.headroom_kw,
                if c.viable { "yes" } else { "no" },
                c.recommended_ac_kw,
                c.recommended_dc_kw
            )?;
        }
        Ok(())
    }
}
