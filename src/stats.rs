use std::collections::BTreeMap;

use crate::core::{Catalog, OutbreakSeverity, RiskLevel};

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_reports: u64,
    pub monitored_locations: usize,
    pub locations_by_risk: BTreeMap<RiskLevel, usize>,
    pub active_outbreaks: usize,
    pub severe_outbreaks: usize,
    pub total_cases: u64,
    pub climate_alerts: usize,
    pub population_covered: u64,
}

impl DashboardStats {
    pub fn collect(catalog: &Catalog) -> Self {
        let mut locations_by_risk: BTreeMap<RiskLevel, usize> =
            RiskLevel::ALL.iter().map(|r| (*r, 0)).collect();
        let mut stats = DashboardStats {
            total_reports: 0,
            monitored_locations: catalog.locations.len(),
            locations_by_risk: BTreeMap::new(),
            active_outbreaks: 0,
            severe_outbreaks: 0,
            total_cases: 0,
            climate_alerts: 0,
            population_covered: 0,
        };

        for location in &catalog.locations {
            stats.total_reports += location.report_count;
            stats.population_covered += location.population;
            stats.climate_alerts += location.climate_alerts.len();
            *locations_by_risk.entry(location.risk_level).or_insert(0) += 1;

            for outbreak in &location.outbreaks {
                if outbreak.cases > 0 {
                    stats.active_outbreaks += 1;
                }
                if outbreak.severity >= OutbreakSeverity::High {
                    stats.severe_outbreaks += 1;
                }
                stats.total_cases += outbreak.cases as u64;
            }
        }

        stats.locations_by_risk = locations_by_risk;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_seeded() {
        let catalog = Catalog::seeded();
        let stats = DashboardStats::collect(&catalog);

        assert_eq!(stats.monitored_locations, 15);
        assert_eq!(stats.locations_by_risk[&RiskLevel::Severe], 1);
        assert_eq!(stats.locations_by_risk.values().sum::<usize>(), 15);
        assert_eq!(stats.climate_alerts, 5);

        let expected_reports: u64 = catalog.locations.iter().map(|l| l.report_count).sum();
        assert_eq!(stats.total_reports, expected_reports);
        assert_eq!(stats.active_outbreaks, 28);
    }

    #[test]
    fn test_zero_case_outbreak_is_inactive() {
        let mut catalog = Catalog::seeded();
        catalog.locations[0].outbreaks[0].cases = 0;
        let stats = DashboardStats::collect(&catalog);
        assert_eq!(stats.active_outbreaks, 27);
    }
}
