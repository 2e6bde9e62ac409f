use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

use super::catalog::Catalog;
use super::error::{HealthError, Result};
use super::model::{Disease, SymptomReport};

/// Symptom names that attribute a report to a named outbreak.
const ESCALATION_RULES: &[(Disease, &[&str])] = &[
    (
        Disease::Influenza,
        &["Fever", "Cough", "Shortness of Breath", "Sore Throat", "Runny Nose"],
    ),
    (Disease::Norovirus, &["Nausea", "Diarrhea"]),
];

#[derive(Debug, Clone)]
pub struct SimulatorSettings {
    pub tick_interval: Duration,
    pub report_latency: Duration,
    pub jitter_probability: f64,
    pub escalation_probability: f64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(15),
            report_latency: Duration::from_millis(1500),
            jitter_probability: 0.3,
            escalation_probability: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseChange {
    pub location_id: String,
    pub outbreak_id: String,
    pub disease: Disease,
    pub before: u32,
    pub after: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TickSummary {
    pub tick: u64,
    pub changes: Vec<CaseChange>,
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub report: SymptomReport,
    pub report_count: u64,
    pub escalations: Vec<CaseChange>,
}

/// Drives the in-memory catalog so the dashboard looks live.
pub struct ReportingSimulator<R: Rng = StdRng> {
    catalog: Catalog,
    reports: Vec<SymptomReport>,
    settings: SimulatorSettings,
    rng: R,
    ticks: u64,
}

impl ReportingSimulator<StdRng> {
    pub fn new(catalog: Catalog, settings: SimulatorSettings) -> Self {
        Self::with_rng(catalog, settings, StdRng::from_entropy())
    }
}

impl<R: Rng> ReportingSimulator<R> {
    pub fn with_rng(catalog: Catalog, settings: SimulatorSettings, rng: R) -> Self {
        Self {
            catalog,
            reports: Vec::new(),
            settings,
            rng,
            ticks: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn reports(&self) -> &[SymptomReport] {
        &self.reports
    }

    /// Nudge outbreak case counts by one and stamp every location.
    pub fn tick(&mut self) -> TickSummary {
        let now = Utc::now();
        self.ticks += 1;
        let mut summary = TickSummary {
            tick: self.ticks,
            changes: Vec::new(),
        };

        for location in &mut self.catalog.locations {
            for outbreak in &mut location.outbreaks {
                if !self.rng.gen_bool(self.settings.jitter_probability) {
                    continue;
                }
                let delta = if self.rng.gen_bool(0.5) { 1 } else { -1 };
                let before = outbreak.cases;
                outbreak.adjust_cases(delta);
                if outbreak.cases != before {
                    summary.changes.push(CaseChange {
                        location_id: location.id.clone(),
                        outbreak_id: outbreak.id.clone(),
                        disease: outbreak.disease,
                        before,
                        after: outbreak.cases,
                    });
                }
            }
            location.touch(now);
        }

        debug!(tick = summary.tick, changes = summary.changes.len(), "simulator tick");
        summary
    }

    /// Accept a symptom report for a location after the simulated network delay.
    pub async fn submit_report(&mut self, symptom_ids: &[String], location_id: &str) -> Result<SubmitOutcome> {
        if symptom_ids.is_empty() {
            return Err(HealthError::EmptyReport);
        }
        let names: Vec<String> = self
            .catalog
            .resolve_symptoms(symptom_ids)?
            .into_iter()
            .map(|s| s.name.clone())
            .collect();
        self.catalog.location(location_id)?;

        if !self.settings.report_latency.is_zero() {
            tokio::time::sleep(self.settings.report_latency).await;
        }

        let now = Utc::now();
        let location = self.catalog.location_mut(location_id)?;
        location.record_report(now);
        let report_count = location.report_count;

        let mut escalations = Vec::new();
        for (disease, keywords) in ESCALATION_RULES {
            if !names.iter().any(|n| keywords.contains(&n.as_str())) {
                continue;
            }
            if !self.rng.gen_bool(self.settings.escalation_probability) {
                continue;
            }
            if let Some(outbreak) = location.outbreak_mut(*disease) {
                let before = outbreak.cases;
                outbreak.escalate();
                escalations.push(CaseChange {
                    location_id: location_id.to_string(),
                    outbreak_id: outbreak.id.clone(),
                    disease: *disease,
                    before,
                    after: outbreak.cases,
                });
            }
        }

        let report = SymptomReport::new(symptom_ids.to_vec(), location_id);
        self.reports.push(report.clone());

        info!(
            location = location_id,
            symptoms = symptom_ids.len(),
            report_count,
            escalations = escalations.len(),
            "symptom report accepted"
        );

        Ok(SubmitOutcome {
            report,
            report_count,
            escalations,
        })
    }

    /// Run `tick` on a fixed interval. `None` runs until the task is dropped.
    pub async fn run<F>(&mut self, ticks: Option<u64>, mut on_tick: F)
    where
        F: FnMut(&TickSummary, &Catalog),
    {
        // interval() panics on a zero period
        let period = self.settings.tick_interval.max(Duration::from_millis(1));
        let mut interval = tokio::time::interval(period);
        // first tick completes immediately
        interval.tick().await;

        let mut remaining = ticks;
        loop {
            if remaining == Some(0) {
                break;
            }
            interval.tick().await;
            let summary = self.tick();
            info!(tick = summary.tick, changes = summary.changes.len(), "surveillance data refreshed");
            on_tick(&summary, &self.catalog);
            remaining = remaining.map(|n| n - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_settings() -> SimulatorSettings {
        SimulatorSettings {
            tick_interval: Duration::from_millis(1),
            report_latency: Duration::ZERO,
            ..SimulatorSettings::default()
        }
    }

    fn simulator(settings: SimulatorSettings) -> ReportingSimulator<StdRng> {
        ReportingSimulator::with_rng(Catalog::seeded(), settings, StdRng::seed_from_u64(7))
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tick_never_goes_negative() {
        let mut catalog = Catalog::seeded();
        for location in &mut catalog.locations {
            for outbreak in &mut location.outbreaks {
                outbreak.cases = 0;
            }
        }
        let mut sim = ReportingSimulator::with_rng(catalog, instant_settings(), StdRng::seed_from_u64(42));
        for _ in 0..500 {
            let summary = sim.tick();
            for change in &summary.changes {
                assert_eq!((change.after as i64 - change.before as i64).abs(), 1);
                if change.before == 0 {
                    assert_eq!(change.after, 1);
                }
            }
        }
        assert_eq!(sim.ticks, 500);
    }

    #[test]
    fn test_tick_without_jitter_only_stamps() {
        let settings = SimulatorSettings {
            jitter_probability: 0.0,
            ..instant_settings()
        };
        let mut catalog = Catalog::seeded();
        let stale = Utc::now() - chrono::Duration::days(3);
        for location in &mut catalog.locations {
            location.last_updated = stale;
        }
        let mut sim = ReportingSimulator::with_rng(catalog, settings, StdRng::seed_from_u64(7));
        let before: Vec<u32> = sim
            .catalog()
            .locations
            .iter()
            .flat_map(|l| l.outbreaks.iter().map(|o| o.cases))
            .collect();

        let summary = sim.tick();
        assert!(summary.changes.is_empty());
        assert_eq!(summary.tick, 1);

        let after: Vec<u32> = sim
            .catalog()
            .locations
            .iter()
            .flat_map(|l| l.outbreaks.iter().map(|o| o.cases))
            .collect();
        assert_eq!(before, after);
        assert!(sim.catalog().locations.iter().all(|l| l.last_updated > stale));
    }

    #[tokio::test]
    async fn test_submit_increments_report_count() {
        let mut sim = simulator(instant_settings());
        let location_ids: Vec<String> = sim.catalog().locations.iter().map(|l| l.id.clone()).collect();

        for id in location_ids {
            let before = sim.catalog().location(&id).unwrap().report_count;
            let outcome = sim.submit_report(&ids(&["s5"]), &id).await.unwrap();
            assert_eq!(outcome.report_count, before + 1);
            assert_eq!(sim.catalog().location(&id).unwrap().report_count, before + 1);
        }
        assert_eq!(sim.reports().len(), 15);
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_report() {
        let mut sim = simulator(instant_settings());
        let before = sim.catalog().location("l1").unwrap().report_count;

        let err = sim.submit_report(&[], "l1").await.unwrap_err();
        assert!(matches!(err, HealthError::EmptyReport));
        assert_eq!(sim.catalog().location("l1").unwrap().report_count, before);
        assert!(sim.reports().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_ids() {
        let mut sim = simulator(instant_settings());
        assert!(matches!(
            sim.submit_report(&ids(&["s1"]), "l404").await.unwrap_err(),
            HealthError::LocationNotFound(_)
        ));
        assert!(matches!(
            sim.submit_report(&ids(&["s404"]), "l1").await.unwrap_err(),
            HealthError::SymptomNotFound(_)
        ));
        assert_eq!(sim.catalog().location("l1").unwrap().report_count, 284);
    }

    #[tokio::test]
    async fn test_respiratory_report_escalates_influenza() {
        let settings = SimulatorSettings {
            escalation_probability: 1.0,
            ..instant_settings()
        };
        let mut sim = simulator(settings);

        // Spokane: influenza is stable at 143
        let outcome = sim.submit_report(&ids(&["s1", "s2"]), "l2").await.unwrap();
        assert_eq!(outcome.escalations.len(), 1);
        assert_eq!(outcome.escalations[0].disease, Disease::Influenza);

        let flu = sim
            .catalog()
            .location("l2")
            .unwrap()
            .outbreaks
            .iter()
            .find(|o| o.disease == Disease::Influenza)
            .unwrap();
        assert_eq!(flu.cases, 144);
        assert_eq!(flu.trend, crate::core::model::Trend::Increasing);
    }

    #[tokio::test]
    async fn test_unrelated_symptoms_do_not_escalate() {
        let settings = SimulatorSettings {
            escalation_probability: 1.0,
            ..instant_settings()
        };
        let mut sim = simulator(settings);
        let outcome = sim.submit_report(&ids(&["s14"]), "l2").await.unwrap();
        assert!(outcome.escalations.is_empty());
    }

    #[tokio::test]
    async fn test_escalation_skips_missing_outbreak() {
        let settings = SimulatorSettings {
            escalation_probability: 1.0,
            ..instant_settings()
        };
        let mut sim = simulator(settings);
        // Renton tracks only COVID-19
        let outcome = sim.submit_report(&ids(&["s9"]), "l8").await.unwrap();
        assert!(outcome.escalations.is_empty());
        assert_eq!(outcome.report_count, 95);
    }

    #[tokio::test]
    async fn test_run_stops_after_requested_ticks() {
        let mut sim = simulator(instant_settings());
        let mut seen = Vec::new();
        sim.run(Some(3), |summary, _| seen.push(summary.tick)).await;
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_run_with_zero_interval() {
        let settings = SimulatorSettings {
            tick_interval: Duration::ZERO,
            ..instant_settings()
        };
        let mut sim = simulator(settings);
        let mut count = 0;
        sim.run(Some(2), |_, _| count += 1).await;
        assert_eq!(count, 2);
    }
}
