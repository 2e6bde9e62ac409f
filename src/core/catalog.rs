use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{HealthError, Result};
use super::model::{AIInsight, Location, Symptom};
use super::seed;

/// In-memory surveillance catalog. Lives for the process only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub symptoms: Vec<Symptom>,
    pub locations: Vec<Location>,
    #[serde(default)]
    pub insights: Vec<AIInsight>,
}

impl Catalog {
    /// Build the catalog from the bundled Washington State data
    pub fn seeded() -> Self {
        Self {
            symptoms: seed::symptoms(),
            locations: seed::locations(),
            insights: seed::insights(),
        }
    }

    /// Load a catalog from a JSON file with the same shape as `Catalog`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&data)?;
        Ok(catalog)
    }

    pub fn symptom(&self, id: &str) -> Option<&Symptom> {
        self.symptoms.iter().find(|s| s.id == id)
    }

    pub fn symptom_by_name(&self, name: &str) -> Option<&Symptom> {
        self.symptoms.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Map symptom names given on the command line to ids. Ids and unknown
    /// entries pass through unchanged.
    pub fn symptom_ids_for(&self, args: &[String]) -> Vec<String> {
        args.iter()
            .map(|arg| match self.symptom(arg) {
                Some(symptom) => symptom.id.clone(),
                None => self
                    .symptom_by_name(arg)
                    .map(|s| s.id.clone())
                    .unwrap_or_else(|| arg.clone()),
            })
            .collect()
    }

    /// Resolve every id or fail on the first unknown one
    pub fn resolve_symptoms(&self, ids: &[String]) -> Result<Vec<&Symptom>> {
        ids.iter()
            .map(|id| {
                self.symptom(id)
                    .ok_or_else(|| HealthError::SymptomNotFound(id.clone()))
            })
            .collect()
    }

    pub fn location(&self, id: &str) -> Result<&Location> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| HealthError::LocationNotFound(id.to_string()))
    }

    pub fn location_mut(&mut self, id: &str) -> Result<&mut Location> {
        self.locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| HealthError::LocationNotFound(id.to_string()))
    }

    /// Insights ordered newest first
    pub fn recent_insights(&self) -> Vec<&AIInsight> {
        let mut insights: Vec<&AIInsight> = self.insights.iter().collect();
        insights.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        insights
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_ids_are_unique() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.symptoms.len(), 15);
        assert_eq!(catalog.locations.len(), 15);

        let location_ids: HashSet<_> = catalog.locations.iter().map(|l| &l.id).collect();
        assert_eq!(location_ids.len(), catalog.locations.len());

        let outbreak_ids: HashSet<_> = catalog
            .locations
            .iter()
            .flat_map(|l| l.outbreaks.iter().map(|o| &o.id))
            .collect();
        let outbreak_count: usize = catalog.locations.iter().map(|l| l.outbreaks.len()).sum();
        assert_eq!(outbreak_ids.len(), outbreak_count);
    }

    #[test]
    fn test_resolve_symptoms() {
        let catalog = Catalog::seeded();
        let resolved = catalog
            .resolve_symptoms(&["s1".to_string(), "s3".to_string()])
            .unwrap();
        assert_eq!(resolved[0].name, "Fever");
        assert_eq!(resolved[1].name, "Shortness of Breath");

        let err = catalog.resolve_symptoms(&["s99".to_string()]).unwrap_err();
        assert!(matches!(err, HealthError::SymptomNotFound(id) if id == "s99"));
    }

    #[test]
    fn test_location_lookup() {
        let mut catalog = Catalog::seeded();
        assert_eq!(catalog.location("l1").unwrap().name, "Seattle");
        assert!(catalog.location("nowhere").is_err());
        catalog.location_mut("l2").unwrap().report_count += 1;
        assert_eq!(catalog.location("l2").unwrap().report_count, 68);
    }

    #[test]
    fn test_symptom_by_name_ignores_case() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.symptom_by_name("fever").unwrap().id, "s1");
    }

    #[test]
    fn test_symptom_ids_for_accepts_names() {
        let catalog = Catalog::seeded();
        let args: Vec<String> = ["s2", "fever", "Runny Nose", "sneezing"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(catalog.symptom_ids_for(&args), vec!["s2", "s1", "s11", "sneezing"]);
    }

    #[test]
    fn test_recent_insights_newest_first() {
        let catalog = Catalog::seeded();
        let insights = catalog.recent_insights();
        assert_eq!(insights[0].id, "i5");
        assert!(insights.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = Catalog::seeded();
        std::fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();

        let loaded = Catalog::from_json_file(&path).unwrap();
        assert_eq!(loaded.locations.len(), catalog.locations.len());
        assert_eq!(loaded.symptoms, catalog.symptoms);
    }
}
