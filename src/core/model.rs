use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymptomSeverity {
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymptomDuration {
    Acute,
    Chronic,
}

/// A reportable symptom from the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub name: String,
    pub severity: SymptomSeverity,
    pub duration: SymptomDuration,
}

impl Symptom {
    pub fn new(id: &str, name: &str, severity: SymptomSeverity, duration: SymptomDuration) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            severity,
            duration,
        }
    }

    pub fn is_severe(&self) -> bool {
        self.severity == SymptomSeverity::Severe
    }
}

/// Coarse risk tier for a monitored location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::Severe,
    ];
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Severe => write!(f, "severe"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Diseases tracked by the outbreak dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disease {
    Influenza,
    #[serde(rename = "COVID-19")]
    Covid19,
    #[serde(rename = "RSV")]
    Rsv,
    Norovirus,
    Pertussis,
    Measles,
    #[serde(rename = "Hepatitis A")]
    HepatitisA,
    Tuberculosis,
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Disease::Influenza => "Influenza",
            Disease::Covid19 => "COVID-19",
            Disease::Rsv => "RSV",
            Disease::Norovirus => "Norovirus",
            Disease::Pertussis => "Pertussis",
            Disease::Measles => "Measles",
            Disease::HepatitisA => "Hepatitis A",
            Disease::Tuberculosis => "Tuberculosis",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Decreasing => write!(f, "decreasing"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutbreakSeverity {
    Low,
    Moderate,
    High,
    Critical,
}

impl fmt::Display for OutbreakSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutbreakSeverity::Low => write!(f, "low"),
            OutbreakSeverity::Moderate => write!(f, "moderate"),
            OutbreakSeverity::High => write!(f, "high"),
            OutbreakSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Case-count record for one disease at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseOutbreak {
    pub id: String,
    pub disease: Disease,
    pub cases: u32,
    pub trend: Trend,
    pub severity: OutbreakSeverity,
}

impl DiseaseOutbreak {
    pub fn new(id: &str, disease: Disease, cases: u32, trend: Trend, severity: OutbreakSeverity) -> Self {
        Self {
            id: id.to_string(),
            disease,
            cases,
            trend,
            severity,
        }
    }

    /// Shift the case count by `delta`, clamping at zero.
    pub fn adjust_cases(&mut self, delta: i64) {
        let next = (self.cases as i64 + delta).clamp(0, u32::MAX as i64);
        self.cases = next as u32;
    }

    /// Record a new case attributed to an incoming report.
    pub fn escalate(&mut self) {
        self.cases = self.cases.saturating_add(1);
        self.trend = Trend::Increasing;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    HeatWave,
    AirQuality,
    WildfireSmoke,
    Flood,
    WinterStorm,
    Drought,
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardType::HeatWave => write!(f, "heat wave"),
            HazardType::AirQuality => write!(f, "air quality"),
            HazardType::WildfireSmoke => write!(f, "wildfire smoke"),
            HazardType::Flood => write!(f, "flood"),
            HazardType::WinterStorm => write!(f, "winter storm"),
            HazardType::Drought => write!(f, "drought"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Advisory,
    Watch,
    Warning,
    Emergency,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Advisory => write!(f, "advisory"),
            AlertSeverity::Watch => write!(f, "watch"),
            AlertSeverity::Warning => write!(f, "warning"),
            AlertSeverity::Emergency => write!(f, "emergency"),
        }
    }
}

/// Time-bounded hazard advisory attached to a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateAlert {
    pub id: String,
    pub hazard: HazardType,
    pub title: String,
    pub severity: AlertSeverity,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub affected_areas: Vec<String>,
    pub description: String,
    pub health_impacts: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ClimateAlert {
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Qualitative tier for natural hazards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardRisk {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl HazardRisk {
    pub fn is_elevated(&self) -> bool {
        matches!(self, HazardRisk::High | HazardRisk::VeryHigh)
    }
}

impl fmt::Display for HazardRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardRisk::VeryLow => write!(f, "very low"),
            HazardRisk::Low => write!(f, "low"),
            HazardRisk::Moderate => write!(f, "moderate"),
            HazardRisk::High => write!(f, "high"),
            HazardRisk::VeryHigh => write!(f, "very high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FireSeason {
    Low,
    Moderate,
    High,
    Extreme,
}

impl fmt::Display for FireSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FireSeason::Low => write!(f, "low"),
            FireSeason::Moderate => write!(f, "moderate"),
            FireSeason::High => write!(f, "high"),
            FireSeason::Extreme => write!(f, "extreme"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeRisk {
    pub risk_level: HazardRisk,
    pub probability_30_year: f32,
    pub last_major_event: String,
    pub magnitude: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodRisk {
    pub risk_level: HazardRisk,
    pub flood_zone: String,
    pub seasonal_risk: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildfireRisk {
    pub risk_level: HazardRisk,
    pub current_season: FireSeason,
    pub nearby_fires: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaturalDisasterRisk {
    pub earthquake: EarthquakeRisk,
    pub flood: FloodRisk,
    pub wildfire: WildfireRisk,
}

/// A monitored community together with its surveillance records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub position: LatLng,
    pub county: String,
    pub population: u64,
    pub risk_level: RiskLevel,
    pub report_count: u64,
    pub air_quality_index: u32,
    pub uv_index: u8,
    pub temperature: f32,
    pub humidity: u8,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub outbreaks: Vec<DiseaseOutbreak>,
    #[serde(default)]
    pub climate_alerts: Vec<ClimateAlert>,
    pub disaster_risk: NaturalDisasterRisk,
}

impl Location {
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_updated = at;
    }

    /// Count one accepted symptom report.
    pub fn record_report(&mut self, at: DateTime<Utc>) {
        self.report_count = self.report_count.saturating_add(1);
        self.last_updated = at;
    }

    pub fn outbreak_mut(&mut self, disease: Disease) -> Option<&mut DiseaseOutbreak> {
        self.outbreaks.iter_mut().find(|o| o.disease == disease)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Info,
    Warning,
    Alert,
}

impl fmt::Display for InsightSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightSeverity::Info => write!(f, "info"),
            InsightSeverity::Warning => write!(f, "warning"),
            InsightSeverity::Alert => write!(f, "alert"),
        }
    }
}

/// Precomputed summary card shown read-only on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIInsight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub confidence_score: f32,
    pub related_symptoms: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub severity: InsightSeverity,
}

/// An accepted submission from the reporting form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomReport {
    pub id: String,
    pub symptom_ids: Vec<String>,
    pub location_id: String,
    pub timestamp: DateTime<Utc>,
}

impl SymptomReport {
    pub fn new(symptom_ids: Vec<String>, location_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symptom_ids,
            location_id: location_id.to_string(),
            timestamp: Utc::now(),
        }
    }
}
