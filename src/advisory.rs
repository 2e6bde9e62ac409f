use chrono::{DateTime, Utc};
use std::fmt;

use crate::core::{ClimateAlert, DiseaseOutbreak, Location, NaturalDisasterRisk, OutbreakSeverity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQualityBand {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
}

impl AirQualityBand {
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => AirQualityBand::Good,
            51..=100 => AirQualityBand::Moderate,
            101..=150 => AirQualityBand::UnhealthyForSensitive,
            151..=200 => AirQualityBand::Unhealthy,
            _ => AirQualityBand::VeryUnhealthy,
        }
    }
}

impl fmt::Display for AirQualityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirQualityBand::Good => write!(f, "Good"),
            AirQualityBand::Moderate => write!(f, "Moderate"),
            AirQualityBand::UnhealthyForSensitive => write!(f, "Unhealthy for Sensitive Groups"),
            AirQualityBand::Unhealthy => write!(f, "Unhealthy"),
            AirQualityBand::VeryUnhealthy => write!(f, "Very Unhealthy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvBand {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvBand {
    pub fn from_index(uv: u8) -> Self {
        match uv {
            0..=2 => UvBand::Low,
            3..=5 => UvBand::Moderate,
            6..=7 => UvBand::High,
            8..=10 => UvBand::VeryHigh,
            _ => UvBand::Extreme,
        }
    }
}

impl fmt::Display for UvBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UvBand::Low => write!(f, "Low"),
            UvBand::Moderate => write!(f, "Moderate"),
            UvBand::High => write!(f, "High"),
            UvBand::VeryHigh => write!(f, "Very High"),
            UvBand::Extreme => write!(f, "Extreme"),
        }
    }
}

/// Conditions at one place, as shown on a travel advisory card.
#[derive(Debug, Clone)]
pub struct LocationSummary<'a> {
    pub location: &'a Location,
    pub air_quality: AirQualityBand,
    pub uv: UvBand,
    pub active_alerts: Vec<&'a ClimateAlert>,
    pub disaster_risk: &'a NaturalDisasterRisk,
    pub outbreaks: Vec<&'a DiseaseOutbreak>,
}

impl<'a> LocationSummary<'a> {
    pub fn new(location: &'a Location, at: DateTime<Utc>) -> Self {
        let mut outbreaks: Vec<&DiseaseOutbreak> = location.outbreaks.iter().collect();
        outbreaks.sort_by(|a, b| b.severity.cmp(&a.severity).then(b.cases.cmp(&a.cases)));

        LocationSummary {
            location,
            air_quality: AirQualityBand::from_aqi(location.air_quality_index),
            uv: UvBand::from_index(location.uv_index),
            active_alerts: location
                .climate_alerts
                .iter()
                .filter(|a| a.is_active_at(at))
                .collect(),
            disaster_risk: &location.disaster_risk,
            outbreaks,
        }
    }

    pub fn critical_outbreaks(&self) -> usize {
        self.outbreaks
            .iter()
            .filter(|o| o.severity == OutbreakSeverity::Critical)
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct TravelAdvisory<'a> {
    pub current: LocationSummary<'a>,
    pub destination: LocationSummary<'a>,
}

impl<'a> TravelAdvisory<'a> {
    /// Side-by-side comparison of two monitored locations
    pub fn compare(current: &'a Location, destination: &'a Location, at: DateTime<Utc>) -> Self {
        TravelAdvisory {
            current: LocationSummary::new(current, at),
            destination: LocationSummary::new(destination, at),
        }
    }

    pub fn destination_is_riskier(&self) -> bool {
        self.destination.location.risk_level > self.current.location.risk_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Catalog;

    #[test]
    fn test_air_quality_bands() {
        assert_eq!(AirQualityBand::from_aqi(50), AirQualityBand::Good);
        assert_eq!(AirQualityBand::from_aqi(51), AirQualityBand::Moderate);
        assert_eq!(AirQualityBand::from_aqi(150), AirQualityBand::UnhealthyForSensitive);
        assert_eq!(AirQualityBand::from_aqi(200), AirQualityBand::Unhealthy);
        assert_eq!(AirQualityBand::from_aqi(201), AirQualityBand::VeryUnhealthy);
    }

    #[test]
    fn test_uv_bands() {
        assert_eq!(UvBand::from_index(2), UvBand::Low);
        assert_eq!(UvBand::from_index(5), UvBand::Moderate);
        assert_eq!(UvBand::from_index(7), UvBand::High);
        assert_eq!(UvBand::from_index(10), UvBand::VeryHigh);
        assert_eq!(UvBand::from_index(11), UvBand::Extreme);
        assert_eq!(UvBand::VeryHigh.to_string(), "Very High");
    }

    #[test]
    fn test_compare_locations() {
        let catalog = Catalog::seeded();
        let seattle = catalog.location("l1").unwrap();
        let yakima = catalog.location("l11").unwrap();
        let advisory = TravelAdvisory::compare(seattle, yakima, Utc::now());
        assert!(advisory.destination_is_riskier());
        assert_eq!(advisory.destination.air_quality, AirQualityBand::UnhealthyForSensitive);
        assert_eq!(advisory.destination.active_alerts.len(), 1);
        assert_eq!(advisory.destination.critical_outbreaks(), 1);
        // most severe first
        assert_eq!(advisory.destination.outbreaks[0].severity, OutbreakSeverity::Critical);
    }

    #[test]
    fn test_expired_alerts_are_dropped() {
        let catalog = Catalog::seeded();
        let seattle = catalog.location("l1").unwrap();
        let later = Utc::now() + chrono::Duration::days(30);
        assert!(LocationSummary::new(seattle, later).active_alerts.is_empty());
    }
}
