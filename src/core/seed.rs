// Hard-coded surveillance data for Washington State communities.
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::model::*;

/// Alert window relative to startup: begins `from_hours` from now, lasts `hours`.
fn window(from_hours: i64, hours: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc::now() + Duration::hours(from_hours);
    (start, start + Duration::hours(hours))
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

pub fn symptoms() -> Vec<Symptom> {
    use SymptomDuration::*;
    use SymptomSeverity::*;

    vec![
        Symptom::new("s1", "Fever", Moderate, Acute),
        Symptom::new("s2", "Cough", Mild, Acute),
        Symptom::new("s3", "Shortness of Breath", Severe, Acute),
        Symptom::new("s4", "Fatigue", Moderate, Chronic),
        Symptom::new("s5", "Headache", Mild, Acute),
        Symptom::new("s6", "Muscle Pain", Moderate, Acute),
        Symptom::new("s7", "Sore Throat", Mild, Acute),
        Symptom::new("s8", "Loss of Taste/Smell", Moderate, Chronic),
        Symptom::new("s9", "Nausea", Moderate, Acute),
        Symptom::new("s10", "Diarrhea", Moderate, Acute),
        Symptom::new("s11", "Runny Nose", Mild, Acute),
        Symptom::new("s12", "Body Aches", Moderate, Acute),
        Symptom::new("s13", "Chest Pain", Severe, Acute),
        Symptom::new("s14", "Skin Rash", Moderate, Chronic),
        Symptom::new("s15", "Joint Pain", Moderate, Chronic),
    ]
}

struct Site {
    id: &'static str,
    name: &'static str,
    lat: f64,
    lng: f64,
    county: &'static str,
    population: u64,
    risk: RiskLevel,
    reports: u64,
    aqi: u32,
    uv: u8,
    temperature: f32,
    humidity: u8,
}

#[allow(clippy::too_many_arguments)]
fn hazards(
    quake: HazardRisk,
    probability: f32,
    last_major: &str,
    magnitude: f32,
    flood: HazardRisk,
    zone: &str,
    seasonal: &str,
    fire: HazardRisk,
    season: FireSeason,
    nearby_fires: u32,
) -> NaturalDisasterRisk {
    NaturalDisasterRisk {
        earthquake: EarthquakeRisk {
            risk_level: quake,
            probability_30_year: probability,
            last_major_event: last_major.to_string(),
            magnitude,
        },
        flood: FloodRisk {
            risk_level: flood,
            flood_zone: zone.to_string(),
            seasonal_risk: seasonal.to_string(),
        },
        wildfire: WildfireRisk {
            risk_level: fire,
            current_season: season,
            nearby_fires,
        },
    }
}

fn location(
    site: Site,
    outbreaks: Vec<DiseaseOutbreak>,
    climate_alerts: Vec<ClimateAlert>,
    disaster_risk: NaturalDisasterRisk,
) -> Location {
    Location {
        id: site.id.to_string(),
        name: site.name.to_string(),
        position: LatLng {
            lat: site.lat,
            lng: site.lng,
        },
        county: site.county.to_string(),
        population: site.population,
        risk_level: site.risk,
        report_count: site.reports,
        air_quality_index: site.aqi,
        uv_index: site.uv,
        temperature: site.temperature,
        humidity: site.humidity,
        last_updated: Utc::now(),
        outbreaks,
        climate_alerts,
        disaster_risk,
    }
}

#[allow(clippy::too_many_arguments)]
fn alert(
    id: &str,
    hazard: HazardType,
    title: &str,
    severity: AlertSeverity,
    valid: (DateTime<Utc>, DateTime<Utc>),
    areas: &[&str],
    description: &str,
    impacts: &[&str],
    recommendations: &[&str],
) -> ClimateAlert {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    ClimateAlert {
        id: id.to_string(),
        hazard,
        title: title.to_string(),
        severity,
        start: valid.0,
        end: valid.1,
        affected_areas: owned(areas),
        description: description.to_string(),
        health_impacts: owned(impacts),
        recommendations: owned(recommendations),
    }
}

pub fn locations() -> Vec<Location> {
    use Disease::*;
    use HazardRisk::*;
    use OutbreakSeverity as Sev;
    use RiskLevel as Risk;
    use Trend::*;

    let ob = DiseaseOutbreak::new;

    vec![
        location(
            Site { id: "l1", name: "Seattle", lat: 47.6062, lng: -122.3321, county: "King County", population: 737_015, risk: Risk::Moderate, reports: 284, aqi: 42, uv: 2, temperature: 46.0, humidity: 82 },
            vec![
                ob("o1", Influenza, 412, Increasing, Sev::High),
                ob("o2", Covid19, 188, Stable, Sev::Moderate),
                ob("o3", Rsv, 96, Decreasing, Sev::Moderate),
            ],
            vec![alert(
                "c1",
                HazardType::WinterStorm,
                "Lowland Snow Watch",
                AlertSeverity::Watch,
                window(-6, 48),
                &["Seattle", "Bellevue", "Renton"],
                "Cold arctic air may bring 1-3 inches of lowland snow and icy roads.",
                &["Hypothermia risk for unsheltered residents", "Slip and fall injuries"],
                &["Check on elderly neighbors", "Limit travel during snowfall", "Use warming centers"],
            )],
            hazards(VeryHigh, 84.0, "2001 Nisqually", 6.8, Moderate, "Zone X", "Winter atmospheric rivers", Low, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l2", name: "Spokane", lat: 47.6588, lng: -117.4260, county: "Spokane County", population: 228_989, risk: Risk::Low, reports: 67, aqi: 55, uv: 1, temperature: 31.0, humidity: 74 },
            vec![
                ob("o4", Influenza, 143, Stable, Sev::Moderate),
                ob("o5", Norovirus, 22, Decreasing, Sev::Low),
            ],
            vec![],
            hazards(Low, 12.0, "1872 North Cascades", 6.5, Moderate, "Zone AE near Spokane River", "Spring snowmelt", High, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l3", name: "Tacoma", lat: 47.2529, lng: -122.4443, county: "Pierce County", population: 219_346, risk: Risk::High, reports: 156, aqi: 61, uv: 2, temperature: 47.0, humidity: 80 },
            vec![
                ob("o6", Influenza, 265, Increasing, Sev::High),
                ob("o7", Pertussis, 31, Increasing, Sev::Moderate),
            ],
            vec![alert(
                "c2",
                HazardType::AirQuality,
                "Air Stagnation Advisory",
                AlertSeverity::Advisory,
                window(-24, 60),
                &["Tacoma Tideflats", "Fife"],
                "Stagnant air is trapping fine particulates from wood stoves and port traffic.",
                &["Aggravated asthma", "Irritation for people with heart or lung disease"],
                &["Avoid burning wood", "Limit strenuous outdoor activity"],
            )],
            hazards(High, 72.0, "1949 Olympia", 6.7, High, "Zone AE along Puyallup River", "Lahar and river flooding", Low, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l4", name: "Vancouver", lat: 45.6387, lng: -122.6615, county: "Clark County", population: 190_915, risk: Risk::Severe, reports: 298, aqi: 48, uv: 2, temperature: 49.0, humidity: 78 },
            vec![
                ob("o8", Covid19, 356, Increasing, Sev::Critical),
                ob("o9", Influenza, 298, Increasing, Sev::High),
                ob("o10", Measles, 9, Stable, Sev::High),
            ],
            vec![],
            hazards(High, 65.0, "1962 Portland-Vancouver", 5.5, High, "Zone AE along Columbia River", "Winter and spring high water", Moderate, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l5", name: "Bellevue", lat: 47.6101, lng: -122.2015, county: "King County", population: 151_854, risk: Risk::Moderate, reports: 89, aqi: 38, uv: 2, temperature: 45.0, humidity: 81 },
            vec![
                ob("o11", Influenza, 121, Stable, Sev::Moderate),
                ob("o12", Rsv, 44, Decreasing, Sev::Low),
            ],
            vec![],
            hazards(VeryHigh, 80.0, "2001 Nisqually", 6.8, Low, "Zone X", "Minor urban flooding", Low, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l6", name: "Everett", lat: 47.9790, lng: -122.2021, county: "Snohomish County", population: 110_629, risk: Risk::Moderate, reports: 134, aqi: 44, uv: 1, temperature: 44.0, humidity: 84 },
            vec![
                ob("o13", Influenza, 167, Increasing, Sev::Moderate),
                ob("o14", Norovirus, 38, Stable, Sev::Low),
            ],
            vec![],
            hazards(High, 70.0, "1996 Duvall", 5.3, Moderate, "Zone AE along Snohomish River", "Atmospheric river season", Low, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l7", name: "Kent", lat: 47.3809, lng: -122.2348, county: "King County", population: 132_319, risk: Risk::High, reports: 178, aqi: 58, uv: 2, temperature: 46.0, humidity: 80 },
            vec![
                ob("o15", Influenza, 221, Increasing, Sev::High),
                ob("o16", Norovirus, 64, Increasing, Sev::Moderate),
            ],
            vec![],
            hazards(High, 76.0, "2001 Nisqually", 6.8, High, "Zone AE in Green River Valley", "Levee stress during heavy rain", Low, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l8", name: "Renton", lat: 47.4829, lng: -122.2171, county: "King County", population: 106_785, risk: Risk::Moderate, reports: 94, aqi: 47, uv: 2, temperature: 46.0, humidity: 81 },
            vec![ob("o17", Covid19, 87, Stable, Sev::Moderate)],
            vec![],
            hazards(High, 74.0, "2001 Nisqually", 6.8, Moderate, "Zone AE along Cedar River", "Winter high water", Low, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l9", name: "Spokane Valley", lat: 47.6732, lng: -117.2394, county: "Spokane County", population: 102_976, risk: Risk::Low, reports: 43, aqi: 57, uv: 1, temperature: 30.0, humidity: 72 },
            vec![ob("o18", Influenza, 58, Decreasing, Sev::Low)],
            vec![],
            hazards(Low, 10.0, "1872 North Cascades", 6.5, Low, "Zone X", "Spring snowmelt", VeryHigh, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l10", name: "Federal Way", lat: 47.3223, lng: -122.3126, county: "King County", population: 101_030, risk: Risk::Moderate, reports: 112, aqi: 45, uv: 2, temperature: 47.0, humidity: 80 },
            vec![
                ob("o19", Influenza, 134, Stable, Sev::Moderate),
                ob("o20", Pertussis, 12, Increasing, Sev::Low),
            ],
            vec![],
            hazards(High, 71.0, "2001 Nisqually", 6.8, Low, "Zone X", "Minor urban flooding", Low, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l11", name: "Yakima", lat: 46.6021, lng: -120.5059, county: "Yakima County", population: 96_968, risk: Risk::High, reports: 189, aqi: 112, uv: 2, temperature: 34.0, humidity: 70 },
            vec![
                ob("o21", Norovirus, 142, Increasing, Sev::High),
                ob("o22", HepatitisA, 17, Increasing, Sev::Critical),
                ob("o23", Influenza, 97, Stable, Sev::Moderate),
            ],
            vec![alert(
                "c3",
                HazardType::AirQuality,
                "Winter Inversion Air Quality Alert",
                AlertSeverity::Warning,
                window(-72, 120),
                &["Yakima", "Union Gap", "Selah"],
                "A persistent valley inversion has pushed PM2.5 to unhealthy for sensitive groups.",
                &["Respiratory irritation", "Worsened COPD and asthma symptoms"],
                &["Use HEPA filtration indoors", "Wear N95 masks outdoors", "Postpone outdoor exercise"],
            )],
            hazards(Moderate, 25.0, "1872 North Cascades", 6.5, Moderate, "Zone AE along Yakima River", "Spring snowmelt", High, FireSeason::Moderate, 1),
        ),
        location(
            Site { id: "l12", name: "Bellingham", lat: 48.7519, lng: -122.4787, county: "Whatcom County", population: 92_289, risk: Risk::Low, reports: 56, aqi: 33, uv: 1, temperature: 42.0, humidity: 85 },
            vec![ob("o24", Rsv, 29, Stable, Sev::Low)],
            vec![alert(
                "c4",
                HazardType::Flood,
                "Nooksack River Flood Watch",
                AlertSeverity::Watch,
                window(-12, 96),
                &["Everson", "Sumas", "Ferndale"],
                "An atmospheric river may raise the Nooksack River above flood stage.",
                &["Contaminated water supplies", "Mold exposure after flooding"],
                &["Avoid flooded roads", "Boil water if advised", "Prepare an evacuation kit"],
            )],
            hazards(High, 68.0, "1872 North Cascades", 6.5, VeryHigh, "Zone AE along Nooksack River", "Atmospheric river season", Low, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l13", name: "Kennewick", lat: 46.2112, lng: -119.1372, county: "Benton County", population: 84_960, risk: Risk::Moderate, reports: 87, aqi: 64, uv: 2, temperature: 38.0, humidity: 68 },
            vec![
                ob("o25", Influenza, 102, Increasing, Sev::Moderate),
                ob("o26", Tuberculosis, 4, Stable, Sev::High),
            ],
            vec![],
            hazards(Low, 8.0, "1936 Milton-Freewater", 5.8, Low, "Zone X", "Columbia River high water", High, FireSeason::Moderate, 0),
        ),
        location(
            Site { id: "l14", name: "Auburn", lat: 47.3073, lng: -122.2284, county: "King County", population: 87_256, risk: Risk::Moderate, reports: 98, aqi: 50, uv: 2, temperature: 46.0, humidity: 81 },
            vec![ob("o27", Influenza, 111, Stable, Sev::Moderate)],
            vec![],
            hazards(High, 73.0, "2001 Nisqually", 6.8, High, "Zone AE along White River", "Lahar and river flooding", Low, FireSeason::Low, 0),
        ),
        location(
            Site { id: "l15", name: "Pasco", lat: 46.2396, lng: -119.1006, county: "Franklin County", population: 77_108, risk: Risk::Moderate, reports: 76, aqi: 71, uv: 3, temperature: 39.0, humidity: 66 },
            vec![ob("o28", Norovirus, 46, Stable, Sev::Moderate)],
            vec![alert(
                "c5",
                HazardType::Drought,
                "Drought Emergency Declaration",
                AlertSeverity::Emergency,
                window(-480, 4320),
                &["Franklin County", "Benton County"],
                "Below-normal snowpack has triggered a drought emergency for irrigation districts.",
                &["Heat stress during summer months", "Dust-related respiratory irritation"],
                &["Conserve water", "Monitor well water quality"],
            )],
            hazards(Low, 7.0, "1936 Milton-Freewater", 5.8, Low, "Zone X", "Columbia River high water", VeryHigh, FireSeason::Extreme, 2),
        ),
    ]
}

pub fn insights() -> Vec<AIInsight> {
    let insight = |id: &str, title: &str, description: &str, confidence: f32, related: &[&str], timestamp, severity| AIInsight {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        confidence_score: confidence,
        related_symptoms: related.iter().map(|s| s.to_string()).collect(),
        timestamp,
        severity,
    };

    vec![
        insight(
            "i1",
            "Respiratory Syndrome Cluster Alert",
            "Unusual clustering of respiratory symptoms in the Vancouver area. Pattern matches characteristics of viral respiratory illness with 89% confidence. Local health authorities notified.",
            0.89,
            &["Cough", "Shortness of Breath", "Fever", "Fatigue"],
            at(2025, 1, 22, 14, 23),
            InsightSeverity::Alert,
        ),
        insight(
            "i2",
            "Gastrointestinal Outbreak Pattern",
            "Significant increase in GI symptoms in the Yakima region. Possible foodborne illness outbreak with 76% confidence. Surveillance increased.",
            0.76,
            &["Nausea", "Diarrhea", "Fever", "Body Aches"],
            at(2025, 1, 23, 11, 15),
            InsightSeverity::Warning,
        ),
        insight(
            "i3",
            "Seasonal Flu Activity Spike",
            "Expected seasonal influenza activity increase across King County. Pattern consistent with typical winter flu season progression.",
            0.82,
            &["Fever", "Muscle Pain", "Headache", "Fatigue", "Cough"],
            at(2025, 1, 23, 9, 45),
            InsightSeverity::Info,
        ),
        insight(
            "i4",
            "Dermatological Condition Cluster",
            "Unusual pattern of skin-related symptoms in the Tacoma area. Possible environmental exposure or contact dermatitis outbreak with 67% confidence.",
            0.67,
            &["Skin Rash", "Joint Pain", "Fatigue"],
            at(2025, 1, 24, 8, 30),
            InsightSeverity::Warning,
        ),
        insight(
            "i5",
            "Post-Holiday Health Trends",
            "Increased healthcare-seeking behavior following holiday gatherings. Multiple symptom clusters under surveillance across Western Washington.",
            0.71,
            &["Sore Throat", "Runny Nose", "Headache", "Cough"],
            at(2025, 1, 24, 16, 20),
            InsightSeverity::Info,
        ),
    ]
}
