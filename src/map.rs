use serde::Serialize;

use crate::core::{FireSeason, LatLng, Location, OutbreakSeverity, RiskLevel, Result};

pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 47.4,
    lng: -120.7,
};
pub const DEFAULT_ZOOM: u8 = 7;

const EARTHQUAKE_COLOR: &str = "#B91C1C";
const WILDFIRE_COLOR: &str = "#EA580C";
const WILDFIRE_RADIUS_M: f64 = 15_000.0;
const EARTHQUAKE_SPAN_DEG: f64 = 0.1;

pub fn risk_color(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "#22C55E",
        RiskLevel::Moderate => "#EAB308",
        RiskLevel::High => "#F97316",
        RiskLevel::Severe => "#EF4444",
    }
}

/// Marker radius grows with report volume, bounded to [10, 25].
pub fn marker_scale(report_count: u64) -> f64 {
    (report_count as f64 / 20.0).clamp(10.0, 25.0)
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub location_id: String,
    pub position: LatLng,
    pub title: String,
    pub scale: f64,
    pub fill_color: &'static str,
    pub info_html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CircleKind {
    Outbreak,
    Wildfire,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleOverlay {
    pub kind: CircleKind,
    pub center: LatLng,
    pub radius: f64,
    pub color: &'static str,
    pub stroke_opacity: f32,
    pub fill_opacity: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleOverlay {
    pub bounds: Bounds,
    pub color: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MapOverlays {
    pub markers: Vec<Marker>,
    pub circles: Vec<CircleOverlay>,
    pub rectangles: Vec<RectangleOverlay>,
}

fn marker_title(location: &Location) -> String {
    let outbreaks: Vec<String> = location
        .outbreaks
        .iter()
        .map(|o| format!("{} ({})", o.disease, o.cases))
        .collect();
    format!(
        "{}: {} reports ({} risk)\nOutbreaks: {}",
        location.name,
        location.report_count,
        location.risk_level,
        outbreaks.join(", ")
    )
}

/// Popup content for a marker. Every interpolated field is escaped.
pub fn info_window_html(location: &Location) -> String {
    let color = risk_color(location.risk_level);
    let mut html = String::new();
    html.push_str("<div class=\"info-window\">");
    html.push_str(&format!("<h3>{}</h3>", escape_html(&location.name)));
    html.push_str(&format!("<p class=\"county\">{}</p>", escape_html(&location.county)));
    html.push_str(&format!("<p>{} symptom reports</p>", location.report_count));
    html.push_str(&format!(
        "<p>Risk Level: <span style=\"color: {}\">{}</span></p>",
        color, location.risk_level
    ));
    html.push_str("<div class=\"outbreaks\"><h4>Active Outbreaks:</h4>");
    for outbreak in &location.outbreaks {
        html.push_str(&format!(
            "<div><span class=\"name\">{}:</span> {} cases <span class=\"meta\">({}, {})</span></div>",
            escape_html(&outbreak.disease.to_string()),
            outbreak.cases,
            outbreak.severity,
            outbreak.trend
        ));
    }
    html.push_str("</div>");
    html.push_str(&format!(
        "<p class=\"updated\">Last updated: {}</p>",
        location.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</div>");
    html
}

pub fn build_overlays(locations: &[Location]) -> MapOverlays {
    let mut overlays = MapOverlays::default();

    for location in locations {
        overlays.markers.push(Marker {
            location_id: location.id.clone(),
            position: location.position,
            title: marker_title(location),
            scale: marker_scale(location.report_count),
            fill_color: risk_color(location.risk_level),
            info_html: info_window_html(location),
        });

        for outbreak in &location.outbreaks {
            let color = match outbreak.severity {
                OutbreakSeverity::Critical => "#DC2626",
                OutbreakSeverity::High => "#EA580C",
                _ => continue,
            };
            overlays.circles.push(CircleOverlay {
                kind: CircleKind::Outbreak,
                center: location.position,
                radius: (outbreak.cases as f64 * 50.0).max(5000.0),
                color,
                stroke_opacity: 0.4,
                fill_opacity: 0.15,
            });
        }

        let risk = &location.disaster_risk;
        if risk.earthquake.risk_level.is_elevated() {
            overlays.rectangles.push(RectangleOverlay {
                bounds: Bounds {
                    north: location.position.lat + EARTHQUAKE_SPAN_DEG,
                    south: location.position.lat - EARTHQUAKE_SPAN_DEG,
                    east: location.position.lng + EARTHQUAKE_SPAN_DEG,
                    west: location.position.lng - EARTHQUAKE_SPAN_DEG,
                },
                color: EARTHQUAKE_COLOR,
            });
        }

        if risk.wildfire.risk_level == crate::core::HazardRisk::VeryHigh
            || risk.wildfire.current_season == FireSeason::Extreme
        {
            overlays.circles.push(CircleOverlay {
                kind: CircleKind::Wildfire,
                center: location.position,
                radius: WILDFIRE_RADIUS_M,
                color: WILDFIRE_COLOR,
                stroke_opacity: 0.5,
                fill_opacity: 0.2,
            });
        }
    }

    overlays
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>HealthWatch Outbreak Map</title>
<style>
  html, body, #map { height: 100%; margin: 0; }
  .info-window { font-family: sans-serif; font-size: 12px; max-width: 260px; }
  .info-window h3 { margin: 0 0 4px; font-size: 14px; }
  .info-window .meta, .info-window .updated, .info-window .county { color: #6b7280; }
</style>
</head>
<body>
<div id="map"></div>
<script>
const OVERLAYS = __OVERLAYS__;
function initMap() {
  const map = new google.maps.Map(document.getElementById("map"), {
    center: __CENTER__,
    zoom: __ZOOM__,
  });
  for (const m of OVERLAYS.markers) {
    const marker = new google.maps.Marker({
      position: m.position,
      map,
      title: m.title,
      icon: {
        path: google.maps.SymbolPath.CIRCLE,
        scale: m.scale,
        fillColor: m.fillColor,
        fillOpacity: 0.8,
        strokeColor: "#ffffff",
        strokeWeight: 2,
      },
    });
    const info = new google.maps.InfoWindow({ content: m.infoHtml });
    marker.addListener("click", () => info.open(map, marker));
  }
  for (const c of OVERLAYS.circles) {
    new google.maps.Circle({
      map,
      center: c.center,
      radius: c.radius,
      strokeColor: c.color,
      strokeOpacity: c.strokeOpacity,
      strokeWeight: c.kind === "wildfire" ? 2 : 1,
      fillColor: c.color,
      fillOpacity: c.fillOpacity,
    });
  }
  for (const r of OVERLAYS.rectangles) {
    new google.maps.Rectangle({
      map,
      bounds: r.bounds,
      strokeColor: r.color,
      strokeOpacity: 0.3,
      strokeWeight: 2,
      fillColor: r.color,
      fillOpacity: 0.1,
    });
  }
}
</script>
<script async src="https://maps.googleapis.com/maps/api/js?key=__API_KEY__&callback=initMap"></script>
</body>
</html>
"##;

/// Standalone page that loads the maps SDK and draws `overlays`.
pub fn render_page(overlays: &MapOverlays, api_key: &str, center: LatLng, zoom: u8) -> Result<String> {
    // keep "</script>" in embedded strings from closing the tag
    let overlays_json = serde_json::to_string(overlays)?.replace("</", "<\\/");
    let center_json = serde_json::to_string(&center)?;

    Ok(PAGE_TEMPLATE
        .replace("__OVERLAYS__", &overlays_json)
        .replace("__CENTER__", &center_json)
        .replace("__ZOOM__", &zoom.to_string())
        .replace("__API_KEY__", &urlencoding::encode(api_key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Catalog;

    #[test]
    fn test_marker_scale_bounds() {
        assert_eq!(marker_scale(0), 10.0);
        assert_eq!(marker_scale(300), 15.0);
        assert_eq!(marker_scale(10_000), 25.0);
    }

    #[test]
    fn test_marker_per_location() {
        let catalog = Catalog::seeded();
        let overlays = build_overlays(&catalog.locations);
        assert_eq!(overlays.markers.len(), catalog.locations.len());

        let seattle = &overlays.markers[0];
        assert_eq!(seattle.fill_color, "#EAB308");
        assert!(seattle
            .title
            .starts_with("Seattle: 284 reports (moderate risk)\nOutbreaks: Influenza (412)"));
    }

    #[test]
    fn test_outbreak_circles_only_for_high_and_critical() {
        let catalog = Catalog::seeded();
        let vancouver = catalog.location("l4").unwrap().clone();
        let overlays = build_overlays(std::slice::from_ref(&vancouver));

        let outbreak_circles: Vec<_> = overlays
            .circles
            .iter()
            .filter(|c| c.kind == CircleKind::Outbreak)
            .collect();
        // COVID-19 critical, Influenza high, Measles high
        assert_eq!(outbreak_circles.len(), 3);
        assert_eq!(outbreak_circles[0].color, "#DC2626");
        assert_eq!(outbreak_circles[0].radius, 356.0 * 50.0);
        // Measles: 9 cases is below the minimum radius
        assert_eq!(outbreak_circles[2].radius, 5000.0);
        assert_eq!(overlays.rectangles.len(), 1);
    }

    #[test]
    fn test_wildfire_overlay_for_extreme_season() {
        let catalog = Catalog::seeded();
        let pasco = catalog.location("l15").unwrap().clone();
        let overlays = build_overlays(std::slice::from_ref(&pasco));
        let fire: Vec<_> = overlays
            .circles
            .iter()
            .filter(|c| c.kind == CircleKind::Wildfire)
            .collect();
        assert_eq!(fire.len(), 1);
        assert_eq!(fire[0].radius, 15_000.0);
        assert!(overlays.rectangles.is_empty());
    }

    #[test]
    fn test_info_window_escapes_fields() {
        let mut location = Catalog::seeded().location("l1").unwrap().clone();
        location.name = "<script>alert('x')</script>".to_string();
        location.county = "King & Co".to_string();

        let html = info_window_html(&location);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("King &amp; Co"));
        assert!(html.contains("412 cases"));
    }

    #[test]
    fn test_render_page_embeds_overlays() {
        let catalog = Catalog::seeded();
        let overlays = build_overlays(&catalog.locations);
        let page = render_page(&overlays, "test-key", DEFAULT_CENTER, DEFAULT_ZOOM).unwrap();

        assert!(page.contains("js?key=test-key&callback=initMap"));
        assert!(page.contains("\"locationId\":\"l1\""));
        assert!(page.contains("zoom: 7"));
        assert!(!page.contains("__OVERLAYS__"));
        // only the two real closing script tags remain
        assert_eq!(page.matches("</script>").count(), 2);
    }

    #[test]
    fn test_render_page_percent_encodes_key() {
        let page = render_page(&MapOverlays::default(), "a&b c", DEFAULT_CENTER, DEFAULT_ZOOM).unwrap();
        assert!(page.contains("js?key=a%26b%20c&callback=initMap"));
        assert!(!page.contains("a&b c"));
    }
}
