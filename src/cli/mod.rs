use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;

use crate::advisor::{identify_symptoms, simulate_voice_capture, Advisor};
use crate::advisory::{LocationSummary, TravelAdvisory};
use crate::ai_provider::{GeminiClient, ImagePayload};
use crate::chat::ChatSession;
use crate::config::Config;
use crate::core::{
    AlertSeverity, Catalog, InsightSeverity, Location, OutbreakSeverity, ReportingSimulator, RiskLevel,
    SymptomSeverity, Trend,
};
use crate::map::{build_overlays, render_page, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::stats::DashboardStats;

pub use commands::{Args, Commands, ConfigCommands};

mod commands;

pub fn load_catalog(config: &Config) -> Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Ok(Catalog::seeded()),
    }
}

fn risk_label(risk: RiskLevel) -> ColoredString {
    let text = risk.to_string();
    match risk {
        RiskLevel::Low => text.green(),
        RiskLevel::Moderate => text.yellow(),
        RiskLevel::High => text.bright_red(),
        RiskLevel::Severe => text.red().bold(),
    }
}

fn severity_label(severity: OutbreakSeverity) -> ColoredString {
    let text = severity.to_string();
    match severity {
        OutbreakSeverity::Low => text.green(),
        OutbreakSeverity::Moderate => text.yellow(),
        OutbreakSeverity::High => text.bright_red(),
        OutbreakSeverity::Critical => text.red().bold(),
    }
}

fn trend_arrow(trend: Trend) -> ColoredString {
    match trend {
        Trend::Increasing => "↑".red(),
        Trend::Decreasing => "↓".green(),
        Trend::Stable => "→".dimmed(),
    }
}

fn print_outbreaks(location: &Location) {
    for outbreak in &location.outbreaks {
        println!(
            "    {} {:<14} {:>5} cases  {} {}",
            "•".dimmed(),
            outbreak.disease.to_string(),
            outbreak.cases,
            trend_arrow(outbreak.trend),
            severity_label(outbreak.severity)
        );
    }
}

pub async fn handle_locations(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;

    println!("📍 Monitored locations ({}):", catalog.locations.len());
    for location in &catalog.locations {
        println!(
            "  {:<4} {:<16} {:<18} {:>4} reports  {}",
            location.id,
            location.name,
            location.county,
            location.report_count,
            risk_label(location.risk_level)
        );
    }
    Ok(())
}

pub async fn handle_location(id: String, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;
    let location = catalog.location(&id)?;
    let summary = LocationSummary::new(location, Utc::now());

    println!("{} {}", location.name.cyan().bold(), format!("({})", location.county).dimmed());
    println!(
        "  Population: {}  Reports: {}  Risk: {}",
        location.population,
        location.report_count,
        risk_label(location.risk_level)
    );
    println!(
        "  {}°F  {}% humidity  AQI {} ({})  UV {} ({})",
        location.temperature,
        location.humidity,
        location.air_quality_index,
        summary.air_quality,
        location.uv_index,
        summary.uv
    );
    println!("  {}", "Outbreaks:".yellow());
    print_outbreaks(location);
    print_alerts(&summary);
    print_hazards(&summary);
    println!("  {}", format!("Last updated: {}", location.last_updated.format("%Y-%m-%d %H:%M:%S UTC")).dimmed());
    Ok(())
}

fn print_alerts(summary: &LocationSummary<'_>) {
    if summary.active_alerts.is_empty() {
        return;
    }
    println!("  {}", "Climate alerts:".yellow());
    for alert in &summary.active_alerts {
        let severity = match alert.severity {
            AlertSeverity::Emergency => alert.severity.to_string().red().bold(),
            AlertSeverity::Warning => alert.severity.to_string().bright_red(),
            _ => alert.severity.to_string().yellow(),
        };
        println!("    ⚠️  {} [{}] ({})", alert.title, severity, alert.hazard);
        println!(
            "       {} – {}",
            alert.start.format("%Y-%m-%d"),
            alert.end.format("%Y-%m-%d")
        );
        println!("       {}", alert.description);
        for impact in &alert.health_impacts {
            println!("       {} {}", "impact:".red(), impact);
        }
        for rec in &alert.recommendations {
            println!("       {} {}", "advice:".blue(), rec);
        }
    }
}

fn print_hazards(summary: &LocationSummary<'_>) {
    let risk = summary.disaster_risk;
    println!("  {}", "Natural hazards:".yellow());
    println!(
        "    Earthquake: {} (30-year probability {}%, last major {}, M{})",
        risk.earthquake.risk_level,
        risk.earthquake.probability_30_year,
        risk.earthquake.last_major_event,
        risk.earthquake.magnitude
    );
    println!(
        "    Flood:      {} ({}, seasonal: {})",
        risk.flood.risk_level, risk.flood.flood_zone, risk.flood.seasonal_risk
    );
    println!(
        "    Wildfire:   {} (season {}, {} nearby fires)",
        risk.wildfire.risk_level, risk.wildfire.current_season, risk.wildfire.nearby_fires
    );
}

pub async fn handle_insights(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;

    println!("🧠 AI insights:");
    for insight in catalog.recent_insights() {
        let badge = match insight.severity {
            InsightSeverity::Alert => insight.severity.to_string().red().bold(),
            InsightSeverity::Warning => insight.severity.to_string().yellow(),
            InsightSeverity::Info => insight.severity.to_string().blue(),
        };
        println!(
            "  [{}] {} ({:.0}% confidence)",
            badge,
            insight.title.bold(),
            insight.confidence_score * 100.0
        );
        println!("      {}", insight.description);
        println!(
            "      {}",
            format!(
                "{} | {}",
                insight.related_symptoms.join(", "),
                insight.timestamp.format("%Y-%m-%d %H:%M")
            )
            .dimmed()
        );
    }
    Ok(())
}

pub async fn handle_stats(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;
    let stats = DashboardStats::collect(&catalog);

    println!("📊 Dashboard");
    println!("  Locations monitored: {}", stats.monitored_locations);
    println!("  Population covered:  {}", stats.population_covered);
    println!("  Symptom reports:     {}", stats.total_reports);
    println!("  Active outbreaks:    {} ({} high or critical)", stats.active_outbreaks, stats.severe_outbreaks);
    println!("  Total cases:         {}", stats.total_cases);
    println!("  Climate alerts:      {}", stats.climate_alerts);
    for (risk, count) in &stats.locations_by_risk {
        println!("    {:<10} {}", risk_label(*risk), count);
    }
    Ok(())
}

pub async fn handle_symptoms(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;

    for symptom in &catalog.symptoms {
        let note = if symptom.severity == SymptomSeverity::Severe {
            " (Severe)".red().to_string()
        } else {
            String::new()
        };
        println!("  {:<4} {}{}", symptom.id, symptom.name, note);
    }
    Ok(())
}

pub async fn handle_report(location_id: String, symptoms: Vec<String>, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;
    let symptom_ids = catalog.symptom_ids_for(&symptoms);
    let mut simulator = ReportingSimulator::new(catalog, config.simulator_settings());

    println!("{}", "Submitting...".dimmed());
    let outcome = simulator.submit_report(&symptom_ids, &location_id).await?;

    println!(
        "{}",
        "✅ Symptoms reported successfully. Thank you for contributing to public health monitoring.".green()
    );
    let location = simulator.catalog().location(&location_id)?;
    println!(
        "  {}: {} total reports | population {} | risk {}",
        location.name,
        outcome.report_count,
        location.population,
        risk_label(location.risk_level)
    );
    for change in &outcome.escalations {
        println!(
            "  {} {} {} → {} cases",
            "↑".red(),
            change.disease,
            change.before,
            change.after
        );
    }
    for report in simulator.reports() {
        println!(
            "  {}",
            format!(
                "{} {} [{}]",
                report.timestamp.format("%H:%M:%S"),
                report.id,
                report.symptom_ids.join(", ")
            )
            .dimmed()
        );
    }
    Ok(())
}

pub async fn handle_watch(ticks: Option<u64>, location_filter: Option<String>, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;
    if let Some(id) = &location_filter {
        catalog.location(id)?;
    }
    let mut simulator = ReportingSimulator::new(catalog, config.simulator_settings());

    println!(
        "{}",
        format!(
            "📡 Live outbreak feed, updating every {}s (Ctrl-C to stop)",
            config.simulator.tick_interval_secs.max(1)
        )
        .cyan()
    );

    simulator
        .run(ticks, |summary, catalog| {
            println!("{}", format!("--- update #{} ---", summary.tick).dimmed());
            for change in &summary.changes {
                if location_filter.as_ref().map_or(false, |id| *id != change.location_id) {
                    continue;
                }
                let name = catalog
                    .location(&change.location_id)
                    .map(|l| l.name.as_str())
                    .unwrap_or("?");
                let arrow = if change.after > change.before { "↑".red() } else { "↓".green() };
                println!("  {} {:<16} {:<14} {} → {}", arrow, name, change.disease.to_string(), change.before, change.after);
            }
            if let Some(location) = location_filter.as_ref().and_then(|id| catalog.location(id).ok()) {
                print_outbreaks(location);
            }
        })
        .await;
    Ok(())
}

pub async fn handle_chat(message: Option<String>, model: Option<String>, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;
    let client = GeminiClient::new(config.get_ai_config(model))?;

    if config.gemini_api_key().is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; answers will come from the offline table");
    }

    let session = ChatSession::new(Advisor::new(client), catalog.symptoms, config.typing_delay());
    match message {
        Some(message) => crate::conversation::single_turn(session, &message).await,
        None => crate::conversation::handle_conversation(session, config.voice_delay()).await,
    }
}

pub async fn handle_voice(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;

    println!("{}", "🎙️  Voice recording started. Listening to your health concerns...".yellow());
    let transcript = simulate_voice_capture(config.voice_delay()).await;
    println!("{} {}", "Voice captured:".green(), transcript);

    let matched = identify_symptoms(&catalog.symptoms, &transcript);
    if !matched.is_empty() {
        let names: Vec<&str> = matched.iter().map(|s| s.name.as_str()).collect();
        println!("{}", format!("Identified symptoms: {}", names.join(", ")).cyan());
    }

    let client = GeminiClient::new(config.get_ai_config(None))?;
    let mut advisor = Advisor::new(client);
    let reply = advisor.advise(&transcript, &matched).await;
    println!("{} {}", "HealthWatch:".green().bold(), reply);
    Ok(())
}

pub async fn handle_xray(image: &Path, model: Option<String>, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let payload = ImagePayload::from_path(image)
        .with_context(|| format!("Failed to read image {}", image.display()))?;
    let client = GeminiClient::new(config.get_ai_config(model))?;
    let advisor = Advisor::new(client);

    println!("{}", "🩻 Analyzing X-ray...".yellow());
    let analysis = advisor
        .analyze_xray(&payload)
        .await
        .context("Image analysis failed. Please try again later")?;
    println!("{}", analysis);
    Ok(())
}

pub async fn handle_map(output: &Path, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;

    let overlays = build_overlays(&catalog.locations);
    let page = render_page(&overlays, &config.maps_api_key(), DEFAULT_CENTER, DEFAULT_ZOOM)?;
    std::fs::write(output, page)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "🗺️  Map written to {} ({} markers, {} circles, {} rectangles)",
        output.display(),
        overlays.markers.len(),
        overlays.circles.len(),
        overlays.rectangles.len()
    );
    Ok(())
}

pub async fn handle_advisory(from: String, to: String, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let catalog = load_catalog(&config)?;
    let advisory = TravelAdvisory::compare(catalog.location(&from)?, catalog.location(&to)?, Utc::now());

    for (label, summary) in [("🏠 Current location", &advisory.current), ("✈️  Travel destination", &advisory.destination)] {
        let location = summary.location;
        println!("{}: {} {}", label, location.name.cyan().bold(), format!("({})", location.county).dimmed());
        println!(
            "  {}°F | AQI {} ({}) | UV {} ({}) | {}% humidity",
            location.temperature,
            location.air_quality_index,
            summary.air_quality,
            location.uv_index,
            summary.uv,
            location.humidity
        );
        println!("  Risk: {}", risk_label(location.risk_level));
        let critical = summary.critical_outbreaks();
        if critical > 0 {
            println!("  {}", format!("{} critical outbreak(s)", critical).red().bold());
        }
        print_alerts(summary);
        print_hazards(summary);
        println!("  {}", "Outbreaks:".yellow());
        for outbreak in &summary.outbreaks {
            println!(
                "    {} {} cases, trend {} ({})",
                outbreak.disease,
                outbreak.cases,
                outbreak.trend,
                severity_label(outbreak.severity)
            );
        }
        println!();
    }

    if advisory.destination_is_riskier() {
        println!("{}", "⚠️  Destination has a higher outbreak risk level than your current location.".red());
    }
    Ok(())
}

pub async fn handle_config(command: ConfigCommands, data_dir: Option<PathBuf>) -> Result<()> {
    let mut config = Config::new(data_dir)?;
    match command {
        ConfigCommands::Show => {
            println!("Config file: {}", config.config_file().display());
            println!("AI model:    {}", config.ai.model);
            println!("AI endpoint: {}", config.ai.base_url);
            println!(
                "AI key:      {}",
                if config.gemini_api_key().is_some() { "✓ set".green() } else { "✗ missing".yellow() }
            );
            println!(
                "Maps key:    {}",
                if config.maps.api_key.is_some() { "stored".green() } else { "default".yellow() }
            );
            println!("Tick:        {}s", config.simulator.tick_interval_secs);
        }
        ConfigCommands::SetMapsKey { key } => {
            config.set_maps_api_key(&key)?;
            println!("✅ Maps API key saved to {}", config.config_file().display());
        }
    }
    Ok(())
}
