use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "healthwatch")]
#[command(about = "Community health surveillance dashboard")]
#[command(version)]
pub struct Args {
    /// Directory holding config.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List monitored locations
    Locations,
    /// Show outbreaks, alerts and hazards for one location
    Location {
        /// Location id (e.g. l1)
        id: String,
    },
    /// Show AI insight cards, newest first
    Insights,
    /// Dashboard totals
    Stats,
    /// List reportable symptoms
    Symptoms,
    /// Submit a symptom report
    Report {
        /// Location id
        #[arg(short, long)]
        location: String,
        /// Symptom ids or names (e.g. s1 cough)
        symptoms: Vec<String>,
    },
    /// Watch the live outbreak feed
    Watch {
        /// Stop after this many updates
        #[arg(short, long)]
        ticks: Option<u64>,
        /// Only show this location
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Ask the health assistant (interactive when no message is given)
    Chat {
        message: Option<String>,
        /// Model override
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Capture a (simulated) voice description and ask the assistant about it
    Voice,
    /// Ask the vision model to describe an X-ray image
    Xray {
        image: PathBuf,
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Write the outbreak map page
    Map {
        #[arg(short, long, default_value = "healthwatch-map.html")]
        output: PathBuf,
    },
    /// Compare conditions between two locations
    Advisory {
        /// Current location id
        from: String,
        /// Destination location id
        to: String,
    },
    /// Configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the active configuration
    Show,
    /// Store the maps API key
    SetMapsKey { key: String },
}
