// main.rs
use clap::Parser;
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use healthwatch::cli::{self, Args, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let data_dir = args.data_dir;

    let result = match args.command {
        Commands::Locations => cli::handle_locations(data_dir).await,
        Commands::Location { id } => cli::handle_location(id, data_dir).await,
        Commands::Insights => cli::handle_insights(data_dir).await,
        Commands::Stats => cli::handle_stats(data_dir).await,
        Commands::Symptoms => cli::handle_symptoms(data_dir).await,
        Commands::Report { location, symptoms } => cli::handle_report(location, symptoms, data_dir).await,
        Commands::Watch { ticks, location } => cli::handle_watch(ticks, location, data_dir).await,
        Commands::Chat { message, model } => cli::handle_chat(message, model, data_dir).await,
        Commands::Voice => cli::handle_voice(data_dir).await,
        Commands::Xray { image, model } => cli::handle_xray(&image, model, data_dir).await,
        Commands::Map { output } => cli::handle_map(&output, data_dir).await,
        Commands::Advisory { from, to } => cli::handle_advisory(from, to, data_dir).await,
        Commands::Config { command } => cli::handle_config(command, data_dir).await,
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "❌".red(), e);
        std::process::exit(1);
    }
}
