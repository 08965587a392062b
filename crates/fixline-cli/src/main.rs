// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fixline_core::lookup::{HttpLookup, NavData};
use fixline_core::overlay::OverlayStore;
use fixline_core::{
    expand_route, resolve_fixes, FeatureCanvas, FixlineConfig, LookupService, RoutePlotter,
    StatusSink,
};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the route lookup API
    #[arg(long, env = "FIXLINE_API_URL")]
    base_url: Option<String>,

    /// Lookup timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Resolve against a local navdata JSON file instead of the API
    #[arg(long, value_name = "FILE")]
    navdata: Option<PathBuf>,

    /// Config file (defaults to the per-user config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the candidate fixes a route expands to
    Expand { route: String },
    /// Expand a route and print fix coordinates
    Resolve { route: String },
    /// Plot one or more routes and print them as GeoJSON
    Plot {
        /// Route color (defaults to the configured color)
        #[arg(long)]
        color: Option<String>,
        #[arg(required = true)]
        routes: Vec<String>,
    },
}

/// Prints status updates on stderr, skipping the clear.
struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn set(&self, message: &str) {
        if !message.is_empty() {
            eprintln!("{}", message);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str("fixline")
        .build();
    // A second init only fails when a logger is already installed.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn load_config(cli: &Cli) -> Result<FixlineConfig> {
    let mut config = match &cli.config {
        Some(path) => FixlineConfig::load_from(path)
            .with_context(|| format!("Failed to read config {:?}", path))?,
        None => FixlineConfig::load(),
    };
    if let Some(url) = &cli.base_url {
        config.lookup_base_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(&cli)?;

    match &cli.navdata {
        Some(path) => {
            let nav = NavData::load(path)
                .with_context(|| format!("Failed to load navdata {:?}", path))?;
            run(&cli.command, &config, nav).await
        }
        None => {
            let http = HttpLookup::new(&config).context("Failed to build HTTP client")?;
            run(&cli.command, &config, http).await
        }
    }
}

async fn run<L: LookupService>(command: &Commands, config: &FixlineConfig, lookup: L) -> Result<()> {
    match command {
        Commands::Expand { route } => {
            let candidates = expand_route(&lookup, route).await;
            println!("{}", candidates.join(" "));
        }
        Commands::Resolve { route } => {
            let candidates = expand_route(&lookup, route).await;
            let resolution = resolve_fixes(&lookup, &candidates)
                .await
                .context("Fix lookup failed")?;
            for fix in &resolution.resolved {
                println!("{:<6} {:>10.5} {:>11.5}", fix.id, fix.lat, fix.lon);
            }
            if !resolution.missing.is_empty() {
                println!("Missing: {}", resolution.missing.join(", "));
            }
        }
        Commands::Plot { color, routes } => {
            let color = color.as_deref().unwrap_or(&config.default_color);
            let store = Arc::new(Mutex::new(OverlayStore::new(FeatureCanvas::new())));
            let plotter = RoutePlotter::new(lookup, store, ConsoleStatus);

            let results =
                futures::future::join_all(routes.iter().map(|r| plotter.plot(r, color))).await;

            for (route, result) in routes.iter().zip(results) {
                match result {
                    Ok(report) if report.route_id.is_none() => {
                        eprintln!("Not plotted (fewer than 2 fixes resolved): {}", route)
                    }
                    Ok(_) => {}
                    Err(e) => eprintln!("Failed to plot {}: {}", route, e),
                }
            }

            let geojson = plotter.lock_store().renderer().to_geojson();
            println!("{}", serde_json::to_string_pretty(&geojson)?);
        }
    }
    Ok(())
}
