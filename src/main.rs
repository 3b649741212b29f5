use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};

mod api;
mod dashboard;
mod marker;
mod models;
mod report;
mod status;

use api::SignalGateway;
use dashboard::Dashboard;

#[derive(Parser)]
#[command(name = "distress-dashboard")]
#[command(about = "Operator dashboard for the distress signal response system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the signal board and print markers plus the status table
    Board {
        /// Toggle the status sort; repeat to flip direction, as in the UI
        #[arg(short, long, action = ArgAction::Count)]
        sort_status: u8,
        /// Dump the raw signal collection as JSON instead of rendering
        #[arg(long)]
        json: bool,
    },
    /// Show the expanded detail panel for one signal
    Show {
        id: i64,
    },
    /// Accept a signal on behalf of a responder
    Accept {
        id: i64,
    },
    /// Cancel a signal
    Cancel {
        id: i64,
    },
    /// Write a markdown snapshot of the board
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export the signal table to CSV
    Export {
        #[arg(long, default_value = "signals.csv")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let gateway = SignalGateway::from_env();
    log::debug!("using distress API at {}", gateway.base_url());

    match cli.command {
        Commands::Board { sort_status, json } => {
            let mut dashboard = Dashboard::new();
            dashboard.load(&gateway).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(dashboard.signals())?);
                return Ok(());
            }

            for _ in 0..sort_status {
                dashboard.toggle_sort();
            }

            if dashboard.signals().is_empty() {
                println!("No signals on the board.");
                return Ok(());
            }

            print!("{}", dashboard.render_markers());
            println!();
            print!("{}", dashboard.render_table());

            if let Ok(api_key) = std::env::var("DISTRESS_MAP_API_KEY") {
                println!();
                println!(
                    "Map: {}",
                    marker::static_map_url(dashboard.signals(), &api_key)
                );
            }
        }
        Commands::Show { id } => {
            let mut dashboard = Dashboard::new();
            dashboard.load(&gateway).await?;

            let signal = dashboard
                .find_signal(id)
                .with_context(|| format!("no signal {id} on the board"))?;

            let mut marker = marker::Marker::new(signal.clone());
            marker.toggle();
            print!("{}", marker.render());
        }
        Commands::Accept { id } => match gateway.accept_signal(id).await {
            Ok(message) => println!("{message}"),
            Err(err) => {
                log::warn!("accept failed for signal {id}: {err:#}");
                return Err(err);
            }
        },
        Commands::Cancel { id } => match gateway.cancel_signal(id).await {
            Ok(message) => println!("{message}"),
            Err(err) => {
                log::warn!("cancel failed for signal {id}: {err:#}");
                return Err(err);
            }
        },
        Commands::Report { out } => {
            let mut dashboard = Dashboard::new();
            dashboard.load(&gateway).await?;

            let report = report::build_report(dashboard.signals(), &dashboard.table_rows());
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { out } => {
            let mut dashboard = Dashboard::new();
            dashboard.load(&gateway).await?;

            let written = report::export_csv(&dashboard.table_rows(), &out)?;
            println!("Exported {written} signals to {}.", out.display());
        }
    }

    Ok(())
}
