use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use clinic_timeline::config::{admin_password_from_env, TimelineConfig, DEFAULT_PORT};
use clinic_timeline::display::{print_day_layout, write_layout_to_file};
use clinic_timeline::parser::load_appointments;
use clinic_timeline::timeline::build_day_view;
use clinic_timeline::web::{self, AppState};

#[derive(Parser)]
#[command(name = "clinic-timeline", version, about = "Front-desk appointment day timeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the laid-out timeline for one day
    Layout {
        /// Appointment export (id,date,time,duration,status,patient_name,visit_reason)
        #[arg(long)]
        csv: PathBuf,
        /// Day to lay out, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Also write the layout to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Serve the timeline page and JSON API
    Web {
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Appointment book to preload
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = TimelineConfig::from_env();

    match cli.command {
        Command::Layout { csv, date, out } => {
            let book = load_appointments(&csv)
                .with_context(|| format!("loading appointments from {}", csv.display()))?;
            let view = build_day_view(&book, date, Local::now().naive_local(), &config)?;

            print_day_layout(&view)?;
            if let Some(path) = out {
                write_layout_to_file(&view, &path)
                    .with_context(|| format!("writing layout to {}", path.display()))?;
                info!(path = %path.display(), "layout saved");
            }
        }
        Command::Web { port, csv } => {
            let book = match csv {
                Some(path) => Some(
                    load_appointments(&path)
                        .with_context(|| format!("loading appointments from {}", path.display()))?,
                ),
                None => None,
            };

            info!("access the timeline at http://localhost:{}", port);
            let state = AppState::new(admin_password_from_env(), config, book);
            web::start_server(port, state).await?;
        }
    }

    Ok(())
}
