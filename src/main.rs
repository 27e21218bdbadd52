use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

mod client;
mod config;
mod dates;
mod ingest;
mod logging;
mod models;
mod render;
mod report;
mod risk;
mod severity;
mod style;
mod trend;

use client::ApiClient;
use config::DashboardConfig;
use models::{BreakdownFilters, ExtractedSignal};
use style::Painter;

#[derive(Parser)]
#[command(name = "groundswell-dashboard")]
#[command(about = "Terminal dashboard for at-risk sites and execution signals", long_about = None)]
struct Cli {
    /// JSON config file; defaults apply when it does not exist
    #[arg(long, global = true, default_value = "groundswell.json")]
    config: PathBuf,
    /// Backend base URL, overrides the config file
    #[arg(long, global = true, env = "GROUNDSWELL_API_URL")]
    api_url: Option<String>,
    /// Request timeout in seconds, overrides the config file
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List at-risk sites, highest score first
    Sites {
        #[arg(long, default_value_t = 50.0)]
        min_score: f64,
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Show one site with its risk assessment and signal timeline
    Site {
        site_id: String,
        /// Only show the site card
        #[arg(long)]
        summary: bool,
    },
    /// Aggregate signal counts
    Breakdown {
        #[arg(long)]
        site_id: Option<String>,
        #[arg(long)]
        signal_type: Option<String>,
        #[arg(long)]
        severity: Option<String>,
        #[arg(long)]
        resolved: Option<bool>,
    },
    /// Mark a signal as resolved
    Resolve { signal_id: String },
    /// Send inspections from a CSV file to the backend
    IngestInspections {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Send work orders from a CSV file to the backend
    IngestWorkOrders {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value_t = 50.0)]
        min_score: f64,
        #[arg(long, default_value_t = 50)]
        limit: usize,
        /// Sites whose signal history feeds the recent notes section
        #[arg(long, default_value_t = 3)]
        history_sites: usize,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn log_extracted(signals: &[ExtractedSignal]) {
    for signal in signals {
        info!(
            signal_id = %signal.signal_id,
            signal_type = %signal.signal_type,
            severity = %signal.severity,
            confidence = ?signal.confidence,
            "signal extracted"
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(&cli.config)?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.api.timeout_secs = timeout_secs;
    }

    logging::init(&config.log);
    info!(base_url = %config.api.base_url, "dashboard starting");

    let api = ApiClient::new(&config.api)?;
    let painter = Painter::detect(cli.no_color);

    match cli.command {
        Commands::Sites { min_score, limit } => {
            let listing = match api.at_risk_sites(min_score, limit).await {
                Ok(listing) => listing,
                Err(err) => {
                    error!(error = %err, cause = %err.root_cause(), "failed to load sites");
                    Default::default()
                }
            };
            print!("{}", render::dashboard(&painter, &listing, min_score));
        }
        Commands::Site { site_id, summary } => {
            if summary {
                match api.site(&site_id).await {
                    Ok(site) => print!("{}", render::site_card(&painter, &site)),
                    Err(err) => {
                        error!(%site_id, error = %err, cause = %err.root_cause(), "failed to load site");
                        print!("{}", render::site_detail(&painter, None));
                    }
                }
            } else {
                let history = match api.site_history(&site_id).await {
                    Ok(history) => Some(history),
                    Err(err) => {
                        error!(%site_id, error = %err, cause = %err.root_cause(), "failed to load site data");
                        None
                    }
                };
                print!("{}", render::site_detail(&painter, history.as_ref()));
            }
        }
        Commands::Breakdown {
            site_id,
            signal_type,
            severity,
            resolved,
        } => {
            let filters = BreakdownFilters {
                site_id,
                signal_type,
                severity,
                resolved,
            };
            let breakdown = api.signals_breakdown(&filters).await?;
            print!("{}", render::breakdown(&painter, &breakdown));
        }
        Commands::Resolve { signal_id } => {
            let ack = api.resolve_signal(&signal_id).await?;
            info!(signal_id = %ack.signal_id, status = %ack.status, "signal resolved");
            println!("Signal {} resolved.", ack.signal_id);
        }
        Commands::IngestInspections { csv } => {
            let file = std::fs::File::open(&csv)
                .with_context(|| format!("failed to open {}", csv.display()))?;
            let inspections = ingest::read_inspections(file)?;
            let mut signals = 0usize;
            for inspection in &inspections {
                let ack = api.ingest_inspection(inspection).await.with_context(|| {
                    format!("failed to ingest inspection {}", inspection.inspection_id)
                })?;
                info!(
                    inspection_id = %inspection.inspection_id,
                    status = %ack.status,
                    signals = ack.signals_extracted,
                    "inspection ingested"
                );
                log_extracted(&ack.signals);
                signals += ack.signals_extracted;
            }
            println!(
                "Processed {} inspections from {}, {} signals extracted.",
                inspections.len(),
                csv.display(),
                signals
            );
        }
        Commands::IngestWorkOrders { csv } => {
            let file = std::fs::File::open(&csv)
                .with_context(|| format!("failed to open {}", csv.display()))?;
            let work_orders = ingest::read_work_orders(file)?;
            let mut signals = 0usize;
            for work_order in &work_orders {
                let ack = api.ingest_work_order(work_order).await.with_context(|| {
                    format!("failed to ingest work order {}", work_order.work_order_id)
                })?;
                info!(
                    work_order_id = %work_order.work_order_id,
                    status = %ack.status,
                    signals = ack.signals_extracted,
                    "work order ingested"
                );
                log_extracted(&ack.signals);
                signals += ack.signals_extracted;
            }
            println!(
                "Processed {} work orders from {}, {} signals extracted.",
                work_orders.len(),
                csv.display(),
                signals
            );
        }
        Commands::Report {
            min_score,
            limit,
            history_sites,
            out,
        } => {
            let listing = api.at_risk_sites(min_score, limit).await?;
            let breakdown = api.signals_breakdown(&BreakdownFilters::default()).await?;

            let mut recent_signals = Vec::new();
            for site in listing.sites.iter().take(history_sites) {
                match api.site_history(&site.site_id).await {
                    Ok(history) => recent_signals.extend(history.signals),
                    Err(err) => {
                        warn!(site_id = %site.site_id, error = %err, cause = %err.root_cause(), "skipping site history")
                    }
                }
            }

            let report = report::build_report(min_score, &listing.sites, &breakdown, &recent_signals);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["groundswell-dashboard", "--timeout-secs", "0", "sites"]).is_err());
        let cli =
            Cli::try_parse_from(["groundswell-dashboard", "--timeout-secs", "5", "sites"]).unwrap();
        assert_eq!(cli.timeout_secs, Some(5));
    }

    #[test]
    fn site_summary_and_history_sites_parse() {
        let cli = Cli::try_parse_from(["groundswell-dashboard", "site", "site_001", "--summary"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Site { summary: true, .. }));

        let cli = Cli::try_parse_from(["groundswell-dashboard", "report", "--history-sites", "5"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Report { history_sites: 5, .. }));
    }
}
