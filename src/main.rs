use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use metrics_audit::browser::MetricFilter;
use metrics_audit::config::AuditConfig;
use metrics_audit::ingestion::{self, LoadOutcome};
use metrics_audit::{render, AnalysisSession};
use std::io::{self, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "metrics-audit")]
#[command(about = "Value vs. vanity and redundancy analysis of departmental metrics")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Dataset URL or CSV file path (or set METRICS_SOURCE)
    #[arg(long, global = true)]
    source: Option<String>,

    /// Department to analyze; defaults to the first one in the data
    #[arg(short, long, global = true)]
    department: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse metrics with optional filters
    Overview {
        /// Case-insensitive metric name search
        #[arg(short, long)]
        search: Option<String>,

        /// Only metrics with this Visible_in_Dashboard value (Yes/No)
        #[arg(long)]
        visible: Option<String>,

        /// Only metrics with this Used_in_Decision_Making value (Yes/No)
        #[arg(long)]
        used: Option<String>,

        /// Only metrics with this Executive_Requested value (Yes/No)
        #[arg(long)]
        requested: Option<String>,
    },
    /// Value vs. vanity scoring for the selected department
    Value {
        /// Business goal shown alongside the top metrics
        #[arg(short, long)]
        goal: Option<String>,
    },
    /// Metrics tracked redundantly across departments
    Redundancy,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let goal = match &args.command {
        Commands::Value { goal } => goal.clone(),
        _ => None,
    };
    let config = AuditConfig::from_env().with_overrides(args.source.clone(), args.department.clone(), goal);
    config.validate().context("Invalid configuration")?;

    let source = ingestion::source_for(&config.source);
    let outcome = ingestion::load(source.as_ref()).await;
    if let LoadOutcome::FetchFailed { reason, .. } = &outcome {
        warn!("Continuing without data: {}", reason);
    }

    let mut session = AnalysisSession::from_outcome(outcome);
    if let Some(department) = &config.department {
        session.select_department(department.clone());
    }
    if let Some(goal) = &config.business_goal {
        session.set_business_goal(goal.clone());
    }

    info!(
        "Analyzing {} records across {} departments",
        session.dataset().len(),
        session.departments().len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Commands::Overview { search, visible, used, requested } => {
            let filter = MetricFilter {
                department: None,
                search,
                visible,
                used,
                requested,
            };
            let rows = session.overview(&filter);
            match args.format {
                Format::Text => out.write_all(render::browser_text(&rows).as_bytes())?,
                Format::Json => render::write_json(&mut out, &rows)?,
                Format::Csv => render::write_browser_csv(&mut out, &rows)?,
            }
        }
        Commands::Value { .. } => match args.format {
            Format::Text => out.write_all(render::value_report_text(&session.value_report()).as_bytes())?,
            Format::Json => render::write_json(&mut out, &session.value_report())?,
            Format::Csv => render::write_scored_csv(&mut out, &session.scored())?,
        },
        Commands::Redundancy => {
            let groups = session.redundancy();
            let recommendations = session.recommendations();
            match args.format {
                Format::Text => {
                    let text = render::redundancy_text(&groups, &recommendations, session.selected_department());
                    out.write_all(text.as_bytes())?
                }
                Format::Json => render::write_json(
                    &mut out,
                    &serde_json::json!({
                        "groups": groups.as_slice(),
                        "recommendations": recommendations.as_slice(),
                    }),
                )?,
                Format::Csv => render::write_redundancy_csv(&mut out, &groups)?,
            }
        }
    }

    out.flush()?;
    Ok(())
}
