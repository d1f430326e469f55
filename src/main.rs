use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fra_dss::access::{AccessGuard, BulkEntry, Caller, GuardedRecommendation, LookupStatus};
use fra_dss::catalog::CatalogStore;
use fra_dss::config::{Config, ConfigOverrides};
use fra_dss::engine::RecommendationEngine;
use fra_dss::output::csv::{bulk_to_csv, interventions_to_csv, records_to_csv, schemes_to_csv};
use fra_dss::output::json::render_json;
use fra_dss::output::table::{
    render_bulk_table, render_catalog_tables, render_records_table, render_recommendation,
    render_summary_table,
};
use fra_dss::records::{ClaimRecord, ClaimStatus, ClaimType, RecordFilter};
use fra_dss::regions::RegionProfile;
use fra_dss::server::run_server;
use fra_dss::summary::ClaimSummary;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "fra-dss",
    about = "Scheme eligibility and intervention recommendations for forest-rights claims"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    records: Option<String>,
    #[arg(long = "log-level")]
    log_level: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(long, default_value = "admin")]
    role: String,
    /// Record id owned by a beneficiary caller.
    #[arg(long)]
    owner: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct FilterArgs {
    #[arg(long)]
    state: Option<String>,
    #[arg(long = "claim-type")]
    claim_type: Option<String>,
    #[arg(long)]
    status: Option<String>,
}

impl From<FilterArgs> for RecordFilter {
    fn from(value: FilterArgs) -> Self {
        Self {
            state: value.state,
            claim_type: value
                .claim_type
                .map(|raw| raw.parse::<ClaimType>().unwrap_or(ClaimType::Other(raw))),
            claim_status: value
                .status
                .map(|raw| raw.parse::<ClaimStatus>().unwrap_or(ClaimStatus::Other(raw))),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Recommend {
        #[arg(long)]
        record: Option<String>,
    },
    Bulk {
        #[command(flatten)]
        filter: FilterArgs,
    },
    Records {
        #[command(flatten)]
        filter: FilterArgs,
    },
    Summary,
    Catalog,
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        records_path: cli.records.clone(),
        log_level: cli.log_level.clone(),
    });
    init_tracing(&config.logging.level);

    if let Commands::Config { init, show } = &cli.command {
        return handle_config_command(*init, *show, &config, &config_path);
    }

    let store = CatalogStore::load(&config.catalog)?;
    let engine = RecommendationEngine::standard(RegionProfile::from_config(&config.regions));

    if let Commands::Serve { host, port } = &cli.command {
        let host = host.clone().unwrap_or_else(|| config.server.host.clone());
        let port = port.unwrap_or(config.server.port);
        let bind = format!("{host}:{port}");
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, store, engine, addr).await;
    }

    let guard = AccessGuard::new(&store, &engine);
    let caller = Caller {
        role: cli.role.clone(),
        owner_record_id: cli.owner.clone(),
    };

    match &cli.command {
        Commands::Recommend { record } => {
            let outcome = guard.recommend(&caller, record.as_deref())?;
            print_recommendation(&outcome, cli.output)?;
        }
        Commands::Bulk { filter } => {
            let entries = guard.recommend_bulk(&caller, &filter.clone().into())?;
            let failed = entries.iter().filter(|e| e.error.is_some()).count();
            if failed > 0 {
                warn!(failed, total = entries.len(), "some records could not be evaluated");
            }
            print_bulk(&entries, cli.output)?;
        }
        Commands::Records { filter } => {
            let view = guard.view(&caller)?;
            if view.status() == LookupStatus::NoRecordFound {
                warn!("no claim record found for this caller");
            }
            let records = RecordFilter::from(filter.clone()).apply(view.records());
            print_records(&records, cli.output)?;
        }
        Commands::Summary => {
            let summary = guard.summary(&caller)?;
            print_summary(&summary, cli.output)?;
        }
        Commands::Catalog => print_catalog(&store, cli.output)?,
        Commands::Serve { .. } | Commands::Config { .. } => {
            unreachable!("handled before dispatch")
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_config_command(init: bool, show: bool, config: &Config, config_path: &Path) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        info!(path = %config_path.display(), "wrote config template");
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn print_recommendation(outcome: &GuardedRecommendation, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_recommendation(outcome)),
        OutputFormat::Json => println!("{}", render_json(outcome)?),
        OutputFormat::Csv => {
            print!("{}", schemes_to_csv(&outcome.result.schemes)?);
            println!();
            print!("{}", interventions_to_csv(&outcome.result.interventions)?);
        }
    }
    Ok(())
}

fn print_bulk(entries: &[BulkEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_bulk_table(entries)),
        OutputFormat::Json => println!("{}", render_json(entries)?),
        OutputFormat::Csv => print!("{}", bulk_to_csv(entries)?),
    }
    Ok(())
}

fn print_records(records: &[&ClaimRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_records_table(records)),
        OutputFormat::Json => println!("{}", render_json(records)?),
        OutputFormat::Csv => print!("{}", records_to_csv(records)?),
    }
    Ok(())
}

fn print_summary(summary: &ClaimSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_summary_table(summary)),
        OutputFormat::Json => println!("{}", render_json(summary)?),
        OutputFormat::Csv => {
            warn!("CSV output for summary not implemented, using JSON");
            println!("{}", render_json(summary)?);
        }
    }
    Ok(())
}

fn print_catalog(store: &CatalogStore, format: OutputFormat) -> Result<()> {
    let schemes = store.schemes().unwrap_or_default();
    let interventions = store.interventions().unwrap_or_default();
    if store.schemes().is_none() || store.interventions().is_none() {
        warn!("one or more catalogs are not configured");
    }
    match format {
        OutputFormat::Table => {
            println!("{}", render_catalog_tables(schemes, interventions));
            println!("Fingerprint: {}", store.fingerprint());
        }
        OutputFormat::Json | OutputFormat::Csv => {
            if matches!(format, OutputFormat::Csv) {
                warn!("CSV output for catalog not implemented, using JSON");
            }
            let doc = json!({
                "fingerprint": store.fingerprint(),
                "schemes": schemes,
                "interventions": interventions,
            });
            println!("{}", render_json(&doc)?);
        }
    }
    Ok(())
}
