use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use strata_core::{
    config::{seed_from_env_value, size_from_env_value},
    constants::{DEFAULT_PAGE_SIZE, DEFAULT_POPULATION_SIZE},
    filter::parse_select_value,
    CoreConfig, DashboardService, DateRange, FilterSpecification, PatientRepository, RiskTier,
    SortDirection, SortField,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "strata=info,strata_core=info";

mod render;

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Senior-care risk stratification dashboard")]
struct Cli {
    /// Seed for the synthetic population (overrides STRATA_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Number of patients to generate (overrides STRATA_POPULATION)
    #[arg(long, global = true)]
    population: Option<usize>,
    /// Rows per table page (overrides STRATA_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<usize>,
    /// Load patients from a JSON fixture instead of generating them
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Date range window in days (30, 60 or 90)
    #[arg(long, default_value = "30")]
    range: DateRange,
    /// Facility name, or "all"
    #[arg(long)]
    facility: Option<String>,
    /// State code, or "all"
    #[arg(long)]
    state: Option<String>,
    /// Provider name, or "all"
    #[arg(long)]
    provider: Option<String>,
    /// Risk tier (1-4)
    #[arg(long)]
    tier: Option<RiskTier>,
    /// Cognitive impairment flag (true/false)
    #[arg(long, action = ArgAction::Set)]
    dementia: Option<bool>,
    /// Dual eligibility flag (true/false)
    #[arg(long, action = ArgAction::Set)]
    dual: Option<bool>,
}

impl FilterArgs {
    fn to_filter(&self) -> FilterSpecification {
        let select =
            |value: &Option<String>| value.as_deref().and_then(parse_select_value);
        FilterSpecification::default()
            .with_date_range(self.range)
            .with_facility(select(&self.facility))
            .with_state(select(&self.state))
            .with_provider(select(&self.provider))
            .with_risk_tier(self.tier)
            .with_cognitive_impairment(self.dementia)
            .with_dual_status(self.dual)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show key metrics and the risk tier breakdown
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one page of the patient table
    Patients {
        #[command(flatten)]
        filters: FilterArgs,
        /// Sort column: name, age, hcc-score, risk-tier or last-ed-visit
        #[arg(long, default_value = "risk-tier")]
        sort: SortField,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Page number (clamped to the available pages)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how many patients carry each care gap
    CareGaps {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List facilities, states and providers
    Catalog,
    /// Print the full dashboard snapshot as JSON
    Export {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Resolves configuration once: command-line flags first, then `env`, then defaults.
fn resolve_config(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<CoreConfig> {
    let seed = match cli.seed {
        Some(seed) => Some(seed),
        None => seed_from_env_value(env("STRATA_SEED"))?,
    };
    let population = match cli.population {
        Some(population) => population,
        None => size_from_env_value(
            "STRATA_POPULATION",
            env("STRATA_POPULATION"),
            DEFAULT_POPULATION_SIZE,
        )?,
    };
    let page_size = match cli.page_size {
        Some(page_size) => page_size,
        None => size_from_env_value("STRATA_PAGE_SIZE", env("STRATA_PAGE_SIZE"), DEFAULT_PAGE_SIZE)?,
    };

    Ok(CoreConfig::new(population, page_size, seed)?)
}

fn load_repository(cli: &Cli, cfg: &CoreConfig) -> anyhow::Result<PatientRepository> {
    match &cli.fixture {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read fixture {}", path.display()))?;
            Ok(PatientRepository::from_json(&json)?)
        }
        None => Ok(PatientRepository::from_config(cfg, chrono::Utc::now())),
    }
}

/// `RUST_LOG` when it is set and valid, otherwise info for the strata crates.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use 'strata --help' for commands");
        return Ok(());
    };

    if let Commands::Catalog = command {
        print!("{}", render::catalog());
        return Ok(());
    }

    let cfg = Arc::new(resolve_config(&cli, |name| std::env::var(name).ok())?);
    let repository = Arc::new(load_repository(&cli, &cfg)?);
    if let Some(seed) = repository.seed() {
        tracing::info!("-- Population of {} generated from seed {}", repository.len(), seed);
    }
    let service = DashboardService::new(cfg, repository);

    match command {
        Commands::Summary { filters, json } => {
            let snapshot = service.snapshot(&filters.to_filter());
            if *json {
                let value = serde_json::json!({
                    "filters": snapshot.filters,
                    "metrics": snapshot.metrics,
                    "breakdown": snapshot.breakdown,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", render::summary(&snapshot));
            }
        }
        Commands::Patients {
            filters,
            sort,
            desc,
            page,
            json,
        } => {
            let mut table = service.table_state();
            table.sort_field = *sort;
            table.sort_direction = if *desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            table.go_to_page(*page);
            let rendered = service.table_page(&filters.to_filter(), &mut table);
            if *json {
                println!("{}", serde_json::to_string_pretty(&rendered)?);
            } else {
                print!("{}", render::patient_table(&rendered, &table));
            }
        }
        Commands::CareGaps { filters, json } => {
            let rows = service.care_gaps(&filters.to_filter());
            if *json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render::care_gaps(&rows));
            }
        }
        Commands::Export { filters } => {
            let snapshot = service.snapshot(&filters.to_filter());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Catalog => {}
    }

    Ok(())
}
