//! paleo-query CLI
//!
//! Find paleoclimate datasets in a LinkedEarth GraphDB repository from a
//! natural language request, or from explicit parameters.

use clap::{Parser, Subcommand};
use paleo_query::llm::{ProviderKind, ProviderRegistry};
use paleo_query::output::{save_report, write_plan, write_summary};
use paleo_query::schema::periods::PERIODS;
use paleo_query::store::GraphDbStore;
use paleo_query::telemetry::init_tracing;
use paleo_query::{ExtractedQuery, OverlapMode, PaleoError, PaleoQuery, QueryReport, Resolution, Settings, SettingsOverrides};
use std::io::Write;

/// Natural language search over LinkedEarth paleoclimate datasets
#[derive(Parser)]
#[command(name = "paleo-query")]
#[command(about = "Translate paleoclimate data requests into SPARQL and run them against GraphDB", long_about = None)]
#[command(version)]
struct Cli {
    /// GraphDB endpoint URL (overrides PALEO_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// GraphDB repository name (overrides PALEO_REPOSITORY)
    #[arg(long, global = true)]
    repository: Option<String>,

    /// Directory for saved results (overrides PALEO_OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<String>,

    /// Save results as JSON in the output directory
    #[arg(long, global = true)]
    save_json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Timeout for each provider call and the store query, in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask in natural language
    Ask {
        /// Request, e.g. "coral d18O records covering the Holocene"
        question: String,

        /// Provider to try first: ollama, openai, claude
        #[arg(long)]
        provider: Option<String>,

        /// Model for that provider
        #[arg(long)]
        model: Option<String>,

        /// API key for that provider
        #[arg(long)]
        api_key: Option<String>,

        /// Show extracted parameters and SPARQL without querying the store
        #[arg(long)]
        plan: bool,
    },

    /// Query with explicit parameters (no language model)
    Query {
        /// Archive type, e.g. Coral, GlacierIce
        #[arg(long)]
        archive: Option<String>,

        /// Variables (any of), e.g. d18O Sr_Ca
        #[arg(long, num_args = 1..)]
        variables: Vec<String>,

        /// Interpretations (any of), e.g. temperature
        #[arg(long, num_args = 1..)]
        interpretations: Vec<String>,

        /// subannual, annual, decadal, centennial, millennial
        #[arg(long)]
        resolution: Option<Resolution>,

        /// Named period, e.g. Holocene, LGM
        #[arg(long)]
        time_period: Option<String>,

        /// partial, containing, contained
        #[arg(long, default_value = "partial")]
        time_overlap: OverlapMode,

        /// Region, e.g. "North Atlantic"
        #[arg(long)]
        location: Option<String>,

        /// Show the SPARQL without querying the store
        #[arg(long)]
        plan: bool,
    },

    /// Show which language model providers and the store are usable
    Providers,

    /// List named time periods
    Periods,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let (provider, model, api_key) = match &cli.command {
        Commands::Ask {
            provider,
            model,
            api_key,
            ..
        } => (provider.clone(), model.clone(), api_key.clone()),
        _ => (None, None, None),
    };

    let settings = Settings::resolve(SettingsOverrides {
        provider,
        model,
        api_key,
        endpoint: cli.endpoint,
        repository: cli.repository,
        output_dir: cli.output_dir,
        save_json: cli.save_json.then_some(true),
        verbose: cli.verbose.then_some(true),
        json_logs: cli.json_logs.then_some(true),
        timeout_secs: cli.timeout_secs,
    })?;

    init_tracing(settings.verbose, settings.json_logs);
    tracing::debug!(settings = ?settings, "Resolved settings");

    let result = match cli.command {
        Commands::Ask { question, plan, .. } => cmd_ask(&settings, &question, plan).await,
        Commands::Query {
            archive,
            variables,
            interpretations,
            resolution,
            time_period,
            time_overlap,
            location,
            plan,
        } => {
            let mut params = ExtractedQuery::new()
                .with_variables(variables)
                .with_interpretations(interpretations)
                .with_time_overlap(time_overlap);
            params.archive_type = archive;
            params.resolution = resolution;
            params.time_period = time_period;
            params.location = location;
            cmd_query(&settings, params, plan).await
        }
        Commands::Providers => cmd_providers(&settings).await,
        Commands::Periods => cmd_periods(),
    };

    if let Err(e) = result {
        match e.downcast_ref::<PaleoError>() {
            Some(err) => anyhow::bail!("{} stage failed: {}", err.stage(), err),
            None => return Err(e),
        }
    }
    Ok(())
}

async fn cmd_ask(settings: &Settings, question: &str, plan: bool) -> anyhow::Result<()> {
    let pipeline = PaleoQuery::from_settings(settings);

    if plan {
        let extraction = pipeline.extract(question, None, None).await?;
        let compiled = pipeline.compile(&extraction.query)?;
        println!(
            "Provider: {} ({})",
            extraction.generation.provider, extraction.generation.model
        );
        let mut stdout = std::io::stdout();
        write_plan(&mut stdout, &serde_json::to_value(&extraction.query)?, compiled.text())?;
        return Ok(());
    }

    let report = pipeline.run(question, None, None).await?;
    finish(settings, &report)
}

async fn cmd_query(settings: &Settings, params: ExtractedQuery, plan: bool) -> anyhow::Result<()> {
    let pipeline = PaleoQuery::from_settings(settings);

    if plan {
        let compiled = pipeline.compile(&params)?;
        let mut stdout = std::io::stdout();
        write_plan(&mut stdout, &serde_json::to_value(&params)?, compiled.text())?;
        return Ok(());
    }

    let report = pipeline.run_parameters(params).await?;
    finish(settings, &report)
}

fn finish(settings: &Settings, report: &QueryReport) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write_summary(&mut stdout, report)?;

    if settings.save_json {
        let path = save_report(&settings.output_dir, report)?;
        writeln!(stdout, "Saved to {}", path.display())?;
    }
    Ok(())
}

async fn cmd_providers(settings: &Settings) -> anyhow::Result<()> {
    let registry = ProviderRegistry::new(settings.priority.clone());
    println!("Providers (fallback order):");
    for (kind, available) in registry.availability().await {
        let marker = if available { "✓" } else { "✗" };
        let default = if Some(kind) == settings.provider {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {} {:<8} model: {:<24} via {}{}",
            marker,
            kind.as_str(),
            kind.default_model(),
            kind.env_var(),
            default
        );
    }

    if settings.provider.is_none() {
        let first = settings.priority.first().copied().unwrap_or(ProviderKind::Ollama);
        println!("\nNo provider requested; {} is tried first.", first);
    }

    let store = GraphDbStore::new(&settings.endpoint, &settings.repository);
    let status = match store.ping().await {
        Ok(true) => "✓ reachable".to_string(),
        Ok(false) => "✓ reachable (repository is empty)".to_string(),
        Err(e) => format!("✗ {}", e),
    };
    println!("\nStore: {} ({})", store.query_url(), status);
    Ok(())
}

fn cmd_periods() -> anyhow::Result<()> {
    println!("{:<22} {:>14} {:>14}", "Period", "Start (yr BP)", "End (yr BP)");
    for period in PERIODS {
        println!("{:<22} {:>14} {:>14}", period.name, period.start_bp, period.end_bp);
    }
    Ok(())
}
