mod config;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use config::{Config, DEFAULT_CONFIG_FILE, Overrides};
use eurocore_client::EurocoreClient;
use ns_client::NsClient;
use pipeline::{FailurePolicy, Scanner};
use recruiter::{DispatchStatus, EurocoreDispatcher, RecruitmentOrchestrator, RunSummary};
use std::path::PathBuf;
use std::sync::Arc;
use store::ExclusionStore;
use tracing::info_span;
use tracing_subscriber::EnvFilter;

/// m0use - NationStates recruitment telegrams
#[derive(Parser)]
#[command(name = "m0use")]
#[command(about = "Finds nations in a region that accept recruitment telegrams and queues telegrams to them", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Region to recruit from
    #[arg(long)]
    region: Option<String>,

    /// Requests per 30 second window (1-45)
    #[arg(long, allow_negative_numbers = true)]
    request_rate: Option<i64>,

    /// Skip nations already in the exclusion store
    #[arg(long)]
    cache: Option<bool>,

    /// debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            region: self.region.clone(),
            request_rate: self.request_rate,
            cache: self.cache,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    config.apply_overrides(cli.overrides());
    config.validate().context("Invalid configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .init();

    let summary = run(&config).await?;
    print_summary(&summary, config.failure_policy());

    Ok(())
}

/// Wire the clients together and run one recruitment pass
async fn run(config: &Config) -> Result<RunSummary> {
    let nationstates = Arc::new(
        NsClient::new(&config.user)
            .context("Failed to build NationStates client")?
            .recruiting_from(&config.region),
    );

    let scanner = Scanner::new(
        nationstates.clone(),
        ExclusionStore::new(&config.cache.path),
        config.rate_budget()?,
    )
    .with_cache(config.cache.active)
    .with_failure_policy(config.failure_policy())
    .with_span(info_span!("scan", region = %config.region));

    let eurocore = EurocoreClient::new(
        &config.eurocore.url,
        &config.eurocore.username,
        &config.eurocore.password,
    )
    .context("Failed to build Eurocore client")?;

    let orchestrator = RecruitmentOrchestrator::new(
        nationstates,
        scanner,
        EurocoreDispatcher::new(eurocore),
        config.telegram_source()?,
    );

    orchestrator.run(&config.region).await
}

/// Print a short human readable report of the run
fn print_summary(summary: &RunSummary, policy: FailurePolicy) {
    let report = &summary.report;

    println!(
        "{}",
        format!("Recruitment run for {}", summary.region).bold().blue()
    );
    println!("{}Nations in region: {}", "• ".green(), summary.roster_size);
    println!("{}Skipped from cache: {}", "• ".green(), report.prefiltered);
    println!("{}Checked: {}", "• ".green(), report.checked());
    println!(
        "{}Eligible: {}",
        "• ".green(),
        report.eligible.len().to_string().green()
    );

    if !report.failed.is_empty() {
        println!(
            "{}Failed checks, {}: {}",
            "• ".yellow(),
            failure_fate(policy),
            report.failed.len().to_string().yellow()
        );
        for (nation, reason) in &report.failed {
            println!("  - {} ({})", nation, reason);
        }
    }

    if report.cache_updated {
        println!("{}Added to exclusion store: {}", "• ".cyan(), report.appended);
    } else {
        println!("{}{}", "• ".yellow(), "Exclusion store not updated".yellow());
    }

    match &summary.dispatch {
        DispatchStatus::Sent { telegrams, status } => println!(
            "{} Queued {} telegrams (status {})",
            "✓".green(),
            telegrams,
            status
        ),
        DispatchStatus::Skipped => println!("{} No telegrams to send", "•".yellow()),
    }
}

/// What happens to nations whose check failed, as shown in the summary
fn failure_fate(policy: FailurePolicy) -> &'static str {
    match policy {
        FailurePolicy::Exclude => "stored as excluded",
        FailurePolicy::Retry => "retried next run",
    }
}
