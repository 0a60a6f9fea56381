//! # Recruitment Orchestrator
//!
//! Coordinates one recruitment run:
//! 1. Fetch the region roster
//! 2. Scan it (pre-filter, rate-limited checks, store update)
//! 3. Resolve the telegram sender
//! 4. Send one telegram per eligible nation in a single batch
//!
//! A roster failure ends the run before any check is made. Failed checks
//! are reported but never stop the run. Dispatch errors are returned to
//! the caller after the store has already been updated.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{Instrument, info, info_span, warn};

use pipeline::{ScanReport, Scanner};
use sources::{EligibilityChecker, RosterSource, resolve_roster};

use crate::dispatcher::{Dispatcher, TelegramSource, build_telegrams};

/// What happened to the telegram batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStatus {
    /// The batch was accepted by the gateway
    Sent { telegrams: usize, status: u16 },
    /// No eligible nations, nothing was sent
    Skipped,
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub region: String,
    pub roster_size: usize,
    pub report: ScanReport,
    pub dispatch: DispatchStatus,
}

/// Main orchestrator wiring the roster source, scanner and dispatcher.
pub struct RecruitmentOrchestrator<R, C, D> {
    roster: R,
    scanner: Scanner<C>,
    dispatcher: D,
    telegram: TelegramSource,
}

impl<R, C, D> RecruitmentOrchestrator<R, C, D>
where
    R: RosterSource,
    C: EligibilityChecker,
    D: Dispatcher,
{
    pub fn new(roster: R, scanner: Scanner<C>, dispatcher: D, telegram: TelegramSource) -> Self {
        Self {
            roster,
            scanner,
            dispatcher,
            telegram,
        }
    }

    /// Run recruitment for `region`.
    ///
    /// # Returns
    /// * `Ok(RunSummary)` - The scan finished and the batch was sent or skipped
    /// * `Err` - The roster or store could not be read, or dispatch failed
    pub async fn run(&self, region: &str) -> Result<RunSummary> {
        self.run_inner(region)
            .instrument(info_span!("recruit", region = %region))
            .await
    }

    async fn run_inner(&self, region: &str) -> Result<RunSummary> {
        let start_time = Instant::now();

        let roster = resolve_roster(&self.roster, region).await?;
        let roster_size = roster.len();

        let report = self.scanner.scan(roster.nations).await?;
        if !report.cache_updated {
            warn!("Exclusion store was not updated, the next run will recheck these nations");
        }
        if !report.failed.is_empty() {
            let retry: Vec<String> = report.retry_list().iter().map(|n| n.to_string()).collect();
            warn!(
                "{} nations could not be checked: {}",
                retry.len(),
                retry.join(", ")
            );
        }

        let dispatch = self.dispatch(&report).await?;

        info!(
            "Recruitment run for {} finished in {:.2?}",
            roster.region,
            start_time.elapsed()
        );

        Ok(RunSummary {
            region: roster.region,
            roster_size,
            report,
            dispatch,
        })
    }

    async fn dispatch(&self, report: &ScanReport) -> Result<DispatchStatus> {
        if report.eligible.is_empty() {
            info!("No eligible nations, skipping telegram dispatch");
            return Ok(DispatchStatus::Skipped);
        }

        let sender = self
            .dispatcher
            .resolve_sender(&self.telegram)
            .await
            .context("Failed to resolve telegram sender")?;
        let telegrams = build_telegrams(&sender, &report.eligible);

        info!("Sending {} telegrams as {}", telegrams.len(), sender.author);
        let status = self
            .dispatcher
            .send(&telegrams)
            .await
            .context("Failed to send telegrams")?;
        info!("Telegram batch accepted with status {}", status);

        Ok(DispatchStatus::Sent {
            telegrams: telegrams.len(),
            status,
        })
    }
}
