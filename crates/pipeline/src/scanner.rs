//! # Rate-Limited Scanner
//!
//! Walks the candidate list one nation at a time, asks the eligibility
//! checker about each, and records what it learned in the exclusion store.
//!
//! 1. Load the exclusion set (created empty on first run)
//! 2. Pre-filter candidates against it when caching is on
//! 3. For each candidate: wait for a permit, check, classify
//! 4. Append the nations to exclude, in encounter order
//! 5. Return the report
//!
//! A failed check never aborts the scan. Whether a failure is remembered
//! as an exclusion depends on the [`FailurePolicy`].
//!
//! The store is written once, after the loop. A run killed mid-scan
//! leaves the store exactly as it was.

use std::collections::HashSet;

use anyhow::{Context, Result};
use tracing::{Instrument, Span, debug, info, info_span, warn};

use crate::filter_pipeline::FilterPipeline;
use crate::filters::ExclusionFilter;
use crate::rate::RateBudget;
use sources::EligibilityChecker;
use store::{ExclusionSet, ExclusionStore, NationName};

/// Result of checking a single nation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Eligible,
    NotEligible,
    /// The check could not be completed; the reason is kept for reporting
    CheckFailed(String),
}

/// What to do with nations whose check failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Store them alongside confirmed refusals.
    #[default]
    Exclude,
    /// Leave them out of the store so the next run checks them again.
    Retry,
}

/// Everything a scan learned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Nations accepting recruitment telegrams, in candidate order
    pub eligible: Vec<NationName>,
    /// Nations confirmed to refuse them
    pub not_eligible: Vec<NationName>,
    /// Nations whose check failed, with the reason
    pub failed: Vec<(NationName, String)>,
    /// Candidates removed by the exclusion pre-filter
    pub prefiltered: usize,
    /// Lines appended to the exclusion store
    pub appended: usize,
    /// False if the append step failed
    pub cache_updated: bool,
}

impl ScanReport {
    /// Number of checks attempted
    pub fn checked(&self) -> usize {
        self.eligible.len() + self.not_eligible.len() + self.failed.len()
    }

    /// Nations to check again on a later run
    pub fn retry_list(&self) -> Vec<NationName> {
        self.failed.iter().map(|(nation, _)| nation.clone()).collect()
    }
}

/// The rate-limited scanner.
///
/// ## Usage
/// ```ignore
/// let scanner = Scanner::new(client, ExclusionStore::new("exclusions.txt"), budget)
///     .with_cache(true)
///     .with_span(info_span!("scan", region = %region));
///
/// let report = scanner.scan(roster.nations).await?;
/// ```
pub struct Scanner<C> {
    checker: C,
    store: ExclusionStore,
    budget: RateBudget,
    filters: FilterPipeline,
    use_cache: bool,
    failure_policy: FailurePolicy,
    span: Span,
}

impl<C: EligibilityChecker> Scanner<C> {
    /// Create a scanner with caching off and the default failure policy.
    pub fn new(checker: C, store: ExclusionStore, budget: RateBudget) -> Self {
        Self {
            checker,
            store,
            budget,
            filters: FilterPipeline::new(),
            use_cache: false,
            failure_policy: FailurePolicy::default(),
            span: info_span!("scan"),
        }
    }

    /// Skip candidates already in the exclusion store.
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self.filters = if use_cache {
            FilterPipeline::new().add_filter(ExclusionFilter)
        } else {
            FilterPipeline::new()
        };
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Span every event of the scan is recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    /// Run a scan over `candidates`.
    ///
    /// # Returns
    /// * `Ok(ScanReport)` - Even if some or all checks failed
    /// * `Err` - Only if the exclusion store could not be loaded
    pub async fn scan(&self, candidates: Vec<NationName>) -> Result<ScanReport> {
        self.run(candidates).instrument(self.span.clone()).await
    }

    async fn run(&self, candidates: Vec<NationName>) -> Result<ScanReport> {
        let exclusions = self
            .store
            .load()
            .context("Failed to load exclusion store")?;
        if self.use_cache {
            info!("Skipping up to {} cached nations", exclusions.len());
        }

        let total = candidates.len();
        let filtered = self.prefilter(candidates, &exclusions)?;
        info!("Nations to check after exclusions: {}", filtered.len());

        let mut report = ScanReport {
            prefiltered: total - filtered.len(),
            ..ScanReport::default()
        };

        if !filtered.is_empty() {
            info!(
                "Checking recruitment permissions for each nation at {} requests per 30s, this may take a while",
                self.budget.requests()
            );
        }

        let mut limiter = self.budget.limiter();
        for nation in &filtered {
            limiter.acquire().await;
            match self.check(nation).await {
                CheckOutcome::Eligible => report.eligible.push(nation.clone()),
                CheckOutcome::NotEligible => report.not_eligible.push(nation.clone()),
                CheckOutcome::CheckFailed(reason) => report.failed.push((nation.clone(), reason)),
            }
        }

        info!(
            "{}/{} checked nations have recruitment telegrams enabled ({} failed)",
            report.eligible.len(),
            report.checked(),
            report.failed.len()
        );

        let to_exclude = self.nations_to_exclude(&filtered, &report);
        match self.store.append(&to_exclude) {
            Ok(appended) => {
                report.appended = appended;
                report.cache_updated = true;
            }
            Err(e) => warn!("Unable to update exclusion store: {:#}", anyhow::Error::from(e)),
        }

        Ok(report)
    }

    fn prefilter(
        &self,
        candidates: Vec<NationName>,
        exclusions: &ExclusionSet,
    ) -> Result<Vec<NationName>> {
        self.filters
            .apply(candidates, exclusions)
            .context("Failed to apply exclusion pre-filter")
    }

    async fn check(&self, nation: &NationName) -> CheckOutcome {
        debug!("Checking nation: {}", nation);
        match self.checker.is_eligible(nation).await {
            Ok(true) => CheckOutcome::Eligible,
            Ok(false) => CheckOutcome::NotEligible,
            Err(e) => {
                warn!("Unable to retrieve recruitment status for {}: {:#}", nation, e);
                CheckOutcome::CheckFailed(format!("{:#}", e))
            }
        }
    }

    /// Nations to append to the store, in encounter order.
    fn nations_to_exclude(&self, filtered: &[NationName], report: &ScanReport) -> Vec<NationName> {
        match self.failure_policy {
            FailurePolicy::Retry => report.not_eligible.clone(),
            FailurePolicy::Exclude => {
                let eligible: HashSet<&NationName> = report.eligible.iter().collect();
                filtered
                    .iter()
                    .filter(|nation| !eligible.contains(nation))
                    .cloned()
                    .collect()
            }
        }
    }
}
