//! Filter to remove nations already known to reject recruitment.
//!
//! This is the cache pre-filter: only applied when caching is on.

use crate::traits::Filter;
use anyhow::Result;
use rayon::prelude::*;
use store::{ExclusionSet, NationName};

/// Rosters below this size are filtered on the calling thread.
const PARALLEL_THRESHOLD: usize = 4096;

/// Removes candidates present in the exclusion set.
///
/// ## Algorithm
/// HashSet lookups per candidate. Large rosters (feeder regions hold tens
/// of thousands of nations) are split across the rayon pool; rayon's
/// `collect` keeps the input order either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExclusionFilter;

impl Filter for ExclusionFilter {
    fn name(&self) -> &str {
        "ExclusionFilter"
    }

    fn apply(
        &self,
        candidates: Vec<NationName>,
        exclusions: &ExclusionSet,
    ) -> Result<Vec<NationName>> {
        if exclusions.is_empty() {
            return Ok(candidates);
        }

        let filtered = if candidates.len() < PARALLEL_THRESHOLD {
            candidates
                .into_iter()
                .filter(|nation| !exclusions.contains(nation))
                .collect()
        } else {
            candidates
                .into_par_iter()
                .filter(|nation| !exclusions.contains(nation))
                .collect()
        };
        Ok(filtered)
    }
}
