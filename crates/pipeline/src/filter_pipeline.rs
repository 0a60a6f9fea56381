//! Ordered chain of pre-filters run before the scan.

use crate::traits::Filter;
use anyhow::Result;
use store::{ExclusionSet, NationName};
use tracing::debug;

/// Pre-filters applied one after another to the roster.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(ExclusionFilter);
///
/// let filtered = pipeline.apply(candidates, &exclusions)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append `filter` to the end of the chain.
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Run every filter in order. With no filters the roster passes through.
    pub fn apply(
        &self,
        candidates: Vec<NationName>,
        exclusions: &ExclusionSet,
    ) -> Result<Vec<NationName>> {
        self.filters.iter().try_fold(candidates, |remaining, filter| {
            let before = remaining.len();
            let kept = filter.apply(remaining, exclusions)?;
            debug!("{} kept {}/{} nations", filter.name(), kept.len(), before);
            Ok(kept)
        })
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
