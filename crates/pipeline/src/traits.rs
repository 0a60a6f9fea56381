//! Core traits for the pre-filter pipeline.
//!
//! Filters run before any network call, so they decide which roster
//! entries are worth spending rate budget on.

use anyhow::Result;
use store::{ExclusionSet, NationName};

/// Core trait for filtering candidates.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared with the scanner task
/// - Filters take ownership of the Vec and return a filtered Vec
/// - Filters must keep the relative order of what they retain
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `exclusions` - Nations previously recorded as ineligible
    ///
    /// # Returns
    /// * `Ok(Vec<NationName>)` - The retained candidates, in input order
    /// * `Err` - If filtering fails
    fn apply(
        &self,
        candidates: Vec<NationName>,
        exclusions: &ExclusionSet,
    ) -> Result<Vec<NationName>>;
}
