//! Seams to the outside world.
//!
//! The scanner never talks HTTP directly. It sees a roster source that
//! lists a region's nations and a checker that answers one nation at a
//! time, so both can be swapped for fakes in tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use store::NationName;

/// Resolves the full candidate list for a region.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    /// List every nation currently in `region`.
    ///
    /// # Arguments
    /// * `region` - Normalized region name
    ///
    /// # Returns
    /// * `Ok(Vec<NationName>)` - Nations in roster order
    /// * `Err` - If the roster could not be resolved
    async fn nations(&self, region: &str) -> Result<Vec<NationName>>;
}

/// Answers whether a single nation currently accepts recruitment telegrams.
///
/// Failures are expected to be transient and are handled per nation by
/// the caller.
#[async_trait]
pub trait EligibilityChecker: Send + Sync {
    async fn is_eligible(&self, nation: &NationName) -> Result<bool>;
}

#[async_trait]
impl<T: EligibilityChecker + ?Sized> EligibilityChecker for Arc<T> {
    async fn is_eligible(&self, nation: &NationName) -> Result<bool> {
        (**self).is_eligible(nation).await
    }
}

#[async_trait]
impl<T: RosterSource + ?Sized> RosterSource for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn nations(&self, region: &str) -> Result<Vec<NationName>> {
        (**self).nations(region).await
    }
}
