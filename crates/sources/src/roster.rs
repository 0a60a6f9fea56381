//! Roster resolution.

use crate::traits::RosterSource;
use crate::types::Roster;
use anyhow::{Context, Result};
use store::normalize_name;
use tracing::info;

/// Resolve a region's roster through `source`.
///
/// The region name is normalized first. Any failure here is fatal to the
/// run since there is nothing to scan without a roster.
pub async fn resolve_roster(source: &dyn RosterSource, region: &str) -> Result<Roster> {
    let region = normalize_name(region);
    let nations = source
        .nations(&region)
        .await
        .with_context(|| format!("Failed to resolve roster for region {region} via {}", source.name()))?;

    info!("Total number of nations in {}: {}", region, nations.len());
    Ok(Roster::new(region, nations))
}
