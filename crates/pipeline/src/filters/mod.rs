//! Filter implementations for the candidate pipeline.

pub mod exclusion;

// Re-export for convenience
pub use exclusion::ExclusionFilter;
