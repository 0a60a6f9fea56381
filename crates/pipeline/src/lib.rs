//! Pre-filtering and rate-limited scanning of recruitment candidates.
//!
//! This crate provides:
//! - Filter trait and the exclusion pre-filter
//! - FilterPipeline for composing filters
//! - RateBudget / RateLimiter for pacing API calls
//! - Scanner, the loop that checks each candidate and grows the
//!   exclusion store
//!
//! ## Architecture
//! A scan processes candidates in stages:
//! 1. The exclusion store is loaded
//! 2. Filters remove nations already known to refuse (when caching is on)
//! 3. Each remaining nation is checked, one permit at a time
//! 4. Refusals are appended to the store
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FailurePolicy, RateBudget, Scanner};
//! use store::ExclusionStore;
//!
//! let scanner = Scanner::new(client, ExclusionStore::new("exclusions.txt"), RateBudget::per_window(30)?)
//!     .with_cache(true)
//!     .with_failure_policy(FailurePolicy::Exclude);
//!
//! let report = scanner.scan(roster.nations).await?;
//! println!("{} eligible", report.eligible.len());
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod rate;
pub mod scanner;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use rate::{RateBudget, RateError, RateLimiter};
pub use scanner::{CheckOutcome, FailurePolicy, ScanReport, Scanner};
