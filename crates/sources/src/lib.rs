//! # Sources Crate
//!
//! Where candidates come from and how each one is judged.
//!
//! ## Components
//!
//! ### RosterSource
//! Lists every nation in a region. The roster is the candidate set for a
//! run, before the exclusion pre-filter.
//!
//! ### EligibilityChecker
//! Answers, for a single nation, whether it currently accepts recruitment
//! telegrams. Calls are paced by the scanner, never by the checker.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{resolve_roster, EligibilityChecker};
//!
//! let roster = resolve_roster(&client, "The Europeian Republic").await?;
//! for nation in &roster.nations {
//!     let ok = client.is_eligible(nation).await?;
//! }
//! ```

pub mod types;
pub mod traits;
pub mod roster;

// Re-export commonly used types
pub use roster::resolve_roster;
pub use traits::{EligibilityChecker, RosterSource};
pub use types::{RecruitmentStatus, Roster};
