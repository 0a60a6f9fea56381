//! NationStates API client.
//!
//! This crate provides the two read-only calls the recruiter needs:
//! - the roster of a region (`NATIONS`)
//! - the recruitment flag of a nation (`TGCANRECRUIT`), optionally
//!   evaluated relative to the recruiting region
//!
//! `NsClient` implements both `sources::RosterSource` and
//! `sources::EligibilityChecker`. It does not pace itself; the scanner
//! owns the rate limit.

pub mod error;
pub mod xml;
pub mod client;

pub use client::{DEFAULT_BASE_URL, NsClient, REQUEST_TIMEOUT};
pub use error::NsClientError;
