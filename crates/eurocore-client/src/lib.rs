//! Eurocore client for queueing telegrams.
//!
//! Eurocore is the messaging gateway that actually delivers telegrams.
//! This crate handles:
//! - Logging in for a bearer token
//! - Looking up stored telegram templates
//! - Submitting a batch of telegrams in one request

pub mod error;
pub mod models;
pub mod client;

pub use client::EurocoreClient;
pub use error::EurocoreError;
pub use models::{NewTelegram, TelegramType, Template};
