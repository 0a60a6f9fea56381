//! Recruitment crate for m0use.
//!
//! This crate contains the orchestrator that runs a full recruitment pass
//! and the dispatcher that hands eligible nations to Eurocore.

pub mod dispatcher;
pub mod orchestrator;

pub use dispatcher::{Dispatcher, EurocoreDispatcher, TelegramSender, TelegramSource, build_telegrams};
pub use orchestrator::{DispatchStatus, RecruitmentOrchestrator, RunSummary};
