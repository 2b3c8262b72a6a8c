//! UniXange Application Orchestration Layer
//!
//! This crate contains the access-resolution machinery (actor init guard,
//! profile resolver, gate orchestrator) and the marketplace use cases.

pub mod session;
pub mod timeout;
pub mod usecases;

pub use session::{AccessOrchestrator, ActorHandle, ActorInitGuard, GuardSnapshot, ProfileResolver};
pub use timeout::with_timeout;
