//! Task lifecycle management for the Brinx exchange.
//!
//! This module implements the task state machine at the centre of the
//! exchange: posting a task with a deadline and reward, claiming it,
//! completing it with an optional deliverable, and confirming the reward.
//! Acceptance is persisted as a compare-and-set so that two concurrent
//! claims on the same open task resolve with exactly one winner. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
