//! Notification fanout and inbox for the Brinx exchange.
//!
//! Task lifecycle events are fanned out into per-user notification records:
//! posting a task broadcasts to every other user, while acceptance,
//! completion, and reward signals address the single counterpart. Receivers
//! read their inbox newest first and may only ever flip the `read` flag on
//! their own records. The module follows hexagonal architecture:
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
