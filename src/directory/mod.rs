//! User directory consultation for the task exchange.
//!
//! The directory holds user identity and accumulated points. The task core
//! consults it but does not own it: profiles are created by the (external)
//! authentication surface, while this module exposes lookup, fanout-recipient
//! enumeration, the leaderboard projection, and the single atomic points
//! increment used on on-time completion. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
