//! Brinx core: campus task-exchange lifecycle and notification engine.
//!
//! This crate provides the stateful core of the Brinx task exchange: posting
//! tasks with a deadline and reward, accepting and completing them, awarding
//! points for on-time completion, and fanning lifecycle events out into
//! per-user notification records.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`directory`]: User directory consultation and points accounting
//! - [`task`]: Task records, the lifecycle state machine, and orchestration
//! - [`notification`]: Notification fanout and the per-user inbox

pub mod directory;
pub mod notification;
pub mod task;
