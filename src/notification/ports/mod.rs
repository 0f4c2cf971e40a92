//! Port contracts for notification persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the fanout and
//! inbox services.

pub mod repository;

pub use repository::{
    NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult,
};
