//! Adapter implementations of the notification repository port.

pub mod memory;
pub mod postgres;
