//! Adapter implementations of the directory port.

pub mod memory;
pub mod postgres;
