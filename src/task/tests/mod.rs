//! Unit tests for the task module.
//!
//! Tests are organised by concern: domain guard behaviour, status machine
//! transitions, and service orchestration over the in-memory adapters.

mod state_transition_tests;
