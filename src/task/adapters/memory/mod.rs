//! In-memory task repository for tests and embedded use.

mod task;

pub use task::InMemoryTaskRepository;
