//! In-memory directory adapter for tests and embedded use.

mod directory;

pub use directory::InMemoryUserDirectory;
