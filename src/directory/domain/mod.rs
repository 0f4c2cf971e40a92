//! Domain model for user directory consultation.
//!
//! Holds the validated caller identity ([`Actor`]), the unique user handle
//! ([`RollNumber`]), and the read-side profile projection ([`UserProfile`]).

mod actor;
mod error;
mod handle;
mod profile;

pub use actor::Actor;
pub use error::DirectoryDomainError;
pub use handle::RollNumber;
pub use profile::UserProfile;
