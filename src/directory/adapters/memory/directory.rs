//! Thread-safe in-memory user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{RollNumber, UserProfile},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<HashMap<RollNumber, UserProfile>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a profile.
    ///
    /// Profile creation belongs to the external authentication surface; this
    /// method exists so tests and embedding callers can seed the directory.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn seed(&self, profile: UserProfile) -> UserDirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| UserDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        state.insert(profile.handle().clone(), profile);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find(&self, handle: &RollNumber) -> UserDirectoryResult<Option<UserProfile>> {
        let state = self
            .state
            .read()
            .map_err(|err| UserDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.get(handle).cloned())
    }

    async fn list_handles_except(
        &self,
        excluded: &RollNumber,
    ) -> UserDirectoryResult<Vec<RollNumber>> {
        let state = self
            .state
            .read()
            .map_err(|err| UserDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        let mut handles: Vec<RollNumber> = state
            .keys()
            .filter(|handle| *handle != excluded)
            .cloned()
            .collect();
        handles.sort();
        Ok(handles)
    }

    async fn add_points(&self, handle: &RollNumber, delta: i64) -> UserDirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| UserDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        // The exclusive write lock makes the read-increment-write atomic.
        let profile = state
            .get(handle)
            .ok_or_else(|| UserDirectoryError::UnknownUser(handle.clone()))?;
        let updated = UserProfile::new(
            profile.handle().clone(),
            profile.name().to_owned(),
            profile.points().saturating_add(delta),
        );
        state.insert(handle.clone(), updated);
        Ok(())
    }

    async fn top_by_points(&self, limit: usize) -> UserDirectoryResult<Vec<UserProfile>> {
        let state = self
            .state
            .read()
            .map_err(|err| UserDirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        let mut profiles: Vec<UserProfile> = state.values().cloned().collect();
        // Tie-break on handle so pagination is stable across calls.
        profiles.sort_by(|a, b| {
            b.points()
                .cmp(&a.points())
                .then_with(|| a.handle().cmp(b.handle()))
        });
        profiles.truncate(limit);
        Ok(profiles)
    }
}
