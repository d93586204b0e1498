// src/application/companion_lister.rs
use crate::application::CompanionRepository;
use crate::domain::{Companion, CompanionFilter, DomainError};
use tracing::{debug, instrument};

pub struct CompanionLister<R: CompanionRepository> {
    repository: R,
}

impl<R: CompanionRepository> CompanionLister<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// List companions matching the filter.
    ///
    /// Store failures are returned as errors, never as an empty list, so
    /// callers can tell "no results" apart from "could not fetch".
    #[instrument(level = "debug", skip(self))]
    pub async fn list_companions(
        &self,
        filter: &CompanionFilter,
    ) -> Result<Vec<Companion>, DomainError> {
        let companions = self.repository.list_companions(filter).await?;
        debug!(count = companions.len(), "Fetched companions");
        Ok(companions)
    }
}
