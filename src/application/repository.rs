// src/application/repository.rs
use crate::domain::{Companion, CompanionFilter, DomainError};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait CompanionRepository: Send + Sync {
    /// Fetch rows matching the filter, in store order
    async fn list_companions(&self, filter: &CompanionFilter)
        -> Result<Vec<Companion>, DomainError>;

    /// Remove a row and return it as it was before deletion.
    /// Fails with `CompanionNotFound` when no row has the id.
    async fn delete_companion(&self, id: &str) -> Result<Companion, DomainError>;
}

/// Opens the companion table on behalf of one caller.
///
/// `access_token` is the caller's session token; `None` means anonymous.
/// The returned repository must not fall back to any other credentials.
pub trait CompanionStore: Send + Sync {
    fn for_session(&self, access_token: Option<String>) -> Arc<dyn CompanionRepository>;
}

#[async_trait]
impl<R: CompanionRepository + ?Sized> CompanionRepository for Arc<R> {
    async fn list_companions(
        &self,
        filter: &CompanionFilter,
    ) -> Result<Vec<Companion>, DomainError> {
        (**self).list_companions(filter).await
    }

    async fn delete_companion(&self, id: &str) -> Result<Companion, DomainError> {
        (**self).delete_companion(id).await
    }
}
