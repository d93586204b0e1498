// src/application/companion_deleter.rs
use crate::application::CompanionRepository;
use crate::domain::{Companion, DomainError};
use serde::Serialize;
use tracing::{info, instrument};

/// Body returned to callers after a row has been removed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteConfirmation {
    pub success: bool,
    pub id: String,
    pub companion: Companion,
}

pub struct CompanionDeleter<R: CompanionRepository> {
    repository: R,
}

impl<R: CompanionRepository> CompanionDeleter<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Delete a companion by id.
    ///
    /// An empty or whitespace-only id fails with `MissingCompanionId`
    /// before the store is contacted.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_companion(&self, id: &str) -> Result<DeleteConfirmation, DomainError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DomainError::MissingCompanionId);
        }

        let companion = self.repository.delete_companion(id).await?;
        info!(companion_id = id, name = %companion.name, "Deleted companion");

        Ok(DeleteConfirmation {
            success: true,
            id: id.to_string(),
            companion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{sample_companions, MockCompanionRepository};
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn given_blank_id_when_deleting_then_fails_without_store_call(#[case] id: &str) {
        // Arrange
        let mock = MockCompanionRepository::builder()
            .with_companions(sample_companions())
            .build();
        let calls = mock.delete_calls();
        let deleter = CompanionDeleter::new(mock);

        // Act
        let result = deleter.delete_companion(id).await;

        // Assert
        assert!(matches!(result, Err(DomainError::MissingCompanionId)));
        assert_eq!(calls.count(), 0);
    }

    #[tokio::test]
    async fn given_existing_companion_when_deleting_then_returns_confirmation() {
        // Arrange
        let mock = MockCompanionRepository::builder()
            .with_companions(sample_companions())
            .build();
        let deleter = CompanionDeleter::new(mock);

        // Act
        let confirmation = deleter.delete_companion("cmp-maths-1").await.unwrap();

        // Assert
        assert!(confirmation.success);
        assert_eq!(confirmation.id, "cmp-maths-1");
        assert_eq!(confirmation.companion.name, "Countsy the Number Wizard");
    }

    #[tokio::test]
    async fn given_nonexistent_companion_when_deleting_then_returns_not_found() {
        // Arrange
        let mock = MockCompanionRepository::builder().build();
        let deleter = CompanionDeleter::new(mock);

        // Act
        let result = deleter.delete_companion("missing").await;

        // Assert
        match result.expect_err("Should return error") {
            DomainError::CompanionNotFound(id) => assert_eq!(id, "missing"),
            other => panic!("Expected CompanionNotFound, got {other:?}"),
        }
    }
}
