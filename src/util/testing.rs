// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{CompanionRepository, CompanionStore};
use crate::domain::{Companion, CompanionFilter, DomainError, Subject};

#[derive(Clone)]
enum ListBehavior {
    Rows,
    TransportFailure(String),
    RemoteFailure(u16, String),
}

/// Delete calls that reached a mock store, with the session each carried
#[derive(Debug, Clone, Default)]
pub struct DeleteCalls(Arc<Mutex<Vec<Option<String>>>>);

impl DeleteCalls {
    pub fn count(&self) -> usize {
        self.0.lock().expect("mock calls poisoned").len()
    }

    /// Session token of each call in order, `None` for anonymous calls
    pub fn sessions(&self) -> Vec<Option<String>> {
        self.0.lock().expect("mock calls poisoned").clone()
    }

    fn record(&self, session: Option<String>) {
        self.0.lock().expect("mock calls poisoned").push(session);
    }
}

/// In-memory stand-in for the remote companions table
///
/// Rows live behind a shared mutex so deletes are visible to later listings,
/// including listings through another session opened from the same mock.
///
/// # Examples
///
/// ```
/// use companion_library::util::testing::{sample_companions, MockCompanionRepository};
///
/// let mock = MockCompanionRepository::builder()
///     .with_companions(sample_companions())
///     .with_delete_failure("cmp-maths-1", 403, "permission denied")
///     .build();
/// assert_eq!(mock.delete_calls().count(), 0);
/// ```
#[derive(Clone)]
pub struct MockCompanionRepository {
    rows: Arc<Mutex<Vec<Companion>>>,
    list_behavior: ListBehavior,
    delete_failures: HashMap<String, (u16, String)>,
    delete_calls: DeleteCalls,
    session: Option<String>,
}

impl MockCompanionRepository {
    pub fn builder() -> MockCompanionRepositoryBuilder {
        MockCompanionRepositoryBuilder::new()
    }

    pub fn delete_calls(&self) -> DeleteCalls {
        self.delete_calls.clone()
    }
}

#[async_trait]
impl CompanionRepository for MockCompanionRepository {
    async fn list_companions(
        &self,
        filter: &CompanionFilter,
    ) -> Result<Vec<Companion>, DomainError> {
        match &self.list_behavior {
            ListBehavior::TransportFailure(message) => {
                Err(DomainError::Transport(message.clone()))
            }
            ListBehavior::RemoteFailure(status, message) => Err(DomainError::Remote {
                status: *status,
                message: message.clone(),
            }),
            ListBehavior::Rows => {
                let rows = self.rows.lock().expect("mock rows poisoned");
                Ok(rows.iter().filter(|c| filter.matches(c)).cloned().collect())
            }
        }
    }

    async fn delete_companion(&self, id: &str) -> Result<Companion, DomainError> {
        self.delete_calls.record(self.session.clone());

        if let Some((status, message)) = self.delete_failures.get(id) {
            return Err(DomainError::Remote {
                status: *status,
                message: message.clone(),
            });
        }

        let mut rows = self.rows.lock().expect("mock rows poisoned");
        match rows.iter().position(|c| c.id == id) {
            Some(index) => Ok(rows.remove(index)),
            None => Err(DomainError::CompanionNotFound(id.to_string())),
        }
    }
}

impl CompanionStore for MockCompanionRepository {
    fn for_session(&self, access_token: Option<String>) -> Arc<dyn CompanionRepository> {
        Arc::new(Self {
            session: access_token,
            ..self.clone()
        })
    }
}

/// Builder for MockCompanionRepository
pub struct MockCompanionRepositoryBuilder {
    rows: Vec<Companion>,
    list_behavior: ListBehavior,
    delete_failures: HashMap<String, (u16, String)>,
}

impl MockCompanionRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            rows: vec![],
            list_behavior: ListBehavior::Rows,
            delete_failures: HashMap::new(),
        }
    }

    pub fn with_companion(mut self, companion: Companion) -> Self {
        self.rows.push(companion);
        self
    }

    pub fn with_companions(mut self, companions: Vec<Companion>) -> Self {
        self.rows.extend(companions);
        self
    }

    /// Make every listing fail as if the store were unreachable
    pub fn with_list_failure(mut self, message: &str) -> Self {
        self.list_behavior = ListBehavior::TransportFailure(message.to_string());
        self
    }

    /// Make every listing fail with a store-provided message
    pub fn with_list_rejection(mut self, status: u16, message: &str) -> Self {
        self.list_behavior = ListBehavior::RemoteFailure(status, message.to_string());
        self
    }

    /// Configure delete_companion to be rejected by the store for a specific ID
    pub fn with_delete_failure(mut self, id: &str, status: u16, message: &str) -> Self {
        self.delete_failures
            .insert(id.to_string(), (status, message.to_string()));
        self
    }

    pub fn build(self) -> MockCompanionRepository {
        MockCompanionRepository {
            rows: Arc::new(Mutex::new(self.rows)),
            list_behavior: self.list_behavior,
            delete_failures: self.delete_failures,
            delete_calls: DeleteCalls::default(),
            session: None,
        }
    }
}

impl Default for MockCompanionRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A small library spanning several subjects
pub fn sample_companions() -> Vec<Companion> {
    let row = |id: &str, subject: Subject, name: &str, topic: &str, duration: u32| Companion {
        id: id.to_string(),
        subject,
        name: name.to_string(),
        topic: topic.to_string(),
        duration,
    };

    vec![
        row("cmp-maths-1", Subject::Maths, "Countsy the Number Wizard", "Derivatives and integrals", 30),
        row("cmp-maths-2", Subject::Maths, "Algebrina", "Linear equations", 20),
        row("cmp-science-1", Subject::Science, "Neura the Brainy Explorer", "The nervous system", 45),
        row("cmp-language-1", Subject::Language, "Verba the Vocabulary Builder", "English literature", 30),
        row("cmp-coding-1", Subject::Coding, "Codey the Logic Hacker", "Intro to ownership", 60),
    ]
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "wiremock", "h2", "rustls"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    #[tokio::test]
    async fn given_companions_added_when_listing_all_then_returns_all() {
        let mock = MockCompanionRepository::builder()
            .with_companions(sample_companions())
            .build();

        let result = mock
            .list_companions(&CompanionFilter::default())
            .await
            .expect("List should succeed");
        assert_eq!(result.len(), 5);
    }

    #[tokio::test]
    async fn given_deleted_row_when_listing_again_then_row_is_gone() {
        let mock = MockCompanionRepository::builder()
            .with_companions(sample_companions())
            .build();

        mock.delete_companion("cmp-science-1")
            .await
            .expect("Delete should succeed");
        let result = mock
            .list_companions(&CompanionFilter::default())
            .await
            .expect("List should succeed");

        assert_eq!(result.len(), 4);
        assert!(result.iter().all(|c| c.id != "cmp-science-1"));
        assert_eq!(mock.delete_calls().count(), 1);
    }

    #[tokio::test]
    async fn given_delete_failure_configured_when_deleting_then_returns_remote_error() {
        let mock = MockCompanionRepository::builder()
            .with_companions(sample_companions())
            .with_delete_failure("cmp-maths-1", 403, "permission denied")
            .build();

        let result = mock.delete_companion("cmp-maths-1").await;

        assert!(matches!(
            result,
            Err(DomainError::Remote { status: 403, .. })
        ));
    }

    #[tokio::test]
    async fn given_list_rejection_when_listing_then_returns_remote_error() {
        let mock = MockCompanionRepository::builder()
            .with_list_rejection(401, "JWT expired")
            .build();

        let result = mock.list_companions(&CompanionFilter::default()).await;

        assert!(matches!(result, Err(DomainError::Remote { status: 401, .. })));
    }

    #[tokio::test]
    async fn given_single_companion_when_filtering_by_topic_then_matches_case_insensitively() {
        let mock = MockCompanionRepository::builder()
            .with_companion(sample_companions().remove(0))
            .build();

        let result = mock
            .list_companions(&CompanionFilter::new(None, Some("integrals")))
            .await
            .expect("List should succeed");

        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn given_session_opened_when_deleting_then_rows_shared_and_session_recorded() {
        // Arrange
        let mock = MockCompanionRepository::builder()
            .with_companions(sample_companions())
            .build();
        let signed_in = mock.for_session(Some("user-jwt".to_string()));
        let anonymous = mock.for_session(None);

        // Act
        signed_in.delete_companion("cmp-maths-2").await.unwrap();
        let result = anonymous.delete_companion("cmp-coding-1").await;

        // Assert
        assert!(result.is_ok());
        assert_eq!(mock.list_companions(&CompanionFilter::default()).await.unwrap().len(), 3);
        assert_eq!(
            mock.delete_calls().sessions(),
            vec![Some("user-jwt".to_string()), None]
        );
    }
}
