// src/ui/delete_control.rs
use crate::application::{CompanionDeleter, CompanionRepository, DeleteConfirmation};
use crate::domain::DomainError;
use tracing::{debug, warn};

/// Blocking notice shown when a delete call fails
pub const DELETE_FAILED_NOTICE: &str = "Failed to delete companion. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    ConfirmPending,
    Deleting,
}

/// Work the caller must perform on behalf of the control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteEffect {
    Delete { id: String },
}

/// Outcome of a finished delete, for the parent view to act on
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteEvent {
    Deleted(DeleteConfirmation),
    Failed { notice: &'static str, reason: String },
}

/// Button labels and enablement for the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControlView {
    pub primary_label: String,
    pub primary_disabled: bool,
    pub show_cancel: bool,
    pub cancel_disabled: bool,
    pub busy: bool,
}

/// Two-step confirm-then-delete control for a single companion.
///
/// The first request only arms confirmation; the second one emits the
/// delete effect. While deleting, further requests and cancels are ignored.
/// A failed delete returns the control to `Idle`.
#[derive(Debug, Clone)]
pub struct DeleteControl {
    companion_id: String,
    companion_name: String,
    state: DeleteState,
}

impl DeleteControl {
    pub fn new(companion_id: impl Into<String>, companion_name: impl Into<String>) -> Self {
        Self {
            companion_id: companion_id.into(),
            companion_name: companion_name.into(),
            state: DeleteState::Idle,
        }
    }

    pub fn state(&self) -> DeleteState {
        self.state
    }

    pub fn companion_id(&self) -> &str {
        &self.companion_id
    }

    pub fn companion_name(&self) -> &str {
        &self.companion_name
    }

    pub fn request(&mut self) -> Option<DeleteEffect> {
        match self.state {
            DeleteState::Idle => {
                self.state = DeleteState::ConfirmPending;
                None
            }
            DeleteState::ConfirmPending => {
                self.state = DeleteState::Deleting;
                Some(DeleteEffect::Delete {
                    id: self.companion_id.clone(),
                })
            }
            DeleteState::Deleting => {
                debug!(companion_id = %self.companion_id, "Ignoring delete request while deleting");
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.state == DeleteState::ConfirmPending {
            self.state = DeleteState::Idle;
        }
    }

    /// Feed back the result of a `Delete` effect
    pub fn complete(
        &mut self,
        result: Result<DeleteConfirmation, DomainError>,
    ) -> Option<DeleteEvent> {
        if self.state != DeleteState::Deleting {
            return None;
        }
        self.state = DeleteState::Idle;

        Some(match result {
            Ok(confirmation) => DeleteEvent::Deleted(confirmation),
            Err(e) => {
                warn!(companion_id = %self.companion_id, error = %e, "Failed to delete companion");
                DeleteEvent::Failed {
                    notice: DELETE_FAILED_NOTICE,
                    reason: e.to_string(),
                }
            }
        })
    }

    /// Run a `Delete` effect through the delete action and apply the result
    pub async fn settle<R: CompanionRepository>(
        &mut self,
        effect: DeleteEffect,
        deleter: &CompanionDeleter<R>,
    ) -> Option<DeleteEvent> {
        let DeleteEffect::Delete { id } = effect;
        let result = deleter.delete_companion(&id).await;
        self.complete(result)
    }

    pub fn view(&self) -> DeleteControlView {
        match self.state {
            DeleteState::Idle => DeleteControlView {
                primary_label: "Delete".to_string(),
                primary_disabled: false,
                show_cancel: false,
                cancel_disabled: false,
                busy: false,
            },
            DeleteState::ConfirmPending => DeleteControlView {
                primary_label: format!("Delete \"{}\"", self.companion_name),
                primary_disabled: false,
                show_cancel: true,
                cancel_disabled: false,
                busy: false,
            },
            DeleteState::Deleting => DeleteControlView {
                primary_label: "Deleting...".to_string(),
                primary_disabled: true,
                show_cancel: true,
                cancel_disabled: true,
                busy: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{sample_companions, MockCompanionRepository};
    use crate::domain::CompanionFilter;
    use crate::application::CompanionLister;
    use std::sync::Arc;

    fn control() -> DeleteControl {
        DeleteControl::new("cmp-maths-1", "Countsy the Number Wizard")
    }

    #[test]
    fn given_idle_when_requesting_then_arms_confirmation_without_effect() {
        let mut control = control();

        let effect = control.request();

        assert_eq!(effect, None);
        assert_eq!(control.state(), DeleteState::ConfirmPending);
    }

    #[test]
    fn given_confirm_pending_when_requesting_then_emits_delete_effect() {
        let mut control = control();
        control.request();

        let effect = control.request();

        assert_eq!(
            effect,
            Some(DeleteEffect::Delete {
                id: "cmp-maths-1".to_string()
            })
        );
        assert_eq!(control.state(), DeleteState::Deleting);
    }

    #[test]
    fn given_confirm_pending_when_cancelling_then_returns_to_idle() {
        let mut control = control();
        control.request();

        control.cancel();

        assert_eq!(control.state(), DeleteState::Idle);
        assert_eq!(control.request(), None);
    }

    #[test]
    fn given_deleting_when_requesting_or_cancelling_then_ignored() {
        // Arrange
        let mut control = control();
        control.request();
        control.request();

        // Act
        let again = control.request();
        control.cancel();

        // Assert
        assert_eq!(again, None);
        assert_eq!(control.state(), DeleteState::Deleting);
    }

    #[test]
    fn given_idle_when_completing_then_ignored() {
        let mut control = control();
        assert_eq!(control.complete(Err(DomainError::MissingCompanionId)), None);
        assert_eq!(control.state(), DeleteState::Idle);
    }

    #[test]
    fn given_each_state_when_viewing_then_labels_match() {
        let mut control = control();
        assert_eq!(control.view().primary_label, "Delete");
        assert!(!control.view().show_cancel);

        control.request();
        assert_eq!(control.view().primary_label, "Delete \"Countsy the Number Wizard\"");
        assert!(control.view().show_cancel);

        control.request();
        let view = control.view();
        assert_eq!(view.primary_label, "Deleting...");
        assert!(view.primary_disabled && view.cancel_disabled && view.busy);
    }

    #[tokio::test]
    async fn given_two_triggers_when_settling_then_row_removed_from_listing() {
        // Arrange
        let repository = Arc::new(
            MockCompanionRepository::builder()
                .with_companions(sample_companions())
                .build(),
        );
        let calls = repository.delete_calls();
        let deleter = CompanionDeleter::new(Arc::clone(&repository));
        let lister = CompanionLister::new(Arc::clone(&repository));
        let filter = CompanionFilter::new(Some("maths"), None);
        let mut control = control();

        // Act
        assert_eq!(control.request(), None);
        assert_eq!(calls.count(), 0);
        let effect = control.request().expect("second trigger should delete");
        let event = control.settle(effect, &deleter).await;

        // Assert
        assert!(matches!(event, Some(DeleteEvent::Deleted(ref c)) if c.id == "cmp-maths-1"));
        assert_eq!(calls.count(), 1);
        assert_eq!(control.state(), DeleteState::Idle);
        let remaining = lister.list_companions(&filter).await.unwrap();
        assert!(remaining.iter().all(|c| c.id != "cmp-maths-1"));
    }

    #[tokio::test]
    async fn given_trigger_then_cancel_when_done_then_no_delete_call() {
        let repository = MockCompanionRepository::builder()
            .with_companions(sample_companions())
            .build();
        let calls = repository.delete_calls();
        let mut control = control();

        control.request();
        control.cancel();

        assert_eq!(calls.count(), 0);
        assert_eq!(control.state(), DeleteState::Idle);
    }

    #[tokio::test]
    async fn given_store_rejection_when_settling_then_fails_and_resets_to_idle() {
        // Arrange
        let repository = MockCompanionRepository::builder()
            .with_companions(sample_companions())
            .with_delete_failure("cmp-maths-1", 403, "permission denied for table companions")
            .build();
        let deleter = CompanionDeleter::new(repository);
        let mut control = control();
        control.request();
        let effect = control.request().unwrap();

        // Act
        let event = control.settle(effect, &deleter).await;

        // Assert
        match event {
            Some(DeleteEvent::Failed { notice, reason }) => {
                assert_eq!(notice, DELETE_FAILED_NOTICE);
                assert_eq!(reason, "permission denied for table companions");
            }
            other => panic!("Expected failure event, got {other:?}"),
        }
        assert_eq!(control.state(), DeleteState::Idle);
        // Retry needs the full two-step again
        assert_eq!(control.request(), None);
        assert!(control.request().is_some());
    }
}
