// src/infrastructure/server.rs
use crate::application::{CompanionDeleter, CompanionLister, CompanionStore, DeleteConfirmation};
use crate::domain::{Companion, CompanionFilter, DomainError};
use crate::infrastructure::Session;
use crate::ports::html::LIBRARY_PATH;
use crate::ports::{HtmlPresenter, LibraryPage, LibraryState};
use crate::ui::filter_control::{SUBJECT_KEY, TOPIC_KEY};
use crate::ui::url_query::{query_value, to_url};
use crate::ui::canonical_query;
use anyhow::{Context, Result};
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

const MISSING_ID_MESSAGE: &str = "Companion ID is required";
const DELETE_FAILED_MESSAGE: &str = "Failed to delete companion";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Shared, immutable handler state.
///
/// Holds no credentials: every handler opens the store with the session of
/// its own request.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn CompanionStore>,
    presenter: Arc<HtmlPresenter>,
}

impl AppState {
    pub fn new(store: Arc<dyn CompanionStore>) -> Self {
        Self {
            store,
            presenter: Arc::new(HtmlPresenter::new()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(LIBRARY_PATH) }))
        .route("/health", get(|| async { "ok" }))
        .route(LIBRARY_PATH, get(library_page))
        .route("/api/companions", get(list_companions).delete(missing_id))
        .route("/api/companions/", delete(missing_id))
        .route("/api/companions/:id", delete(delete_companion))
        .with_state(state)
}

/// Serve until ctrl-c
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr().context("Failed to read listener address")?;
    info!(%addr, "companion-library listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await
        .context("Server error")
}

fn filter_from_query(query: &str) -> CompanionFilter {
    CompanionFilter::new(
        query_value(query, SUBJECT_KEY).as_deref(),
        query_value(query, TOPIC_KEY).as_deref(),
    )
}

async fn library_page(
    State(state): State<AppState>,
    session: Session,
    RawQuery(query): RawQuery,
) -> Response {
    let raw = query.unwrap_or_default();
    let canonical = canonical_query(&raw);
    if canonical != raw {
        debug!(%raw, %canonical, "Redirecting to canonical library URL");
        return Redirect::to(&to_url(LIBRARY_PATH, &canonical)).into_response();
    }

    let signed_in = session.is_signed_in();
    let filter = filter_from_query(&canonical);
    let result = CompanionLister::new(state.store.for_session(session.into_access_token()))
        .list_companions(&filter)
        .await;
    if let Err(e) = &result {
        error!(error = %e, ?filter, "Error fetching companions");
    }

    let page = LibraryPage {
        state: LibraryState::from_result(&result),
        query: canonical,
        signed_in,
    };
    let status = match page.state {
        LibraryState::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    };

    (status, Html(state.presenter.render_library(&page))).into_response()
}

async fn list_companions(
    State(state): State<AppState>,
    session: Session,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Companion>>, ApiError> {
    let filter = filter_from_query(&query.unwrap_or_default());
    CompanionLister::new(state.store.for_session(session.into_access_token()))
        .list_companions(&filter)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, "Error fetching companions");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}

async fn missing_id() -> ApiError {
    api_error(StatusCode::BAD_REQUEST, MISSING_ID_MESSAGE)
}

async fn delete_companion(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<DeleteConfirmation>, ApiError> {
    debug!(signed_in = session.is_signed_in(), %id, "Delete requested");
    CompanionDeleter::new(state.store.for_session(session.into_access_token()))
        .delete_companion(&id)
        .await
        .map(Json)
        .map_err(map_delete_error)
}

fn map_delete_error(err: DomainError) -> ApiError {
    error!(error = %err, "Error deleting companion");
    match err {
        DomainError::MissingCompanionId => api_error(StatusCode::BAD_REQUEST, MISSING_ID_MESSAGE),
        e if e.is_descriptive() => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        _ => api_error(StatusCode::INTERNAL_SERVER_ERROR, DELETE_FAILED_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DomainError::MissingCompanionId, StatusCode::BAD_REQUEST, "Companion ID is required")]
    #[case(DomainError::CompanionNotFound("x".to_string()), StatusCode::BAD_REQUEST, "Companion not found: x")]
    #[case(DomainError::Remote { status: 403, message: "permission denied".to_string() }, StatusCode::BAD_REQUEST, "permission denied")]
    #[case(DomainError::Transport("timed out".to_string()), StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete companion")]
    #[case(DomainError::MalformedResponse("eof".to_string()), StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete companion")]
    fn test_map_delete_error(
        #[case] error: DomainError,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let (actual_status, Json(body)) = map_delete_error(error);
        assert_eq!(actual_status, status);
        assert_eq!(body.error, message);
    }

    #[test]
    fn given_query_when_building_filter_then_reads_subject_and_topic() {
        let filter = filter_from_query("subject=maths&topic=calculus");
        assert_eq!(filter, CompanionFilter::new(Some("maths"), Some("calculus")));
    }
}
