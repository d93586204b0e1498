// src/ports/library.rs
use crate::domain::{Companion, DomainError};

pub const EMPTY_MESSAGE: &str = "No companions found.";
pub const ERROR_MESSAGE: &str = "Error loading companions. Please check your database connection.";
pub const ERROR_GUIDANCE: &str = "Make sure your environment variables are properly configured.";

/// What the library page shows. A failed fetch is never rendered as an
/// empty result.
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryState {
    Populated(Vec<Companion>),
    Empty,
    Failed,
}

impl LibraryState {
    pub fn from_result(result: &Result<Vec<Companion>, DomainError>) -> Self {
        match result {
            Ok(companions) if companions.is_empty() => LibraryState::Empty,
            Ok(companions) => LibraryState::Populated(companions.clone()),
            Err(_) => LibraryState::Failed,
        }
    }
}

/// Everything the library page needs to render
#[derive(Debug, Clone)]
pub struct LibraryPage {
    pub state: LibraryState,
    /// Canonical query string of the request, without `?`
    pub query: String,
    /// Whether a session token is available; gates the delete controls
    pub signed_in: bool,
}
