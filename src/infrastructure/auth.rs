// src/infrastructure/auth.rs
use async_trait::async_trait;
use std::env::{self, VarError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Session token unavailable: {0}")]
    Unavailable(String),
}

/// Source of the signed-in user's access token.
///
/// `Ok(None)` means there is no session; the store then sees the anonymous key.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<Option<String>, AuthError>;
}

/// Fixed token, typically passed on the command line
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.token.clone())
    }
}

/// Token read from an environment variable on every call, so a rotated
/// token is picked up without a restart.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for EnvTokenProvider {
    async fn access_token(&self) -> Result<Option<String>, AuthError> {
        match env::var(&self.var) {
            Ok(token) if token.trim().is_empty() => Ok(None),
            Ok(token) => Ok(Some(token.trim().to_string())),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(AuthError::Unavailable(format!(
                "{} is not valid unicode",
                self.var
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn given_blank_static_token_when_fetching_then_no_session() {
        let provider = StaticTokenProvider::new(Some("  ".to_string()));
        assert_eq!(provider.access_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn given_static_token_when_fetching_then_returns_it() {
        let provider = StaticTokenProvider::new(Some("jwt-123".to_string()));
        assert_eq!(provider.access_token().await.unwrap().as_deref(), Some("jwt-123"));
    }

    #[tokio::test]
    async fn given_unset_variable_when_fetching_then_no_session() {
        let provider = EnvTokenProvider::new("COMPANION_LIBRARY_TEST_TOKEN_NEVER_SET");
        assert_eq!(provider.access_token().await.unwrap(), None);
    }
}
