// src/infrastructure/session.rs
use crate::constants::SESSION_COOKIE;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;

/// Access token presented by the caller of one HTTP request.
///
/// Read from `Authorization: Bearer <token>`, else from the session cookie.
/// A request without either is anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    access_token: Option<String>,
}

impl Session {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            access_token: bearer_token(headers).or_else(|| cookie_token(headers)),
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn into_access_token(self) -> Option<String> {
        self.access_token
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        non_blank(token)
    } else {
        None
    }
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, token)| non_blank(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.append(*name, HeaderValue::from_static(value));
        }
        headers
    }

    #[rstest]
    #[case(&[], None)]
    #[case(&[("authorization", "Bearer user-jwt")], Some("user-jwt"))]
    #[case(&[("authorization", "bearer user-jwt")], Some("user-jwt"))]
    #[case(&[("authorization", "Bearer   ")], None)]
    #[case(&[("authorization", "Basic dXNlcjpwdw==")], None)]
    #[case(&[("cookie", "theme=dark; sb-access-token=cookie-jwt")], Some("cookie-jwt"))]
    #[case(&[("cookie", "theme=dark"), ("cookie", "sb-access-token=cookie-jwt")], Some("cookie-jwt"))]
    #[case(&[("cookie", "sb-access-token=")], None)]
    #[case(&[("cookie", "not-sb-access-token=x")], None)]
    fn test_session_from_headers(
        #[case] pairs: &[(&'static str, &'static str)],
        #[case] expected: Option<&str>,
    ) {
        let session = Session::from_headers(&headers(pairs));
        assert_eq!(session.access_token(), expected);
        assert_eq!(session.is_signed_in(), expected.is_some());
    }

    #[test]
    fn given_header_and_cookie_when_reading_session_then_header_wins() {
        let session = Session::from_headers(&headers(&[
            ("cookie", "sb-access-token=cookie-jwt"),
            ("authorization", "Bearer header-jwt"),
        ]));

        assert_eq!(session.into_access_token().as_deref(), Some("header-jwt"));
    }
}
