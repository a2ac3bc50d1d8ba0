//! HTTP Basic authentication against the account directory.

use crate::accounts::AccountDirectory;
use crate::api::error::ApiError;
use crate::api::server::AppState;
use crate::model::AccountId;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::sync::Arc;

/// Who is making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Account(AccountId),
}

impl Caller {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::Account(_))
    }

    /// Resolves the caller from the `Authorization` header.
    ///
    /// No header, or a scheme other than Basic, is an anonymous caller. Basic credentials
    /// that do not match an account are an error even where anonymous callers are allowed.
    pub fn from_headers(headers: &HeaderMap, accounts: &AccountDirectory) -> Result<Self, ApiError> {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Ok(Caller::Anonymous);
        };
        let value = value
            .to_str()
            .map_err(|_| ApiError::authentication_failed("Invalid basic header."))?;

        let mut parts = value.splitn(2, ' ');
        let scheme = parts.next().unwrap_or_default();
        if !scheme.eq_ignore_ascii_case("basic") {
            return Ok(Caller::Anonymous);
        }
        let encoded = parts.next().map(str::trim).unwrap_or_default();
        if encoded.is_empty() {
            return Err(ApiError::authentication_failed(
                "Invalid basic header. No credentials provided.",
            ));
        }

        let decoded = STANDARD
            .decode(encoded)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(|| {
                ApiError::authentication_failed(
                    "Invalid basic header. Credentials not correctly base64 encoded.",
                )
            })?;
        let (username, password) = decoded.split_once(':').ok_or_else(|| {
            ApiError::authentication_failed(
                "Invalid basic header. Credentials not correctly base64 encoded.",
            )
        })?;

        match accounts.authenticate(username, password) {
            Some(account) => {
                tracing::debug!(account = %account, "Authenticated caller");
                Ok(Caller::Account(account))
            }
            None => {
                tracing::debug!(username = %username, "Rejected credentials");
                Err(ApiError::authentication_failed("Invalid username/password."))
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Caller::from_headers(&parts.headers, &state.accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::Account;
    use axum::http::{HeaderValue, StatusCode};

    fn directory() -> AccountDirectory {
        AccountDirectory::new(vec![Account::new(AccountId(1), "admin", "s3cret:pass")])
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(credentials: &str) -> HeaderMap {
        headers(&format!("Basic {}", STANDARD.encode(credentials)))
    }

    #[test]
    fn test_missing_or_foreign_scheme_is_anonymous() {
        assert_eq!(
            Caller::from_headers(&HeaderMap::new(), &directory()).unwrap(),
            Caller::Anonymous
        );
        assert_eq!(
            Caller::from_headers(&headers("Bearer abc"), &directory()).unwrap(),
            Caller::Anonymous
        );
    }

    #[test]
    fn test_valid_credentials_resolve_account() {
        // Only the first colon separates username from password.
        let caller = Caller::from_headers(&basic("admin:s3cret:pass"), &directory()).unwrap();
        assert_eq!(caller, Caller::Account(AccountId(1)));
        assert!(caller.is_authenticated());
    }

    #[test]
    fn test_bad_credentials_are_rejected() {
        for headers in [basic("admin:wrong"), basic("nocolon"), headers("Basic !!!"), headers("Basic")] {
            let err = Caller::from_headers(&headers, &directory()).unwrap_err();
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(err.code(), "AUTHENTICATION_FAILED");
        }
    }
}
