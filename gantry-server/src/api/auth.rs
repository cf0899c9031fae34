//! Bearer Token Authentication
//!
//! Middleware guarding the job and build endpoints. Tokens are configured
//! statically, each with a single scope; reads require `user` or `pipeline`.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::str::FromStr;

use crate::api::AppState;
use crate::api::error::ApiError;

/// Scopes that may read jobs and builds
const READ_SCOPES: [Scope; 2] = [Scope::User, Scope::Pipeline];

/// Scope granted to a bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    User,
    Pipeline,
    Build,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::Pipeline => "pipeline",
            Scope::Build => "build",
        }
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Scope::User),
            "pipeline" => Ok(Scope::Pipeline),
            "build" => Ok(Scope::Build),
            other => Err(format!("unknown scope '{}'", other)),
        }
    }
}

/// Known bearer tokens and their scopes
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    tokens: HashMap<String, Scope>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token, returning false if it was already present
    pub fn insert(&mut self, token: impl Into<String>, scope: Scope) -> bool {
        self.tokens.insert(token.into(), scope).is_none()
    }

    pub fn scope_of(&self, token: &str) -> Option<Scope> {
        self.tokens.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Token of an `Authorization: Bearer <token>` header
///
/// The scheme name is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let (scheme, token) = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Reject requests without a read-scoped bearer token
pub async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::warn!("Rejected {}: missing bearer token", request.uri().path());
        return Err(ApiError::Unauthorized("Missing bearer token".to_string()));
    };

    let Some(scope) = state.tokens.scope_of(token) else {
        tracing::warn!("Rejected {}: unknown bearer token", request.uri().path());
        return Err(ApiError::Unauthorized("Invalid bearer token".to_string()));
    };

    if !READ_SCOPES.contains(&scope) {
        tracing::warn!(
            "Rejected {}: scope '{}' not allowed",
            request.uri().path(),
            scope.as_str()
        );
        return Err(ApiError::Forbidden(format!(
            "Scope '{}' cannot read jobs or builds",
            scope.as_str()
        )));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse() {
        assert_eq!("user".parse::<Scope>(), Ok(Scope::User));
        assert_eq!("pipeline".parse::<Scope>(), Ok(Scope::Pipeline));
        assert_eq!("build".parse::<Scope>(), Ok(Scope::Build));
        assert!("admin".parse::<Scope>().is_err());
    }

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization.parse().unwrap());
        headers
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("BEARER  abc ")), Some("abc"));
    }

    #[test]
    fn test_bearer_token_rejects_other_shapes() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
        assert_eq!(bearer_token(&headers("Bearerabc")), None);
    }

    #[test]
    fn test_token_table() {
        let mut table = TokenTable::new();
        assert!(table.is_empty());
        assert!(table.insert("abc", Scope::User));
        assert!(!table.insert("abc", Scope::Build));
        assert_eq!(table.len(), 1);
        assert_eq!(table.scope_of("abc"), Some(Scope::Build));
        assert_eq!(table.scope_of("xyz"), None);
    }
}
