//! Bearer token verification against the external identity provider.
//!
//! Tokens are RS256 JWTs issued by the provider; signing keys come from its
//! JWKS document and are cached in-process. The cache is refreshed once when
//! an unknown `kid` shows up, so key rotation does not require a restart.

use std::collections::HashMap;
use std::sync::Arc;

use atelier_common::config::AuthConfig;
use atelier_common::{AppError, AppResult};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Verified identity claims.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Subject id assigned by the provider.
    pub sub: String,
    /// Email, when the provider shares it.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Nickname, used as a display-name fallback.
    #[serde(default)]
    pub nickname: Option<String>,
}

impl Claims {
    /// Best-effort display name from the token.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        self.name.clone().or_else(|| self.nickname.clone())
    }
}

/// One signing key from the provider's JWKS document.
#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    #[serde(default)]
    kid: Option<String>,
    kty: String,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Token verification service.
#[derive(Clone)]
pub struct AuthService {
    issuer: String,
    audience: String,
    jwks_url: String,
    http_client: reqwest::Client,
    keys: Arc<RwLock<HashMap<String, Jwk>>>,
}

impl AuthService {
    /// Create a new auth service.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            issuer: config.issuer(),
            audience: config.audience.clone(),
            jwks_url: config.jwks_url(),
            http_client: reqwest::Client::new(),
            keys: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Verify a bearer token and return its claims.
    ///
    /// Any failure mode - malformed token, unknown key, bad signature,
    /// wrong issuer/audience, expired - collapses to [`AppError::Unauthorized`];
    /// only the JWKS fetch itself can surface a server error.
    pub async fn verify(&self, token: &str) -> AppResult<Claims> {
        let header = decode_header(token).map_err(|_| AppError::Unauthorized)?;
        let kid = header.kid.ok_or(AppError::Unauthorized)?;

        let jwk = match self.cached_key(&kid).await {
            Some(jwk) => jwk,
            None => {
                self.refresh_keys().await?;
                self.cached_key(&kid).await.ok_or(AppError::Unauthorized)?
            }
        };

        let n = jwk.n.as_deref().ok_or(AppError::Unauthorized)?;
        let e = jwk.e.as_deref().ok_or(AppError::Unauthorized)?;
        let key = DecodingKey::from_rsa_components(n, e).map_err(|_| AppError::Unauthorized)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.clone()]);
        validation.set_issuer(&[self.issuer.clone()]);

        let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            AppError::Unauthorized
        })?;

        Ok(data.claims)
    }

    async fn cached_key(&self, kid: &str) -> Option<Jwk> {
        self.keys.read().await.get(kid).cloned()
    }

    /// Fetch the JWKS document and replace the key cache.
    async fn refresh_keys(&self) -> AppResult<()> {
        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("JWKS request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "JWKS endpoint returned {}",
                response.status()
            )));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse JWKS: {e}")))?;

        let mut keys = self.keys.write().await;
        keys.clear();
        for jwk in jwks.keys {
            if jwk.kty != "RSA" {
                continue;
            }
            if let Some(kid) = jwk.kid.clone() {
                keys.insert(kid, jwk);
            }
        }

        tracing::debug!(count = keys.len(), "Refreshed JWKS key cache");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_service() -> AuthService {
        AuthService::new(&AuthConfig {
            domain: "tenant.example-idp.com".to_string(),
            audience: "https://api.example.com".to_string(),
        })
    }

    #[tokio::test]
    async fn test_garbage_token_rejected_without_network() {
        let service = test_service();
        // Not a JWT at all: header parsing fails before any JWKS fetch
        let result = service.verify("not-a-token").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_token_without_kid_rejected() {
        let service = test_service();
        // Valid JWT shape ({"alg":"RS256"} header, no kid), junk signature
        let token = "eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiJ4In0.c2ln";
        let result = service.verify(token).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_jwks_parsing() {
        let json = r#"{"keys":[{"kid":"k1","kty":"RSA","n":"abc","e":"AQAB"},{"kty":"EC"}]}"#;
        let jwks: JwkSet = serde_json::from_str(json).unwrap();
        assert_eq!(jwks.keys.len(), 2);
        assert_eq!(jwks.keys[0].kid.as_deref(), Some("k1"));
    }

    #[test]
    fn test_claims_display_name_fallback() {
        let claims = Claims {
            sub: "idp|1".to_string(),
            email: Some("a@example.com".to_string()),
            name: None,
            nickname: Some("nick".to_string()),
        };
        assert_eq!(claims.display_name().as_deref(), Some("nick"));
    }
}
