// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Credential Providers
//!
//! Secure calls carry an OAuth2 bearer token obtained for the client's
//! scopes. [`AmbientCredentials`] discovers one from the environment the
//! process runs in; [`StaticToken`] hands out a fixed token.
//!
//! # Ambient resolution order
//!
//! 1. `FACETY_ACCESS_TOKEN` holding a pre-issued token
//! 2. the service account key file named by `GOOGLE_APPLICATION_CREDENTIALS`
//!    (JWT bearer grant against the key's `token_uri`)
//! 3. the compute metadata server (`GCE_METADATA_HOST` or
//!    `metadata.google.internal`)
//!
//! Any failure is reported as [`AgreementsError::Transport`].

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::AgreementsError;

pub const TOKEN_VARIABLE: &str = "FACETY_ACCESS_TOKEN";
pub const KEY_FILE_VARIABLE: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const METADATA_HOST_VARIABLE: &str = "GCE_METADATA_HOST";
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// An OAuth2 access token. `Debug` does not reveal it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn access_token(&self, scopes: &[String]) -> Result<AccessToken, AgreementsError>;
}

/// Always returns the same token, whatever the scopes.
#[derive(Debug, Clone)]
pub struct StaticToken(AccessToken);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(AccessToken::new(token))
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn access_token(&self, _scopes: &[String]) -> Result<AccessToken, AgreementsError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    client_email: String,
    #[serde(default)]
    private_key: String,
    #[serde(default)]
    token_uri: String,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Credentials discovered from the process environment.
#[derive(Debug, Clone)]
pub struct AmbientCredentials {
    client: Client,
    token: Option<AccessToken>,
    key_file: Option<PathBuf>,
    metadata_endpoint: String,
}

impl Default for AmbientCredentials {
    fn default() -> Self {
        Self::from_env()
    }
}

impl AmbientCredentials {
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let metadata_host =
            non_empty(METADATA_HOST_VARIABLE).unwrap_or_else(|| DEFAULT_METADATA_HOST.to_string());

        Self {
            client: Client::new(),
            token: non_empty(TOKEN_VARIABLE).map(AccessToken::new),
            key_file: non_empty(KEY_FILE_VARIABLE).map(PathBuf::from),
            metadata_endpoint: format!("http://{}", metadata_host),
        }
    }

    /// No environment sources; only the metadata server at `endpoint`.
    pub fn metadata_only(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: None,
            key_file: None,
            metadata_endpoint: endpoint.into(),
        }
    }

    pub fn with_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_file = Some(path.into());
        self
    }

    async fn from_key_file(
        &self,
        path: &Path,
        scopes: &[String],
    ) -> Result<AccessToken, AgreementsError> {
        debug!(path = %path.display(), "Resolving credentials from service account key");

        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AgreementsError::Transport(format!(
                "failed to read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        let key: ServiceAccountKey = serde_json::from_str(&raw).map_err(|e| {
            AgreementsError::Transport(format!(
                "malformed credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        if key.kind != "service_account" {
            return Err(AgreementsError::Transport(format!(
                "unsupported credentials type '{}' in {}",
                key.kind,
                path.display()
            )));
        }

        let iat = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: scopes.join(" "),
            aud: &key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AgreementsError::Transport(format!("invalid service account key: {}", e)))?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| AgreementsError::Transport(format!("failed to sign assertion: {}", e)))?;

        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AgreementsError::Transport(format!("token exchange failed: {}", e)))?;

        Self::read_token(response, &key.token_uri).await
    }

    async fn from_metadata_server(&self, scopes: &[String]) -> Result<AccessToken, AgreementsError> {
        let base = format!(
            "{}/computeMetadata/v1/instance/service-accounts/default/token",
            self.metadata_endpoint
        );
        let url = if scopes.is_empty() {
            Url::parse(&base)
        } else {
            Url::parse_with_params(&base, &[("scopes", scopes.join(","))])
        }
        .map_err(|e| AgreementsError::Transport(format!("invalid metadata endpoint: {}", e)))?;

        debug!(endpoint = %self.metadata_endpoint, "Resolving credentials from metadata server");

        let response = self
            .client
            .get(url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| {
                AgreementsError::Transport(format!(
                    "no ambient credentials: metadata server unreachable: {}",
                    e
                ))
            })?;

        Self::read_token(response, &self.metadata_endpoint).await
    }

    async fn read_token(
        response: reqwest::Response,
        source: &str,
    ) -> Result<AccessToken, AgreementsError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(no body)".to_string());
            return Err(AgreementsError::Transport(format!(
                "token request to {} failed: {} - {}",
                source, status, body
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AgreementsError::Transport(format!("malformed token response from {}: {}", source, e))
        })?;

        Ok(AccessToken::new(token.access_token))
    }
}

#[async_trait]
impl CredentialProvider for AmbientCredentials {
    async fn access_token(&self, scopes: &[String]) -> Result<AccessToken, AgreementsError> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }

        if let Some(path) = &self.key_file {
            return self.from_key_file(path, scopes).await;
        }

        self.from_metadata_server(scopes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scopes() -> Vec<String> {
        vec!["agreements.facety.tech:443".to_string()]
    }

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticToken::new("abc");
        let token = provider.access_token(&scopes()).await.unwrap();

        assert_eq!(token.secret(), "abc");
        assert_eq!(format!("{:?}", token), "AccessToken(***)");
    }

    #[tokio::test]
    async fn test_metadata_server_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                "/computeMetadata/v1/instance/service-accounts/default/token",
            )
            .match_header("metadata-flavor", "Google")
            .match_query(mockito::Matcher::UrlEncoded(
                "scopes".into(),
                "agreements.facety.tech:443".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29.token","expires_in":3599,"token_type":"Bearer"}"#)
            .create_async()
            .await;

        let provider = AmbientCredentials::metadata_only(server.url());
        let token = provider.access_token(&scopes()).await.unwrap();

        assert_eq!(token.secret(), "ya29.token");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_metadata_server_refusal_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock(
                "GET",
                "/computeMetadata/v1/instance/service-accounts/default/token",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let provider = AmbientCredentials::metadata_only(server.url());
        let err = provider.access_token(&scopes()).await.unwrap_err();

        assert!(matches!(err, AgreementsError::Transport(msg) if msg.contains("404")));
    }

    #[tokio::test]
    async fn test_unsupported_key_file_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, r#"{"type":"authorized_user","client_id":"x"}"#).unwrap();

        let provider = AmbientCredentials::metadata_only("http://127.0.0.1:1").with_key_file(&path);
        let err = provider.access_token(&scopes()).await.unwrap_err();

        assert!(matches!(err, AgreementsError::Transport(msg) if msg.contains("authorized_user")));
    }

    #[tokio::test]
    async fn test_missing_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = AmbientCredentials::metadata_only("http://127.0.0.1:1")
            .with_key_file(dir.path().join("absent.json"));

        let err = provider.access_token(&scopes()).await.unwrap_err();
        assert!(matches!(err, AgreementsError::Transport(_)));
    }
}
