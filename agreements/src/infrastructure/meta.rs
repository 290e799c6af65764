// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Service Descriptor (meta.json)
//!
//! Facety publishes a JSON document describing where its services live:
//!
//! ```json
//! {
//!   "host": {
//!     "agreements-grpc": "agreements.facety.tech:443",
//!     "agreements-grpc-variable": "FACETY_AGREEMENTS_HOST"
//!   }
//! }
//! ```
//!
//! The document is fetched with a single GET and cached for the lifetime of
//! the [`MetaCache`]. [`meta`] uses a process-wide cache for the well-known
//! URL, so the document is downloaded at most once per process.

use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::domain::error::AgreementsError;
use crate::domain::settings::ServiceDefaults;

pub const META_URL: &str = "https://static.facety.tech/meta.json";
pub const USER_AGENT: &str = "Facety/Rust";

/// The parsed descriptor document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Service keys to hosts, plus `<key>-variable` entries naming the
    /// environment variable that overrides each host. Entries that are not
    /// strings are kept but never read.
    #[serde(default)]
    pub host: Map<String, Value>,

    /// Sections this client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Meta {
    pub fn host(&self, service: &str) -> Option<&str> {
        self.host.get(service).and_then(Value::as_str)
    }

    pub fn host_variable(&self, service: &str) -> Option<&str> {
        self.host
            .get(&format!("{}-variable", service))
            .and_then(Value::as_str)
    }

    /// Defaults for one service key (e.g. `agreements-grpc`).
    pub fn service_defaults(&self, service: &str) -> Result<ServiceDefaults, AgreementsError> {
        let host_default = self.host(service).map(str::to_string);
        let host_variable = self.host_variable(service).map(str::to_string);

        if host_default.is_none() && host_variable.is_none() {
            return Err(AgreementsError::ConfigurationUnavailable(format!(
                "meta document has no host entry for '{}'",
                service
            )));
        }

        Ok(ServiceDefaults {
            host_variable,
            host_default,
            ..Default::default()
        })
    }
}

/// Write-once cache of the descriptor document.
pub struct MetaCache {
    url: String,
    client: Client,
    cell: OnceCell<Meta>,
}

impl MetaCache {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
            cell: OnceCell::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The cached document, fetching it on first access.
    ///
    /// A failed fetch leaves the cache empty, so a later call fetches again.
    pub async fn get(&self) -> Result<&Meta, AgreementsError> {
        self.cell.get_or_try_init(|| self.fetch()).await
    }

    async fn fetch(&self) -> Result<Meta, AgreementsError> {
        debug!(url = %self.url, "Fetching service descriptor document");

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| {
                AgreementsError::ConfigurationUnavailable(format!(
                    "failed to fetch {}: {}",
                    self.url, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgreementsError::ConfigurationUnavailable(format!(
                "{} answered {}",
                self.url, status
            )));
        }

        let body = response.text().await.map_err(|e| {
            AgreementsError::ConfigurationUnavailable(format!(
                "failed to read {}: {}",
                self.url, e
            ))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            AgreementsError::ConfigurationUnavailable(format!(
                "malformed descriptor document at {}: {}",
                self.url, e
            ))
        })
    }
}

static GLOBAL: Lazy<MetaCache> = Lazy::new(|| MetaCache::new(META_URL));

/// The process-wide cache for [`META_URL`].
pub fn global_cache() -> &'static MetaCache {
    &GLOBAL
}

/// The process-wide descriptor document from [`META_URL`].
pub async fn meta() -> Result<&'static Meta, AgreementsError> {
    GLOBAL.get().await
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "host": {
            "agreements-grpc": "agreements.facety.tech:443",
            "agreements-grpc-variable": "FACETY_AGREEMENTS_HOST"
        },
        "version": 3
    }"#;

    #[tokio::test]
    async fn test_document_is_fetched_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/meta.json")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(DOCUMENT)
            .expect(1)
            .create_async()
            .await;

        let cache = MetaCache::new(format!("{}/meta.json", server.url()));

        let first = cache.get().await.unwrap();
        assert_eq!(first.host("agreements-grpc"), Some("agreements.facety.tech:443"));
        assert_eq!(first.extra.get("version"), Some(&serde_json::json!(3)));

        for _ in 0..3 {
            let again = cache.get().await.unwrap();
            assert_eq!(again.host_variable("agreements-grpc"), Some("FACETY_AGREEMENTS_HOST"));
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/meta.json")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let cache = MetaCache::new(format!("{}/meta.json", server.url()));
        let err = cache.get().await.unwrap_err();

        assert!(matches!(err, AgreementsError::ConfigurationUnavailable(_)));
    }

    #[tokio::test]
    async fn test_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/meta.json")
            .with_status(503)
            .create_async()
            .await;

        let cache = MetaCache::new(format!("{}/meta.json", server.url()));
        let err = cache.get().await.unwrap_err();

        assert!(matches!(err, AgreementsError::ConfigurationUnavailable(msg) if msg.contains("503")));
    }

    #[test]
    fn test_service_defaults() {
        let meta: Meta = serde_json::from_str(DOCUMENT).unwrap();

        let defaults = meta.service_defaults("agreements-grpc").unwrap();
        assert_eq!(defaults.host_default.as_deref(), Some("agreements.facety.tech:443"));
        assert_eq!(defaults.host_variable.as_deref(), Some("FACETY_AGREEMENTS_HOST"));
        assert!(!defaults.insecure_default);

        assert!(meta.service_defaults("billing-grpc").is_err());
    }

    #[test]
    fn test_non_string_host_entries_are_ignored() {
        let meta: Meta = serde_json::from_str(
            r#"{
                "host": {
                    "agreements-grpc": "agreements.facety.tech:443",
                    "agreements-grpc-port": 443,
                    "billing-grpc": {"region": "eu"},
                    "billing-grpc-variable": null
                }
            }"#,
        )
        .unwrap();

        let defaults = meta.service_defaults("agreements-grpc").unwrap();
        assert_eq!(defaults.host_default.as_deref(), Some("agreements.facety.tech:443"));
        assert_eq!(defaults.host_variable, None);

        assert_eq!(meta.host("agreements-grpc-port"), None);
        assert!(matches!(
            meta.service_defaults("billing-grpc"),
            Err(AgreementsError::ConfigurationUnavailable(_))
        ));
    }
}
