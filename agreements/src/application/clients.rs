// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Agreements Service Clients
//!
//! Clients for working with agreements, their versions and acceptance
//! protocols:
//!
//! - [`AdoptionClient`]: record and check acceptance protocols and remarks
//! - [`ReceivingClient`]: fetch agreement texts and their metadata
//!
//! Every method accepts either the generated request message or a JSON
//! object, and answers either with a JSON object ([`ResponseShape::Simple`])
//! or the generated response message ([`ResponseShape::Typed`]).
//!
//! # Usage
//!
//! ```ignore
//! use facety_agreements::{AdoptionClient, ClientOptions, ResponseShape};
//! use serde_json::json;
//!
//! let client = AdoptionClient::connect(ClientOptions::default()).await?;
//! let verdict = client
//!     .check_protocol(json!({"id": "aaa"}), ResponseShape::Simple)
//!     .await?;
//! ```

use std::sync::Arc;

use crate::domain::error::AgreementsError;
use crate::domain::payload::{Reply, RequestPayload, ResponseShape};
use crate::domain::settings::{ClientOptions, ClientSettings, ServiceDefaults};
use crate::infrastructure::credentials::{AmbientCredentials, CredentialProvider};
use crate::infrastructure::meta::{self, MetaCache};
use crate::infrastructure::proto::agreements::{
    Agreements, Protocol, Remark, Selector, User, Verdict,
};

use super::invoker::{self, RemoteMethod};
use super::normalizer;

/// Key of the agreements service in the meta document.
pub const SERVICE_KEY: &str = "agreements-grpc";

const ADOPTION: &str = "agreements.Adoption";
const RECEIVING: &str = "agreements.Receiving";

pub struct CheckProtocol;
pub struct AddProtocol;
pub struct AddRemark;
pub struct Texts;

impl RemoteMethod for CheckProtocol {
    type Request = Selector;
    type Response = Verdict;
    const SERVICE: &'static str = ADOPTION;
    const METHOD: &'static str = "CheckProtocol";
}

impl RemoteMethod for AddProtocol {
    type Request = Protocol;
    type Response = Selector;
    const SERVICE: &'static str = ADOPTION;
    const METHOD: &'static str = "AddProtocol";
}

impl RemoteMethod for AddRemark {
    type Request = Remark;
    type Response = ();
    const SERVICE: &'static str = ADOPTION;
    const METHOD: &'static str = "AddRemark";
}

impl RemoteMethod for Texts {
    type Request = User;
    type Response = Agreements;
    const SERVICE: &'static str = RECEIVING;
    const METHOD: &'static str = "Texts";
}

/// Settings and credentials shared by the agreements service clients.
#[derive(Clone)]
pub struct AgreementsClient {
    settings: ClientSettings,
    credentials: Arc<dyn CredentialProvider>,
}

impl AgreementsClient {
    /// Use fully resolved settings; nothing is fetched.
    pub fn with_settings(settings: ClientSettings) -> Self {
        Self {
            settings,
            credentials: Arc::new(AmbientCredentials::from_env()),
        }
    }

    /// Resolve `options` against the service defaults published in the
    /// process-wide meta document.
    ///
    /// The document is only needed (and fetched) when no host is given.
    pub async fn connect(options: ClientOptions) -> Result<Self, AgreementsError> {
        Self::connect_with(options, meta::global_cache()).await
    }

    /// Like [`AgreementsClient::connect`], with an explicit meta cache.
    pub async fn connect_with(
        options: ClientOptions,
        cache: &MetaCache,
    ) -> Result<Self, AgreementsError> {
        // An empty host counts as absent, as in settings resolution
        let explicit_host = options.host.as_deref().is_some_and(|h| !h.is_empty());
        let defaults = if explicit_host {
            ServiceDefaults::default()
        } else {
            cache.get().await?.service_defaults(SERVICE_KEY)?
        };

        ClientSettings::resolve(options, &defaults).map(Self::with_settings)
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn call<M: RemoteMethod>(
        &self,
        payload: impl Into<RequestPayload<M::Request>>,
        shape: ResponseShape,
    ) -> Result<Reply<M::Response>, AgreementsError> {
        let request = normalizer::normalize(payload)?;
        invoker::get_message::<M>(&self.settings, self.credentials.as_ref(), request, shape).await
    }
}

macro_rules! service_client {
    ($client:ident) => {
        impl $client {
            pub fn with_settings(settings: ClientSettings) -> Self {
                Self {
                    inner: AgreementsClient::with_settings(settings),
                }
            }

            pub async fn connect(options: ClientOptions) -> Result<Self, AgreementsError> {
                AgreementsClient::connect(options)
                    .await
                    .map(|inner| Self { inner })
            }

            pub async fn connect_with(
                options: ClientOptions,
                cache: &MetaCache,
            ) -> Result<Self, AgreementsError> {
                AgreementsClient::connect_with(options, cache)
                    .await
                    .map(|inner| Self { inner })
            }

            pub fn with_credentials(self, credentials: Arc<dyn CredentialProvider>) -> Self {
                Self {
                    inner: self.inner.with_credentials(credentials),
                }
            }

            pub fn settings(&self) -> &ClientSettings {
                self.inner.settings()
            }
        }

        impl From<AgreementsClient> for $client {
            fn from(inner: AgreementsClient) -> Self {
                Self { inner }
            }
        }
    };
}

/// Client for the `Adoption` service.
#[derive(Clone)]
pub struct AdoptionClient {
    inner: AgreementsClient,
}

service_client!(AdoptionClient);

impl AdoptionClient {
    /// Check the acceptance protocol behind a selector.
    pub async fn check_protocol(
        &self,
        selector: impl Into<RequestPayload<Selector>>,
        shape: ResponseShape,
    ) -> Result<Reply<Verdict>, AgreementsError> {
        self.inner.call::<CheckProtocol>(selector, shape).await
    }

    /// Store a new acceptance protocol; answers with its selector.
    pub async fn add_protocol(
        &self,
        protocol: impl Into<RequestPayload<Protocol>>,
        shape: ResponseShape,
    ) -> Result<Reply<Selector>, AgreementsError> {
        self.inner.call::<AddProtocol>(protocol, shape).await
    }

    /// Attach a country remark to a protocol. The simple reply is `{}`.
    pub async fn add_remark(
        &self,
        remark: impl Into<RequestPayload<Remark>>,
        shape: ResponseShape,
    ) -> Result<Reply<()>, AgreementsError> {
        self.inner.call::<AddRemark>(remark, shape).await
    }
}

/// Client for the `Receiving` service.
#[derive(Clone)]
pub struct ReceivingClient {
    inner: AgreementsClient,
}

service_client!(ReceivingClient);

impl ReceivingClient {
    /// Texts of the agreements for a user's languages and country.
    pub async fn get_texts(
        &self,
        user: impl Into<RequestPayload<User>>,
        shape: ResponseShape,
    ) -> Result<Reply<Agreements>, AgreementsError> {
        self.inner.call::<Texts>(user, shape).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_paths() {
        assert_eq!(CheckProtocol::path(), "/agreements.Adoption/CheckProtocol");
        assert_eq!(AddProtocol::path(), "/agreements.Adoption/AddProtocol");
        assert_eq!(AddRemark::path(), "/agreements.Adoption/AddRemark");
        assert_eq!(Texts::path(), "/agreements.Receiving/Texts");
    }

    #[test]
    fn test_method_paths_exist_in_schema() {
        let pool = crate::infrastructure::descriptors::pool().unwrap();
        for (service, method) in [
            (CheckProtocol::SERVICE, CheckProtocol::METHOD),
            (AddProtocol::SERVICE, AddProtocol::METHOD),
            (AddRemark::SERVICE, AddRemark::METHOD),
            (Texts::SERVICE, Texts::METHOD),
        ] {
            let service = pool.get_service_by_name(service).unwrap();
            assert!(service.methods().any(|m| m.name() == method), "{} missing", method);
        }
    }

    #[tokio::test]
    async fn test_explicit_host_skips_meta_document() {
        // Unroutable cache URL: any fetch attempt would fail the test.
        let cache = MetaCache::new("http://127.0.0.1:1/meta.json");
        let client = ReceivingClient::connect_with(
            ClientOptions::default().host("localhost:2002").insecure(true),
            &cache,
        )
        .await
        .unwrap();

        assert_eq!(client.settings().host, "localhost:2002");
        assert!(client.settings().insecure);
    }

    #[tokio::test]
    async fn test_defaults_come_from_meta_document() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/meta.json")
            .with_status(200)
            .with_body(r#"{"host":{"agreements-grpc":"agreements.facety.tech:443","agreements-grpc-variable":"FACETY_TEST_UNSET_AGREEMENTS_HOST"}}"#)
            .create_async()
            .await;

        let cache = MetaCache::new(format!("{}/meta.json", server.url()));
        let client = AdoptionClient::connect_with(ClientOptions::default(), &cache)
            .await
            .unwrap();

        assert_eq!(client.settings().host, "agreements.facety.tech:443");
        assert_eq!(client.settings().scopes.as_slice(), ["agreements.facety.tech:443"]);
        assert!(!client.settings().insecure);
    }

    #[tokio::test]
    async fn test_empty_host_falls_back_to_meta_document() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/meta.json")
            .with_status(200)
            .with_body(r#"{"host":{"agreements-grpc":"agreements.facety.tech:443","agreements-grpc-variable":"FACETY_TEST_UNSET_AGREEMENTS_HOST"}}"#)
            .expect(1)
            .create_async()
            .await;

        let cache = MetaCache::new(format!("{}/meta.json", server.url()));
        let client = ReceivingClient::connect_with(ClientOptions::default().host(""), &cache)
            .await
            .unwrap();

        assert_eq!(client.settings().host, "agreements.facety.tech:443");
        mock.assert_async().await;
    }
}
