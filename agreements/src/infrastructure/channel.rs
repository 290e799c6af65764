// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Per-call gRPC channels
//!
//! A channel is opened for exactly one invocation and dropped with it.
//!
//! - **Insecure**: plaintext HTTP/2 straight to the address, no credentials.
//! - **Secure**: TLS (webpki roots) with an `authorization: Bearer` header
//!   added to every request by [`BearerAuth`].
//!
//! Addresses without a scheme get `http://` or `https://` depending on the
//! mode. Connection and credential failures become
//! [`AgreementsError::Transport`].

use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::interceptor::InterceptedService;
use tonic::service::Interceptor;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::{Request, Status};
use tracing::debug;

use crate::domain::error::AgreementsError;
use crate::domain::settings::ClientSettings;
use crate::infrastructure::credentials::CredentialProvider;

pub type AgreementsChannel = InterceptedService<Channel, BearerAuth>;

/// Attaches the bearer token, if any, to outgoing requests.
#[derive(Clone, Default)]
pub struct BearerAuth {
    header: Option<MetadataValue<Ascii>>,
}

impl BearerAuth {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn bearer(token: &str) -> Result<Self, AgreementsError> {
        let header = format!("Bearer {}", token)
            .parse::<MetadataValue<Ascii>>()
            .map_err(|_| {
                AgreementsError::Transport("access token is not a valid header value".to_string())
            })?;

        Ok(Self {
            header: Some(header),
        })
    }
}

impl Interceptor for BearerAuth {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if let Some(header) = &self.header {
            request
                .metadata_mut()
                .insert("authorization", header.clone());
        }
        Ok(request)
    }
}

fn address(host: &str, scheme: &str) -> String {
    if host.contains("://") {
        host.to_string()
    } else {
        format!("{}://{}", scheme, host)
    }
}

fn endpoint(addr: String) -> Result<Endpoint, AgreementsError> {
    Endpoint::from_shared(addr.clone())
        .map_err(|e| AgreementsError::Transport(format!("invalid address {}: {}", addr, e)))
}

/// Server name checked against the TLS certificate.
fn tls_domain(endpoint: &Endpoint) -> Result<String, AgreementsError> {
    endpoint
        .uri()
        .host()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AgreementsError::Transport(format!(
                "address {} has no host name for TLS",
                endpoint.uri()
            ))
        })
}

async fn connect(endpoint: Endpoint) -> Result<Channel, AgreementsError> {
    let uri = endpoint.uri().clone();
    endpoint
        .connect()
        .await
        .map_err(|e| AgreementsError::Transport(format!("failed to connect to {}: {}", uri, e)))
}

/// Open a channel for one call according to `settings`.
pub async fn open(
    settings: &ClientSettings,
    credentials: &dyn CredentialProvider,
) -> Result<AgreementsChannel, AgreementsError> {
    if settings.insecure {
        debug!(host = %settings.host, "Opening insecure channel");
        let channel = connect(endpoint(address(&settings.host, "http"))?).await?;
        return Ok(InterceptedService::new(channel, BearerAuth::none()));
    }

    let token = credentials.access_token(settings.scopes.as_slice()).await?;
    let auth = BearerAuth::bearer(token.secret())?;

    let endpoint = endpoint(address(&settings.host, "https"))?;
    let domain = tls_domain(&endpoint)?;
    let tls = ClientTlsConfig::new()
        .with_webpki_roots()
        .domain_name(domain);
    let endpoint = endpoint
        .tls_config(tls)
        .map_err(|e| AgreementsError::Transport(format!("invalid TLS configuration: {}", e)))?;

    debug!(host = %settings.host, "Opening authorized channel");
    let channel = connect(endpoint).await?;

    Ok(InterceptedService::new(channel, auth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_scheme() {
        assert_eq!(address("localhost:2002", "http"), "http://localhost:2002");
        assert_eq!(address("agreements.facety.tech:443", "https"), "https://agreements.facety.tech:443");
        assert_eq!(address("http://10.0.0.1:80", "https"), "http://10.0.0.1:80");
    }

    #[test]
    fn test_tls_domain() {
        let endpoint = Endpoint::from_static("https://agreements.facety.tech:443");
        assert_eq!(tls_domain(&endpoint).unwrap(), "agreements.facety.tech");

        let endpoint = Endpoint::from_static("/agreements.Adoption");
        assert!(matches!(
            tls_domain(&endpoint),
            Err(AgreementsError::Transport(msg)) if msg.contains("no host name")
        ));
    }

    #[test]
    fn test_bearer_header_is_added() {
        let mut auth = BearerAuth::bearer("ya29.token").unwrap();
        let request = auth.call(Request::new(())).unwrap();

        assert_eq!(
            request.metadata().get("authorization").unwrap(),
            "Bearer ya29.token"
        );
    }

    #[test]
    fn test_no_header_without_token() {
        let mut auth = BearerAuth::none();
        let request = auth.call(Request::new(())).unwrap();

        assert!(request.metadata().get("authorization").is_none());
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        assert!(matches!(
            BearerAuth::bearer("bad\ntoken"),
            Err(AgreementsError::Transport(_))
        ));
    }
}
