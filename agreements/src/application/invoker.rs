// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Message Invoker
//!
//! Performs exactly one unary call: open a channel, call the method named by
//! a [`RemoteMethod`], drop the channel, shape the response. There are no
//! retries and no deadlines here; callers that need them wrap the call.

use tonic::codegen::http::uri::PathAndQuery;
use tracing::debug;

use crate::domain::error::AgreementsError;
use crate::domain::payload::{CanonicalMessage, Reply, ResponseShape};
use crate::domain::settings::ClientSettings;
use crate::infrastructure::channel;
use crate::infrastructure::credentials::CredentialProvider;

use super::normalizer;

/// A unary method of a remote service, identified by name.
pub trait RemoteMethod {
    type Request: CanonicalMessage;
    type Response: CanonicalMessage;

    /// Fully qualified service name, e.g. `agreements.Adoption`.
    const SERVICE: &'static str;
    /// Method name as declared in the schema, e.g. `CheckProtocol`.
    const METHOD: &'static str;

    fn path() -> String {
        format!("/{}/{}", Self::SERVICE, Self::METHOD)
    }
}

/// Call `M` once with an already normalized request.
pub async fn get_message<M: RemoteMethod>(
    settings: &ClientSettings,
    credentials: &dyn CredentialProvider,
    request: M::Request,
    shape: ResponseShape,
) -> Result<Reply<M::Response>, AgreementsError> {
    let path = PathAndQuery::try_from(M::path()).map_err(|e| {
        AgreementsError::MissingProtocolDefinition(format!("invalid method path {}: {}", M::path(), e))
    })?;

    let response = {
        let channel = channel::open(settings, credentials).await?;
        let mut grpc = tonic::client::Grpc::new(channel);

        grpc.ready()
            .await
            .map_err(|e| AgreementsError::Transport(format!("service was not ready: {}", e)))?;

        debug!(method = %path, host = %settings.host, "Invoking remote method");
        let codec = tonic_prost::ProstCodec::<M::Request, M::Response>::default();
        grpc.unary(tonic::Request::new(request), path, codec).await?
    };

    normalizer::shape(response.into_inner(), shape)
}
