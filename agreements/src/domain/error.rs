// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use thiserror::Error;

/// Every failure the agreements client can report.
///
/// Errors are handed back to the caller exactly as they occurred. Nothing in
/// this crate retries a call or swallows a failure.
#[derive(Debug, Error)]
pub enum AgreementsError {
    /// The payload was neither a JSON object nor the expected message.
    #[error("The request should be a JSON object or a {expected} instance, got {found}")]
    UnsupportedInputType {
        expected: &'static str,
        found: &'static str,
    },

    /// A JSON object did not fit the message schema.
    #[error("Payload does not match {message_type}: {reason}")]
    SchemaMismatch {
        message_type: &'static str,
        reason: String,
    },

    /// The channel or its credentials could not be established.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote method answered with a non-OK status.
    #[error("Remote call failed: {0}")]
    RemoteCall(#[from] tonic::Status),

    /// The service descriptor document could not be fetched or parsed.
    #[error("Configuration unavailable: {0}")]
    ConfigurationUnavailable(String),

    /// A protocol definition (source file or compiled descriptor) is absent.
    #[error("Protocol definition not found: {0}")]
    MissingProtocolDefinition(String),
}

impl AgreementsError {
    /// The gRPC status for [`AgreementsError::RemoteCall`], if that is what this is.
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            Self::RemoteCall(status) => Some(status),
            _ => None,
        }
    }
}
