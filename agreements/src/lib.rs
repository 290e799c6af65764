// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Facety Agreements
//!
//! Working with agreements, their versions and acceptance protocols: clients
//! for the `Adoption` and `Receiving` gRPC services, the generated messages
//! and the bundled `.proto` definition.
//!
//! # Architecture
//!
//! - **Layer:** Library root
//! - **Purpose:** Re-exports the public client surface

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::clients::{AdoptionClient, AgreementsClient, ReceivingClient};
pub use application::invoker::{get_message, RemoteMethod};
pub use application::normalizer::{flatten, normalize};
pub use domain::*;
pub use infrastructure::credentials::{
    AccessToken, AmbientCredentials, CredentialProvider, StaticToken,
};
pub use infrastructure::definition::{print_proto, proto, proto_at};
pub use infrastructure::meta::{meta, Meta, MetaCache};

/// Generated messages, plus client stubs and server traits per service.
pub use infrastructure::proto::agreements as messages;
