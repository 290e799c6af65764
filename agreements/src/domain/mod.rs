// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Plain types shared by the normalizer, the invoker and the service clients.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Errors, request/response shapes and client settings

pub mod error;
pub mod payload;
pub mod settings;

pub use error::AgreementsError;
pub use payload::{CanonicalMessage, Reply, RequestPayload, ResponseShape};
pub use settings::{ClientOptions, ClientSettings, Scopes, ServiceDefaults};
