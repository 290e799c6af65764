// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure
//!
//! Generated protocol code, descriptors, channels, credentials and the
//! service descriptor document.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** Everything that touches the network, the filesystem or
//!   generated code

pub mod channel;
pub mod credentials;
pub mod definition;
pub mod descriptors;
pub mod meta;
pub mod proto;
