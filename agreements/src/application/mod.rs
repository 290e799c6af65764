// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application
//!
//! Request normalization, the single-call message invoker and the service
//! clients built on them.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Orchestrates normalize → invoke → shape for each call

pub mod clients;
pub mod invoker;
pub mod normalizer;
