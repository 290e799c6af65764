// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Compiled descriptors for the agreements schema.
//!
//! `build.rs` writes a `FileDescriptorSet` (including the imported
//! well-known types) into `OUT_DIR`; it is embedded here and decoded once.

use once_cell::sync::OnceCell;
use prost_reflect::{DescriptorPool, MessageDescriptor};

use crate::domain::error::AgreementsError;

static DESCRIPTOR_SET: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/agreements_descriptor.bin"));

static POOL: OnceCell<DescriptorPool> = OnceCell::new();

pub fn pool() -> Result<&'static DescriptorPool, AgreementsError> {
    POOL.get_or_try_init(|| {
        DescriptorPool::decode(DESCRIPTOR_SET).map_err(|e| {
            AgreementsError::MissingProtocolDefinition(format!(
                "embedded descriptor set is unreadable: {}",
                e
            ))
        })
    })
}

/// Look up a message descriptor by its fully qualified name.
pub fn message(full_name: &str) -> Result<MessageDescriptor, AgreementsError> {
    pool()?
        .get_message_by_name(full_name)
        .ok_or_else(|| AgreementsError::MissingProtocolDefinition(full_name.to_string()))
}
