// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Request and response shapes at the client boundary.
//!
//! Callers may hand a request over either as a loose JSON value or as the
//! generated message, and may ask for the reply either as a JSON object or
//! as the generated message.

use serde_json::{Map, Value};

/// A generated message that requests and responses are normalized into.
pub trait CanonicalMessage: prost::Message + Default + Clone + Send + Sync + 'static {
    /// Fully qualified protobuf name, e.g. `agreements.Selector`.
    const FULL_NAME: &'static str;
}

/// A request as supplied by the caller, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPayload<T> {
    /// Loose JSON; only objects can be turned into a message.
    Raw(Value),
    /// Already the canonical message.
    Typed(T),
}

impl<T> From<Value> for RequestPayload<T> {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl<T> From<Map<String, Value>> for RequestPayload<T> {
    fn from(fields: Map<String, Value>) -> Self {
        Self::Raw(Value::Object(fields))
    }
}

/// How the reply of a remote call is handed back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseShape {
    /// A JSON object keyed by field name; unset fields are left out.
    #[default]
    Simple,
    /// The generated response message, untouched.
    Typed,
}

impl ResponseShape {
    pub fn from_simple(simple: bool) -> Self {
        if simple {
            Self::Simple
        } else {
            Self::Typed
        }
    }
}

/// The reply of a remote call in the shape the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Mapping(Map<String, Value>),
    Typed(T),
}

impl<T> Reply<T> {
    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Mapping(fields) => Some(fields),
            Self::Typed(_) => None,
        }
    }

    pub fn into_mapping(self) -> Option<Map<String, Value>> {
        match self {
            Self::Mapping(fields) => Some(fields),
            Self::Typed(_) => None,
        }
    }

    pub fn into_typed(self) -> Option<T> {
        match self {
            Self::Typed(message) => Some(message),
            Self::Mapping(_) => None,
        }
    }
}
