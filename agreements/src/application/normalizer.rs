// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Request normalization and response flattening
//!
//! JSON objects are mapped onto generated messages using the canonical
//! protobuf JSON mapping: keys are the lowerCamelCase JSON names (proto field
//! names are accepted as well), nested objects become nested messages,
//! arrays become repeated fields and objects under map fields become maps.
//! Well-known types use their JSON forms (e.g. RFC 3339 strings for
//! `google.protobuf.Timestamp`).

use prost_reflect::{DynamicMessage, SerializeOptions};
use serde_json::{Map, Value};

use crate::domain::error::AgreementsError;
use crate::domain::payload::{CanonicalMessage, Reply, RequestPayload, ResponseShape};
use crate::infrastructure::descriptors;

/// Turn a caller payload into the canonical message `T`.
///
/// A typed payload is returned unchanged. A JSON object is parsed into a new
/// `T`; unknown keys or values of the wrong type are a
/// [`AgreementsError::SchemaMismatch`]. Any other JSON value is an
/// [`AgreementsError::UnsupportedInputType`].
pub fn normalize<T: CanonicalMessage>(
    payload: impl Into<RequestPayload<T>>,
) -> Result<T, AgreementsError> {
    match payload.into() {
        RequestPayload::Typed(message) => Ok(message),
        RequestPayload::Raw(Value::Object(fields)) => from_mapping(fields),
        RequestPayload::Raw(other) => Err(AgreementsError::UnsupportedInputType {
            expected: T::FULL_NAME,
            found: json_kind(&other),
        }),
    }
}

fn from_mapping<T: CanonicalMessage>(fields: Map<String, Value>) -> Result<T, AgreementsError> {
    let mismatch = |reason: String| AgreementsError::SchemaMismatch {
        message_type: T::FULL_NAME,
        reason,
    };

    let descriptor = descriptors::message(T::FULL_NAME)?;
    let dynamic = DynamicMessage::deserialize(descriptor, Value::Object(fields))
        .map_err(|e| mismatch(e.to_string()))?;

    dynamic.transcode_to::<T>().map_err(|e| mismatch(e.to_string()))
}

/// Flatten a message into a JSON object; fields holding their default value
/// are left out.
pub fn flatten<T: CanonicalMessage>(message: &T) -> Result<Map<String, Value>, AgreementsError> {
    let mismatch = |reason: String| AgreementsError::SchemaMismatch {
        message_type: T::FULL_NAME,
        reason,
    };

    let mut dynamic = DynamicMessage::new(descriptors::message(T::FULL_NAME)?);
    dynamic
        .transcode_from(message)
        .map_err(|e| mismatch(e.to_string()))?;

    let value = dynamic
        .serialize_with_options(serde_json::value::Serializer, &SerializeOptions::new())
        .map_err(|e| mismatch(e.to_string()))?;

    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(mismatch(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Hand a response back in the requested shape.
pub fn shape<T: CanonicalMessage>(
    message: T,
    shape: ResponseShape,
) -> Result<Reply<T>, AgreementsError> {
    match shape {
        ResponseShape::Simple => flatten(&message).map(Reply::Mapping),
        ResponseShape::Typed => Ok(Reply::Typed(message)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
