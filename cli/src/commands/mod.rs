// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the Facety CLI

pub mod adoption;
pub mod receiving;
pub mod schema;

pub use self::adoption::AdoptionCommand;
pub use self::receiving::ReceivingCommand;

use std::fmt::Debug;

use anyhow::{Context, Result};
use facety_agreements::Reply;
use serde_json::Value;

/// Parse a JSON argument; `@path` reads the JSON from a file.
pub fn read_payload(arg: &str) -> Result<Value> {
    let raw = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file {}", path))?,
        None => arg.to_string(),
    };

    serde_json::from_str(&raw).context("Payload is not valid JSON")
}

/// Render a reply: pretty JSON for mappings, `Debug` for typed messages.
pub fn render<T: Debug>(reply: Reply<T>) -> Result<String> {
    match reply {
        Reply::Mapping(fields) => Ok(serde_json::to_string_pretty(&Value::Object(fields))?),
        Reply::Typed(message) => Ok(format!("{:#?}", message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inline_payload() {
        assert_eq!(read_payload(r#"{"id":"aaa"}"#).unwrap(), json!({"id": "aaa"}));
    }

    #[test]
    fn test_payload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selector.json");
        std::fs::write(&path, r#"{"id": "bbb"}"#).unwrap();

        let value = read_payload(&format!("@{}", path.display())).unwrap();
        assert_eq!(value, json!({"id": "bbb"}));
    }

    #[test]
    fn test_invalid_payload() {
        assert!(read_payload("{id: aaa}").is_err());
    }

    #[test]
    fn test_render_mapping() {
        let reply: Reply<()> = Reply::Mapping(
            json!({"id": "aaa"}).as_object().cloned().unwrap(),
        );
        assert_eq!(render(reply).unwrap(), "{\n  \"id\": \"aaa\"\n}");
    }
}
