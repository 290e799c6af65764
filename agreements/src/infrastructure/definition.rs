// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Access to the `.proto` source shipped with the crate.

use std::path::Path;

use crate::domain::error::AgreementsError;

/// `agreements.proto` as compiled into this crate.
const BUNDLED: &str = include_str!("../../proto/agreements.proto");

/// Content of the bundled `agreements.proto`.
pub fn proto() -> Result<String, AgreementsError> {
    Ok(BUNDLED.to_string())
}

/// Print the bundled `agreements.proto` to stdout.
pub fn print_proto() -> Result<(), AgreementsError> {
    println!("{}", proto()?);
    Ok(())
}

/// Content of a protocol definition file.
pub fn proto_at(path: impl AsRef<Path>) -> Result<String, AgreementsError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(AgreementsError::MissingProtocolDefinition(format!(
            "{} (find it in the service documentation)",
            path.display()
        )));
    }

    std::fs::read_to_string(path).map_err(|e| {
        AgreementsError::MissingProtocolDefinition(format!("{}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_definition() {
        let content = proto().unwrap();
        assert!(content.contains("service Adoption"));
        assert!(content.contains("service Receiving"));
    }

    #[test]
    fn test_bundled_definition_matches_source() {
        let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("proto/agreements.proto");

        assert_eq!(proto().unwrap(), BUNDLED);
        assert_eq!(proto().unwrap(), proto_at(source).unwrap());
    }

    #[test]
    fn test_missing_definition() {
        let dir = tempfile::tempdir().unwrap();
        let err = proto_at(dir.path().join("agreements.proto")).unwrap_err();

        assert!(matches!(err, AgreementsError::MissingProtocolDefinition(_)));
    }
}
