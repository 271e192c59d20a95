//! Loading IR documents from JSON.
//!
//! The IR is produced by an upstream parser; this module only turns the
//! JSON document into typed structs. Structural consistency between
//! declarations (e.g. an endpoint naming an undeclared error) is not
//! checked here.

use crate::types::IntermediateRepresentation;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Errors while reading or decoding an IR document.
#[derive(Debug, thiserror::Error)]
pub enum IrError {
    /// The IR file could not be read.
    #[error("error reading IR file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the IR schema.
    #[error("invalid IR document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode an IR document from an already-parsed JSON value.
pub fn from_json(value: &serde_json::Value) -> Result<IntermediateRepresentation, IrError> {
    Ok(IntermediateRepresentation::deserialize(value)?)
}

/// Decode an IR document from JSON text.
pub fn from_str(s: &str) -> Result<IntermediateRepresentation, IrError> {
    Ok(serde_json::from_str(s)?)
}

/// Read and decode an IR document from disk.
pub fn load(path: &Path) -> Result<IntermediateRepresentation, IrError> {
    let text = std::fs::read_to_string(path).map_err(|source| IrError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn minimal() -> serde_json::Value {
        json!({
            "apiName": "petstore",
            "types": [
                {"name": {"name": "Pet"}, "audiences": ["public"]}
            ],
            "errors": [],
            "services": [
                {
                    "name": {"path": ["pets"]},
                    "endpoints": [
                        {
                            "name": "get",
                            "method": "GET",
                            "path": "/pets/{id}",
                            "response": {"_type": "named", "name": "Pet"}
                        }
                    ]
                }
            ]
        })
    }

    #[test]
    fn from_json_reads_declarations() {
        let ir = from_json(&minimal()).unwrap();
        assert_eq!(ir.api_name, "petstore");
        assert_eq!(ir.types.len(), 1);
        assert_eq!(ir.types[0].audiences, vec!["public".to_string()]);
        assert_eq!(ir.services[0].endpoints[0].name, "get");
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let ir = from_json(&json!({"apiName": "empty"})).unwrap();
        assert!(ir.types.is_empty());
        assert!(ir.errors.is_empty());
        assert!(ir.services.is_empty());
    }

    #[test]
    fn missing_api_name_is_rejected() {
        let err = from_json(&json!({"types": []})).unwrap_err();
        assert!(matches!(err, IrError::Json(_)));
        assert!(err.to_string().contains("apiName"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", minimal()).unwrap();
        let ir = load(file.path()).unwrap();
        assert_eq!(ir.api_name, "petstore");
    }

    #[test]
    fn load_reports_path_on_missing_file() {
        let err = load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, IrError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn round_trip_preserves_shape() {
        let value = json!({
            "apiName": "shapes",
            "types": [{
                "name": {"name": "Color"},
                "shape": {"_type": "enum", "values": ["RED", "GREEN"]}
            }]
        });
        let ir = from_json(&value).unwrap();
        let back = serde_json::to_value(&ir).unwrap();
        assert_eq!(
            back["types"][0]["shape"],
            json!({"_type": "enum", "values": ["RED", "GREEN"]})
        );
    }
}
