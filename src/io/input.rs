use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;

/// Decode a widget document into a JSON value, whatever format it was written in.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    let parsed: Result<Value> = match format {
        DocumentFormat::Json => serde_json::from_str(contents).map_err(Into::into),
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::from_str(contents).map_err(Into::into),
        // A document is a table; `toml::Value` only parses a single value.
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<toml::Table>(contents)
            .map_err(anyhow::Error::from)
            .and_then(|table| serde_json::to_value(table).map_err(Into::into)),
    };
    parsed.with_context(|| format!("failed to parse {format} widget document"))
}

/// Read and parse a document, picking the format from its extension.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_document_str(&contents, DocumentFormat::from_path(path))
        .with_context(|| format!("invalid document {}", path.display()))
}
