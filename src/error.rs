//! Error types for widget configuration and rendering.

/// Result alias for widget configuration and rendering.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Sub-field names become posted keys and script identifiers.
    #[error("invalid sub-field name '{name}': expected an identifier")]
    InvalidFieldName { name: String },

    #[error("sub-field '{name}' pushes the multifield width past {max}px", max = u32::MAX)]
    WidthOverflow { name: String },

    #[error("failed to serialize client configuration: {0}")]
    Script(#[from] serde_json::Error),

    #[error("failed to write widget output: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_field_name(name: impl Into<String>) -> Self {
        Self::InvalidFieldName { name: name.into() }
    }
}
