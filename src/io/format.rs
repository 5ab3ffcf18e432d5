use std::{fmt, path::Path, str::FromStr};

/// Data formats a widget document can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
    #[cfg(feature = "toml")]
    Toml,
}

impl DocumentFormat {
    /// Guess the format from a file extension; unknown extensions read as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or(DocumentFormat::Json)
    }

    /// Canonical file extension, also used in error messages.
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => "yaml",
            #[cfg(feature = "toml")]
            DocumentFormat::Toml => "toml",
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            #[cfg(feature = "toml")]
            "toml" => Ok(DocumentFormat::Toml),
            other => Err(format!("unsupported document format '{other}'")),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_json_by_default() {
        assert_eq!(DocumentFormat::from_path("widget.json"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path("widget"), DocumentFormat::Json);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let format = DocumentFormat::Json;
        assert_eq!(format.to_string().parse::<DocumentFormat>(), Ok(format));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn detects_toml_extension() {
        assert_eq!(DocumentFormat::from_path("w.toml"), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::Toml.to_string(), "toml");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn detects_yaml_extensions() {
        assert_eq!(DocumentFormat::from_path("w.yml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path("w.YAML"), DocumentFormat::Yaml);
    }
}
