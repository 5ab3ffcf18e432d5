//! Translation of user-facing messages.
//!
//! Messages are keyed by their English text. Positional arguments are written
//! as `^1`, `^2`, ... inside the template and substituted after lookup, so a
//! template without arguments keeps its markers for the client to fill in.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const MSG_MUST_BE_NUMERIC: &str = "The field ^1 must be numeric";
pub const MSG_REQUIRED: &str = "The field ^1 is required";
pub const MSG_REGISTER: &str = "Register";
pub const MSG_DELETE: &str = "Delete";
pub const MSG_CANCEL: &str = "Cancel";

/// Collaborator that turns a message template into user-facing text.
pub trait Translator: fmt::Debug + Send + Sync {
    fn translate(&self, template: &str, args: &[&str]) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
    Es,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "pt" => Ok(Language::Pt),
            "es" => Ok(Language::Es),
            other => Err(format!("unsupported language '{other}'")),
        }
    }
}

/// Built-in catalogue covering the messages emitted by this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreTranslator {
    language: Language,
}

impl CoreTranslator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn lookup(&self, template: &str) -> Option<&'static str> {
        let entry = CATALOGUE.iter().find(|entry| entry.0 == template)?;
        match self.language {
            Language::En => Some(entry.0),
            Language::Pt => Some(entry.1),
            Language::Es => Some(entry.2),
        }
    }
}

impl Translator for CoreTranslator {
    fn translate(&self, template: &str, args: &[&str]) -> String {
        let text = self.lookup(template).unwrap_or(template);
        substitute(text, args)
    }
}

// (en, pt, es)
const CATALOGUE: &[(&str, &str, &str)] = &[
    (
        MSG_MUST_BE_NUMERIC,
        "O campo ^1 deve ser numérico",
        "El campo ^1 debe ser numérico",
    ),
    (
        MSG_REQUIRED,
        "O campo ^1 é obrigatório",
        "El campo ^1 es obligatorio",
    ),
    (MSG_REGISTER, "Registrar", "Registrar"),
    (MSG_DELETE, "Excluir", "Borrar"),
    (MSG_CANCEL, "Cancelar", "Cancelar"),
];

/// Replace `^N` markers with the matching 1-based argument.
///
/// Higher indexes are substituted first so `^1` never clobbers the prefix of `^10`.
pub fn substitute(template: &str, args: &[&str]) -> String {
    let mut text = template.to_string();
    for (idx, arg) in args.iter().enumerate().rev() {
        text = text.replace(&format!("^{}", idx + 1), arg);
    }
    text
}
