//! Declarative widget documents.
//!
//! A [`WidgetDocument`] describes a complete multifield (sub-fields, layout and
//! rows to display) so it can be kept in a JSON, YAML or TOML file.

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    i18n::{CoreTranslator, Language},
    io,
    multifield::{DEFAULT_HEIGHT, MultiField, RowItem},
    widget::{Combo, ComboCombined, Entry, FieldWidget},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Entry,
    Combo,
    Combined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDocument {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    pub width: u32,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub options: IndexMap<String, String>,
    /// Posted key of the caption of a combined field.
    #[serde(default)]
    pub text_name: Option<String>,
}

impl FieldDocument {
    fn widget(&self) -> Result<Box<dyn FieldWidget>> {
        let widget: Box<dyn FieldWidget> = match self.kind {
            FieldKind::Entry => Box::new(Entry::new(&self.name)),
            FieldKind::Combo => Box::new(Combo::new(&self.name).with_items(self.options.clone())),
            FieldKind::Combined => {
                let Some(text_name) = &self.text_name else {
                    bail!("combined field '{}' needs a textName", self.name);
                };
                Box::new(ComboCombined::new(&self.name, text_name).with_items(self.options.clone()))
            }
        };
        Ok(widget)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDocument {
    pub name: String,
    /// `vertical` or `horizontal`; anything else lays out vertically.
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_editable")]
    pub editable: bool,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
    #[serde(default)]
    pub rows: Vec<Value>,
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_editable() -> bool {
    true
}

impl WidgetDocument {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).context("invalid widget document")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_value(io::load_document(path)?)
    }

    /// Build the configured widget with its rows already set.
    pub fn build(&self) -> Result<MultiField> {
        let mut widget = MultiField::new(&self.name)
            .with_height(self.height)
            .with_editable(self.editable)
            .with_translator(Arc::new(CoreTranslator::new(self.language)));
        if let Some(orientation) = &self.orientation {
            widget.set_orientation(orientation.as_str());
        }
        if let Some(class) = &self.class {
            widget.set_class(class);
        }
        if let Some(form) = &self.form {
            widget.set_form_name(form);
        }
        for field in &self.fields {
            widget
                .add_boxed_field(
                    &field.name,
                    &field.label,
                    field.widget()?,
                    field.width,
                    field.mandatory,
                )
                .with_context(|| format!("cannot add field '{}'", field.name))?;
        }
        widget.set_value(self.rows.iter().map(RowItem::from_value));
        Ok(widget)
    }
}
