//! Repeated-row form widget.
//!
//! A [`MultiField`] groups several sub-fields into one editable grid. The
//! server renders the inputs, the rows currently stored and a configuration
//! script for the client runtime, which keeps the grid in sync and posts every
//! row back as a JSON array under the widget name. There is no server-side
//! link between rendering and decoding: [`MultiField::post_data`] only relies
//! on the posted field names.

mod post;
mod render;
mod row;
mod script;

pub use post::{clean_value, strip_slashes, url_decode};
pub use row::{ID_PROPERTY, RowItem, RowModel};
pub use script::{
    ClientConfig, clear_field, clear_field_script, disable_field, disable_field_script,
    enable_field, enable_field_script,
};

use std::{
    fmt,
    str::FromStr,
    sync::{Arc, LazyLock},
};

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    error::{Error, Result},
    i18n::{CoreTranslator, Translator},
    request::RequestContext,
    widget::FieldWidget,
};

/// Width of the id column added by combined sub-fields.
pub const COMBINED_ID_WIDTH: u32 = 20;
pub const DEFAULT_HEIGHT: u32 = 100;

static FIELD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("field name pattern compiles")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// One layout row per sub-field, label beside input.
    #[default]
    Vertical,
    /// A row of labels above a row of inputs.
    Horizontal,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            other => Err(format!("unknown orientation '{other}'")),
        }
    }
}

impl From<&str> for Orientation {
    /// Unknown modes fall back to vertical.
    fn from(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: String| {
            warn!(%err, "falling back to vertical multifield layout");
            Orientation::Vertical
        })
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// One column of the multifield.
#[derive(Debug)]
pub struct SubField {
    pub name: String,
    pub label: String,
    pub widget: Box<dyn FieldWidget>,
    pub width: u32,
    pub mandatory: bool,
    text_name: Option<String>,
}

impl SubField {
    pub fn is_combined(&self) -> bool {
        self.text_name.is_some()
    }

    /// Unprefixed key posted for the auxiliary text of a combined sub-field.
    pub fn text_name(&self) -> Option<&str> {
        self.text_name.as_deref()
    }
}

#[derive(Debug)]
pub struct MultiField {
    name: String,
    form_name: Option<String>,
    fields: IndexMap<String, SubField>,
    rows: Vec<Box<dyn RowModel>>,
    width: u32,
    height: u32,
    class: Option<String>,
    orientation: Orientation,
    editable: bool,
    translator: Arc<dyn Translator>,
}

impl MultiField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            form_name: None,
            fields: IndexMap::new(),
            rows: Vec::new(),
            width: 0,
            height: DEFAULT_HEIGHT,
            class: None,
            orientation: Orientation::Vertical,
            editable: true,
            translator: Arc::new(CoreTranslator::default()),
        }
    }

    pub fn with_orientation(mut self, orientation: impl Into<Orientation>) -> Self {
        self.set_orientation(orientation);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.set_class(class);
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a sub-field. A repeated name replaces the earlier descriptor
    /// in place; its width is still added to the running total.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        widget: impl FieldWidget + 'static,
        width: u32,
        mandatory: bool,
    ) -> Result<()> {
        self.add_boxed_field(name, label, Box::new(widget), width, mandatory)
    }

    pub fn add_boxed_field(
        &mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        mut widget: Box<dyn FieldWidget>,
        width: u32,
        mandatory: bool,
    ) -> Result<()> {
        let name = name.into();
        if !FIELD_NAME.is_match(&name) {
            return Err(Error::invalid_field_name(name));
        }
        if let Some(form) = &self.form_name {
            widget.set_form_name(form);
        }
        let text_name = widget
            .as_combined()
            .map(|combined| combined.text_name().to_string());
        let extra = if text_name.is_some() { COMBINED_ID_WIDTH } else { 0 };
        self.width = self
            .width
            .checked_add(width)
            .and_then(|total| total.checked_add(extra))
            .ok_or_else(|| Error::WidthOverflow { name: name.clone() })?;
        let field = SubField {
            name: name.clone(),
            label: label.into(),
            widget,
            width,
            mandatory,
            text_name,
        };
        if self.fields.insert(name.clone(), field).is_some() {
            warn!(multifield = %self.name, field = %name, "sub-field redefined");
        }
        Ok(())
    }

    pub fn fields(&self) -> impl Iterator<Item = &SubField> {
        self.fields.values()
    }

    pub fn field(&self, name: &str) -> Option<&SubField> {
        self.fields.get(name)
    }

    pub fn set_orientation(&mut self, orientation: impl Into<Orientation>) {
        self.orientation = orientation.into();
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Accumulated pixel width of all sub-fields.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_class(&mut self, class: impl Into<String>) {
        self.class = Some(class.into());
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Attach the widget, and every current and future sub-field, to a form.
    pub fn set_form_name(&mut self, form_name: impl Into<String>) {
        let form_name = form_name.into();
        for field in self.fields.values_mut() {
            field.widget.set_form_name(&form_name);
        }
        self.form_name = Some(form_name);
    }

    pub fn form_name(&self) -> Option<&str> {
        self.form_name.as_deref()
    }

    /// Store the rows to display.
    ///
    /// Every sub-field property (and the text property of combined
    /// sub-fields) is materialized now, while the caller still holds
    /// whatever context lazy properties need, rather than during rendering.
    pub fn set_value<R>(&mut self, rows: impl IntoIterator<Item = R>)
    where
        R: RowModel + 'static,
    {
        self.rows = rows
            .into_iter()
            .map(|row| Box::new(row) as Box<dyn RowModel>)
            .collect();
        for row in &mut self.rows {
            for field in self.fields.values() {
                row.materialize(&field.name);
                if let Some(text_name) = field.text_name() {
                    row.materialize(text_name);
                }
            }
        }
    }

    pub fn rows(&self) -> &[Box<dyn RowModel>] {
        &self.rows
    }

    /// Rows posted back for this widget, as property bags tagged with the
    /// configured class. Absent or unreadable payloads give no rows.
    pub fn post_data(&self, request: &RequestContext) -> Vec<RowItem> {
        let class = self.class.clone();
        self.post_data_with(request, || match &class {
            Some(class) => RowItem::with_class(class.clone()),
            None => RowItem::new(),
        })
    }

    /// Rows posted back for this widget, decoded into a caller-defined model.
    pub fn post_data_into<T>(&self, request: &RequestContext) -> Vec<T>
    where
        T: RowModel + Default,
    {
        self.post_data_with(request, T::default)
    }

    fn post_data_with<T, F>(&self, request: &RequestContext, make: F) -> Vec<T>
    where
        T: RowModel,
        F: FnMut() -> T,
    {
        match request.get(&self.name) {
            Some(raw) => post::decode_rows(raw, make),
            None => Vec::new(),
        }
    }

    pub(crate) fn translate(&self, template: &str, args: &[&str]) -> String {
        self.translator.translate(template, args)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::widget::{ComboCombined, Entry};

    fn sample() -> MultiField {
        let mut field = MultiField::new("contacts");
        field
            .add_field("kind", "Kind", Entry::new("kind"), 100, true)
            .unwrap();
        field
            .add_field("value", "Value", Entry::new("value"), 200, false)
            .unwrap();
        field
    }

    #[test]
    fn accumulates_width_with_combined_allowance() {
        let mut field = sample();
        assert_eq!(field.width(), 300);
        field
            .add_field("city_id", "City", ComboCombined::new("city_id", "city_name"), 150, false)
            .unwrap();
        assert_eq!(field.width(), 300 + 150 + COMBINED_ID_WIDTH);
    }

    #[test]
    fn class_reflects_last_call() {
        let mut field = MultiField::new("items");
        assert_eq!(field.class(), None);
        field.set_class("Contact");
        field.add_field("a", "A", Entry::new("a"), 10, false).unwrap();
        field.set_class("Phone");
        field.add_field("b", "B", Entry::new("b"), 10, false).unwrap();
        assert_eq!(field.class(), Some("Phone"));
    }

    #[test]
    fn rejects_non_identifier_names() {
        let mut field = MultiField::new("items");
        for bad in ["", "1abc", "a-b", "a b"] {
            let err = field
                .add_field(bad, "Bad", Entry::new("x"), 10, false)
                .unwrap_err();
            assert!(matches!(err, Error::InvalidFieldName { .. }));
        }
        assert_eq!(field.width(), 0);
    }

    #[test]
    fn oversized_widths_are_rejected_without_side_effects() {
        let mut field = MultiField::new("items");
        field
            .add_field("a", "A", Entry::new("a"), u32::MAX, false)
            .unwrap();
        let err = field
            .add_field("b", "B", Entry::new("b"), 1, false)
            .unwrap_err();
        assert!(matches!(err, Error::WidthOverflow { ref name } if name == "b"));
        assert_eq!(field.width(), u32::MAX);
        assert!(field.field("b").is_none());

        let mut field = MultiField::new("items");
        let err = field
            .add_field(
                "city_id",
                "City",
                ComboCombined::new("city_id", "city_name"),
                u32::MAX - 5,
                false,
            )
            .unwrap_err();
        assert!(matches!(err, Error::WidthOverflow { .. }));
        assert_eq!(field.width(), 0);
    }

    #[test]
    fn duplicate_names_overwrite_in_place() {
        let mut field = sample();
        field
            .add_field("kind", "Type", Entry::new("kind"), 50, false)
            .unwrap();
        let names: Vec<_> = field.fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["kind", "value"]);
        assert_eq!(field.field("kind").unwrap().label, "Type");
        assert_eq!(field.width(), 350);
    }

    #[test]
    fn orientation_falls_back_to_vertical() {
        let mut field = MultiField::new("items");
        field.set_orientation("horizontal");
        assert_eq!(field.orientation(), Orientation::Horizontal);
        field.set_orientation("diagonal");
        assert_eq!(field.orientation(), Orientation::Vertical);
    }

    #[derive(Debug, Default)]
    struct Lazy {
        touched: Vec<String>,
    }

    impl RowModel for Lazy {
        fn property(&self, _name: &str) -> Option<serde_json::Value> {
            None
        }

        fn set_property(&mut self, _name: &str, _value: serde_json::Value) {}

        fn materialize(&mut self, name: &str) {
            self.touched.push(name.to_string());
        }
    }

    #[test]
    fn set_value_materializes_every_column() {
        let mut field = sample();
        field
            .add_field("city_id", "City", ComboCombined::new("city_id", "city_name"), 150, false)
            .unwrap();
        field.set_value(vec![Lazy::default()]);
        let rendered = format!("{:?}", field.rows()[0]);
        for name in ["kind", "value", "city_id", "city_name"] {
            assert!(rendered.contains(name), "{name} not materialized: {rendered}");
        }
    }

    #[test]
    fn post_data_tags_rows_with_class() {
        let field = sample().with_class("Contact");
        let request = RequestContext::new().with_param("contacts", r#"[{"kind":"mail"}]"#);
        let rows = field.post_data(&request);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].class(), Some("Contact"));
        assert_eq!(rows[0].get("kind"), Some(&json!("mail")));
    }

    #[test]
    fn form_name_reaches_later_fields() {
        let mut field = MultiField::new("items");
        field.add_field("a", "A", Entry::new("a"), 10, false).unwrap();
        field.set_form_name("form_order");
        field.add_field("b", "B", Entry::new("b"), 10, false).unwrap();
        for sub in field.fields() {
            assert!(sub.widget.render().render().contains("form=\"form_order\""));
        }
    }
}
