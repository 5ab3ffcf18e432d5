use crate::html::Element;

use super::FieldWidget;

/// Single-line text input.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    name: String,
    value: String,
    width: Option<u32>,
    form_name: Option<String>,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn form_name(&self) -> Option<&str> {
        self.form_name.as_deref()
    }
}

impl FieldWidget for Entry {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn set_form_name(&mut self, form_name: &str) {
        self.form_name = Some(form_name.to_string());
    }

    fn render(&self) -> Element {
        let mut input = Element::new("input")
            .with_attr("class", "tfield")
            .with_attr("type", "text")
            .with_attr("name", &self.name)
            .with_attr("value", &self.value);
        if let Some(width) = self.width {
            input.set_attr("style", format!("width:{width}px"));
        }
        if let Some(form) = &self.form_name {
            input.set_attr("form", form);
        }
        input
    }
}
