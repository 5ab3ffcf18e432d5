use crate::html::Element;

use super::FieldWidget;

/// Empty hidden input; the client runtime fills it before submit.
#[derive(Debug, Clone, Default)]
pub struct Hidden {
    name: String,
}

impl Hidden {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl FieldWidget for Hidden {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn render(&self) -> Element {
        Element::new("input")
            .with_attr("type", "hidden")
            .with_attr("name", &self.name)
            .with_attr("value", "")
    }
}
