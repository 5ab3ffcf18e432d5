use crate::html::Element;

#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    font_color: Option<String>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_color: None,
        }
    }

    pub fn with_font_color(mut self, color: impl Into<String>) -> Self {
        self.font_color = Some(color.into());
        self
    }

    pub fn render(&self) -> Element {
        let mut label = Element::new("label").with_child(self.text.as_str());
        if let Some(color) = &self.font_color {
            label.set_attr("style", format!("color:{color}"));
        }
        label
    }
}
