use crate::html::Element;

/// Client-side action button; it never submits the form by itself.
#[derive(Debug, Clone)]
pub struct Button {
    name: String,
    label: String,
    image: Option<String>,
    on_click: Option<String>,
}

impl Button {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            image: None,
            on_click: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_function(mut self, script: impl Into<String>) -> Self {
        self.on_click = Some(script.into());
        self
    }

    pub fn render(&self) -> Element {
        let mut button = Element::new("button")
            .with_attr("type", "button")
            .with_attr("class", "btn btn-default btn-sm")
            .with_attr("name", &self.name)
            .with_attr("id", &self.name);
        if let Some(script) = &self.on_click {
            button.set_attr("onclick", format!("{script}; return false;"));
        }
        if let Some(image) = &self.image {
            button.add(Element::new("img").with_attr("src", image));
        }
        button.add(self.label.as_str());
        button
    }
}
