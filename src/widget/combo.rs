use indexmap::IndexMap;

use crate::html::Element;

use super::{CombinedField, FieldWidget};

/// Drop-down of `key -> caption` options.
#[derive(Debug, Clone, Default)]
pub struct Combo {
    name: String,
    options: IndexMap<String, String>,
    form_name: Option<String>,
}

impl Combo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_items<K, V>(mut self, items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.add_items(items);
        self
    }

    pub fn add_items<K, V>(&mut self, items: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.options
            .extend(items.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    pub fn items(&self) -> &IndexMap<String, String> {
        &self.options
    }

    fn render_select(&self, name: &str) -> Element {
        let mut select = Element::new("select")
            .with_attr("class", "tcombo")
            .with_attr("name", name);
        if let Some(form) = &self.form_name {
            select.set_attr("form", form);
        }
        select.add(Element::new("option").with_attr("value", ""));
        for (key, caption) in &self.options {
            select.add(
                Element::new("option")
                    .with_attr("value", key)
                    .with_child(caption.as_str()),
            );
        }
        select
    }
}

impl FieldWidget for Combo {
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
        self.render_select(&self.name)
    }
}

/// A small id entry paired with a drop-down showing the matching caption.
///
/// The id is posted under the widget name and the caption under `text_name`.
#[derive(Debug, Clone)]
pub struct ComboCombined {
    combo: Combo,
    text_name: String,
}

impl ComboCombined {
    pub fn new(name: impl Into<String>, text_name: impl Into<String>) -> Self {
        Self {
            combo: Combo::new(name),
            text_name: text_name.into(),
        }
    }

    pub fn with_items<K, V>(mut self, items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.combo.add_items(items);
        self
    }

    pub fn items(&self) -> &IndexMap<String, String> {
        self.combo.items()
    }

    fn render_id(&self) -> Element {
        let mut input = Element::new("input")
            .with_attr("class", "tfield")
            .with_attr("type", "text")
            .with_attr("name", self.combo.name())
            .with_attr("style", "width:20px");
        if let Some(form) = &self.combo.form_name {
            input.set_attr("form", form);
        }
        input
    }
}

impl FieldWidget for ComboCombined {
    fn name(&self) -> &str {
        self.combo.name()
    }

    fn set_name(&mut self, name: &str) {
        self.combo.set_name(name);
    }

    fn set_form_name(&mut self, form_name: &str) {
        self.combo.set_form_name(form_name);
    }

    fn render(&self) -> Element {
        let mut wrapper = Element::new("span").with_attr("class", "tcombocombined");
        for cell in self.render_cells() {
            wrapper.add(cell);
        }
        wrapper
    }

    fn render_cells(&self) -> Vec<Element> {
        vec![self.render_id(), self.combo.render_select(&self.text_name)]
    }

    fn as_combined(&self) -> Option<&dyn CombinedField> {
        Some(self)
    }

    fn as_combined_mut(&mut self) -> Option<&mut dyn CombinedField> {
        Some(self)
    }
}

impl CombinedField for ComboCombined {
    fn text_name(&self) -> &str {
        &self.text_name
    }

    fn set_text_name(&mut self, name: &str) {
        self.text_name = name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_posts_id_and_text_under_separate_names() {
        let widget = ComboCombined::new("city_id", "city_name").with_items([("1", "Lajeado")]);
        let cells = widget.render_cells();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].attr("name"), Some("city_id"));
        assert_eq!(cells[1].attr("name"), Some("city_name"));
        assert!(cells[1].render().contains("<option value=\"1\">Lajeado</option>"));
    }

    #[test]
    fn plain_combo_is_not_combined() {
        let mut combo = Combo::new("state");
        assert!(combo.as_combined().is_none());
        assert!(combo.as_combined_mut().is_none());
        combo.set_name("ns_state");
        assert_eq!(combo.render().attr("name"), Some("ns_state"));
    }
}
