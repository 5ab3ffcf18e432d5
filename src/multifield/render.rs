use std::io::Write;

use indexmap::IndexMap;
use tracing::trace;

use crate::{
    error::Result,
    html::Element,
    i18n::{MSG_CANCEL, MSG_DELETE, MSG_REGISTER, MSG_REQUIRED},
    widget::{Button, FieldWidget, Hidden, Label},
};

use super::{
    COMBINED_ID_WIDTH, MultiField, Orientation,
    row::display_value,
    script::{ClientConfig, script_element},
};

/// Allowance for the header row inside the grid height.
const HEADER_HEIGHT: u32 = 27;

/// One posted column of the data grid.
#[derive(Debug, Clone, PartialEq)]
struct Column {
    alias: String,
    width: u32,
    mandatory: bool,
}

impl MultiField {
    /// Client-side name of the runtime object for this widget.
    pub fn script_var(&self) -> String {
        let ident: String = self
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        format!("mtf{ident}")
    }

    pub fn table_id(&self) -> String {
        format!("{}mfTable", self.name)
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}_{}", self.name, key)
    }

    fn button_name(&self, action: &str) -> String {
        format!("{}btn{}", self.name, action)
    }

    /// Posted columns in order. A combined sub-field yields its id column
    /// (fixed narrow width) followed by its text column (declared width).
    fn columns(&self) -> Vec<Column> {
        let mut columns = Vec::new();
        for field in self.fields.values() {
            match field.text_name() {
                Some(text_name) => {
                    columns.push(Column {
                        alias: field.name.clone(),
                        width: COMBINED_ID_WIDTH,
                        mandatory: field.mandatory,
                    });
                    columns.push(Column {
                        alias: text_name.to_string(),
                        width: field.width,
                        mandatory: false,
                    });
                }
                None => columns.push(Column {
                    alias: field.name.clone(),
                    width: field.width,
                    mandatory: field.mandatory,
                }),
            }
        }
        columns
    }

    pub fn client_config(&self) -> ClientConfig {
        let columns = self.columns();
        ClientConfig {
            table_id: self.table_id(),
            width: self.width,
            height: self.height,
            form_fields_alias: columns.iter().map(|c| c.alias.clone()).collect(),
            form_fields_name: columns.iter().map(|c| self.namespaced(&c.alias)).collect(),
            form_post_fields: columns
                .iter()
                .map(|c| (c.alias.clone(), 1))
                .collect::<IndexMap<_, _>>(),
            form_fields_mandatory: columns.iter().map(|c| u8::from(c.mandatory)).collect(),
            mandatory_message: self.translate(MSG_REQUIRED, &[]),
            store_button: self.button_name("Store"),
            delete_button: self.button_name("Delete"),
            cancel_button: self.button_name("Cancel"),
            input_result: self.name.clone(),
        }
    }

    /// Give every sub-widget its namespaced posted name.
    fn namespace_widgets(&mut self) {
        let prefix = self.name.clone();
        for field in self.fields.values_mut() {
            field.widget.set_name(&format!("{prefix}_{}", field.name));
            if let (Some(text_name), Some(combined)) =
                (field.text_name.as_deref(), field.widget.as_combined_mut())
            {
                combined.set_text_name(&format!("{prefix}_{text_name}"));
            }
        }
    }

    /// Build the widget markup, without the trailing configuration script.
    pub fn build(&mut self) -> Element {
        self.namespace_widgets();
        let mut wrapper = Element::new("div").with_attr("mtf_name", &self.name);
        if !self.fields.is_empty() {
            wrapper.add(self.layout_table());
        }
        if self.editable {
            wrapper.add(self.action_table());
        }
        let mut panel = Element::new("div").with_attr("class", "multifieldDiv");
        panel.add(Hidden::new(&self.name).render());
        panel.add(self.data_table());
        wrapper.add(panel);
        trace!(multifield = %self.name, rows = self.rows.len(), "built multifield markup");
        wrapper
    }

    /// Configuration script for the client runtime.
    pub fn script(&self) -> Result<Element> {
        let config = self.client_config().to_script_json()?;
        Ok(script_element(format!(
            "var {var} = new MultiField({config});",
            var = self.script_var()
        )))
    }

    /// Full markup: the widget followed by its configuration script.
    pub fn render(&mut self) -> Result<String> {
        let widget = self.build();
        let script = self.script()?;
        Ok(format!("{widget}{script}"))
    }

    pub fn show(&mut self, out: &mut impl Write) -> Result<()> {
        let html = self.render()?;
        out.write_all(html.as_bytes())?;
        Ok(())
    }

    fn layout_table(&self) -> Element {
        let mut table = Element::new("table").with_attr("class", "tmultifield_form");
        let mut label_row = Element::new("tr");
        let mut input_row = Element::new("tr");
        for field in self.fields.values() {
            let mut label = Label::new(&field.label);
            if field.mandatory {
                label = label.with_font_color("red");
            }
            let cells = field.widget.render_cells();
            match self.orientation {
                Orientation::Horizontal => {
                    let label_cell = label_row.add_cell(label.render());
                    if cells.len() > 1 {
                        label_cell.set_attr("colspan", cells.len().to_string());
                    }
                    for cell in cells {
                        input_row.add_cell(cell);
                    }
                }
                Orientation::Vertical => {
                    let row = table.add_row();
                    row.add_cell(label.render());
                    for cell in cells {
                        row.add_cell(cell);
                    }
                }
            }
        }
        if self.orientation == Orientation::Horizontal {
            table.add(label_row);
            table.add(input_row);
        }
        table
    }

    fn action_table(&self) -> Element {
        let var = self.script_var();
        let store = Button::new(self.button_name("Store"))
            .with_label(self.translate(MSG_REGISTER, &[]))
            .with_image("ico_save.png")
            .with_function(format!("{var}.addRowFromFormFields()"));
        let delete = Button::new(self.button_name("Delete"))
            .with_label(self.translate(MSG_DELETE, &[]))
            .with_image("ico_delete.png");
        let cancel = Button::new(self.button_name("Cancel"))
            .with_label(self.translate(MSG_CANCEL, &[]))
            .with_image("ico_close.png");

        let mut table = Element::new("table").with_attr("class", "tmultifield_actions");
        let row = table.add_row();
        for button in [store, delete, cancel] {
            row.add_cell(button.render());
        }
        table
    }

    fn data_table(&self) -> Element {
        let mut table = Element::new("table").with_attr("id", self.table_id());

        let mut header = Element::new("tr");
        for field in self.fields.values() {
            if field.is_combined() {
                header
                    .add_cell("ID")
                    .set_attr("width", format!("{COMBINED_ID_WIDTH}px"));
            }
            header
                .add_cell(field.label.as_str())
                .set_attr("width", format!("{}px", field.width));
        }
        table.add(Element::new("thead").with_child(header));

        let body_height = self.height.saturating_sub(HEADER_HEIGHT);
        let mut body = Element::new("tbody")
            .with_attr("class", "tmultifield_scrolling")
            .with_attr("style", format!("height: {body_height}px"));
        let columns = self.columns();
        for row in &self.rows {
            let tr = body.add_row();
            if let Some(id) = row.id().as_ref().and_then(display_value) {
                tr.set_attr("dbId", id);
            }
            for column in &columns {
                let text = row
                    .property(&column.alias)
                    .as_ref()
                    .and_then(display_value)
                    .unwrap_or_default();
                tr.add_cell(text)
                    .set_attr("style", format!("width:{}px", column.width));
            }
        }
        table.add(body);
        table
    }
}
