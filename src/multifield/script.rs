use std::io::{self, Write};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::html::Element;

/// Configuration consumed by the client-side `MultiField` runtime.
///
/// Serialized with camelCase keys. Button and result entries hold element
/// names, looked up on the page with `document.getElementsByName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub table_id: String,
    pub width: u32,
    pub height: u32,
    /// Unprefixed keys, in column order.
    pub form_fields_alias: Vec<String>,
    /// Input names on the page, in column order.
    pub form_fields_name: Vec<String>,
    pub form_post_fields: IndexMap<String, u8>,
    /// One flag per column; auxiliary text columns are never mandatory.
    pub form_fields_mandatory: Vec<u8>,
    pub mandatory_message: String,
    pub store_button: String,
    pub delete_button: String,
    pub cancel_button: String,
    pub input_result: String,
}

impl ClientConfig {
    /// JSON suitable for embedding in an inline `<script>`.
    pub fn to_script_json(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(json.replace("</", "<\\/"))
    }
}

pub(crate) fn script_element(body: impl Into<String>) -> Element {
    let mut script = Element::new("script").with_attr("type", "text/javascript");
    script.add_raw(body);
    script
}

/// Quote `field` for a single-quoted script string; `</` never reaches the page.
fn selector_literal(field: &str) -> String {
    field
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('"', "\\\\\"")
        .replace("</", "<\\/")
}

/// Script removing the overlay that blocks `field`.
pub fn enable_field_script(field: &str) -> Element {
    let field = selector_literal(field);
    script_element(format!(
        "setTimeout(function() {{$('div[mtf_name=\"block_{field}\"]').remove();}}, 20);"
    ))
}

/// Script laying a translucent overlay over the `field` region so it cannot be edited.
pub fn disable_field_script(field: &str) -> Element {
    let field = selector_literal(field);
    let region = format!("$('div[mtf_name=\"{field}\"]')");
    script_element(format!(
        "setTimeout(function() {{$('div[mtf_name=\"block_{field}\"]').remove();}}, 19);\
         setTimeout(function() {{{region}.css('position', 'relative').prepend('<div mtf_name=\"block_{field}\" \
         style=\"position:absolute; width:'+{region}.width()+'px; height:'+{region}.height()+'px; \
         background: #c0c0c0; opacity:0.5;\"></div>')}}, 20);"
    ))
}

/// Script emptying the data grid of the multifield named `field`.
pub fn clear_field_script(field: &str) -> Element {
    let field = selector_literal(field);
    script_element(format!(
        "$('#{field}mfTable .tmultifield_scrolling').html('');"
    ))
}

pub fn enable_field(out: &mut impl Write, form_name: &str, field: &str) -> io::Result<()> {
    trace!(form = form_name, field, "enable multifield");
    write!(out, "{}", enable_field_script(field))
}

pub fn disable_field(out: &mut impl Write, form_name: &str, field: &str) -> io::Result<()> {
    trace!(form = form_name, field, "disable multifield");
    write!(out, "{}", disable_field_script(field))
}

pub fn clear_field(out: &mut impl Write, form_name: &str, field: &str) -> io::Result<()> {
    trace!(form = form_name, field, "clear multifield");
    write!(out, "{}", clear_field_script(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_removes_block_overlay() {
        let html = enable_field_script("items").render();
        assert!(html.starts_with("<script type=\"text/javascript\">"));
        assert!(html.contains("$('div[mtf_name=\"block_items\"]').remove();}, 20);"));
    }

    #[test]
    fn disable_installs_overlay_after_clearing() {
        let html = disable_field_script("items").render();
        let removal = html.find("}, 19);").expect("removal scheduled");
        let overlay = html.find("prepend('<div mtf_name=\"block_items\"").expect("overlay");
        assert!(removal < overlay);
        assert!(html.contains("opacity:0.5;"));
    }

    #[test]
    fn clear_targets_grid_body() {
        let mut out = Vec::new();
        clear_field(&mut out, "form_customer", "contacts").unwrap();
        let html = String::from_utf8(out).unwrap();
        assert!(html.contains("$('#contactsmfTable .tmultifield_scrolling').html('');"));
    }

    #[test]
    fn field_names_cannot_close_the_script_tag() {
        let field = "x</script><script>alert(1)//";
        for script in [
            enable_field_script(field),
            disable_field_script(field),
            clear_field_script(field),
        ] {
            let html = script.render();
            assert!(!html.contains("</script><script>"), "{html}");
            assert_eq!(html.matches("</script").count(), 1, "{html}");
            assert!(html.ends_with("</script>"));
        }
    }

    #[test]
    fn script_json_cannot_close_the_script_tag() {
        let config = ClientConfig {
            table_id: "xmfTable".into(),
            width: 10,
            height: 100,
            form_fields_alias: vec![],
            form_fields_name: vec![],
            form_post_fields: IndexMap::new(),
            form_fields_mandatory: vec![],
            mandatory_message: "</script>".into(),
            store_button: "xbtnStore".into(),
            delete_button: "xbtnDelete".into(),
            cancel_button: "xbtnCancel".into(),
            input_result: "x".into(),
        };
        let json = config.to_script_json().unwrap();
        assert!(!json.contains("</script>"));
        assert!(json.contains("\"tableId\":\"xmfTable\""));
    }
}
