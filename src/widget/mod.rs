//! Form inputs that can be nested inside a [`MultiField`](crate::MultiField).

mod button;
mod combo;
mod entry;
mod hidden;
mod label;

pub use button::Button;
pub use combo::{Combo, ComboCombined};
pub use entry::Entry;
pub use hidden::Hidden;
pub use label::Label;

use std::fmt;

use crate::html::Element;

/// Capability every nestable input provides: a settable name and markup.
pub trait FieldWidget: fmt::Debug {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    fn set_form_name(&mut self, _form_name: &str) {}

    fn render(&self) -> Element;

    /// Grid cells occupied by the input, one per element.
    fn render_cells(&self) -> Vec<Element> {
        vec![self.render()]
    }

    fn as_combined(&self) -> Option<&dyn CombinedField> {
        None
    }

    fn as_combined_mut(&mut self) -> Option<&mut dyn CombinedField> {
        None
    }
}

/// Inputs that pair an id with a secondary display text posted under its own key.
pub trait CombinedField {
    fn text_name(&self) -> &str;

    fn set_text_name(&mut self, name: &str);
}
