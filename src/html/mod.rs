//! Minimal HTML element tree used by the widgets.

mod element;
mod escape;

pub use element::{Element, Node};
pub use escape::{escape_attr, escape_text};
