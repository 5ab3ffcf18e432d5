#![deny(rust_2018_idioms)]

pub mod config;
mod error;
pub mod html;
pub mod i18n;
pub mod io;
pub mod multifield;
mod request;
pub mod validator;
pub mod widget;

pub use config::{FieldDocument, FieldKind, WidgetDocument};
pub use error::{Error, Result};
pub use io::{DocumentFormat, load_document, parse_document_str};
pub use multifield::{ClientConfig, MultiField, Orientation, RowItem, RowModel, SubField};
pub use request::RequestContext;
pub use validator::{FieldValidator, NumericValidator, ValidationError};

pub mod prelude {
    pub use super::{
        FieldValidator, MultiField, NumericValidator, Orientation, RequestContext, RowItem,
        RowModel,
        widget::{ComboCombined, Entry, FieldWidget},
    };
}
