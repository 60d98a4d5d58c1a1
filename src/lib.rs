//! Serde deserializer for Apple XML property lists.
//!
//! Decoding is streaming: tokens are pulled from `quick-xml` and handed to
//! the target type's visitor as they are read, without building a tree.

pub use date::Date;
pub use de::{
    Decoder, from_reader, from_reader_with_options, from_slice, from_slice_with_error_sink,
    from_slice_with_options, from_str,
};
pub use error::Error;
pub use ledger::ErrorLedger;
pub use options::Options;
pub use tokens::{Attribute, StartTag, Token};
pub use value::{Dictionary, Value};

mod date;
mod de;
mod error;
pub mod fields;
mod ledger;
mod macros;
mod options;
mod parse_scalars;
mod tokens;
mod value;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
