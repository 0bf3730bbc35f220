//! JSON Pointer (RFC 6901 shaped) parsing and evaluation.
//!
//! A pointer selects a subvalue inside a JSON document. The empty string and
//! the lone `/` both designate the whole document; every other pointer must
//! start with `/` and is split into reference tokens.
//!
//! Divergence note: tokens are applied as literal keys — the `~0`/`~1`
//! escape sequences of canonical RFC 6901 are not rewritten. Keys containing
//! `/` are therefore not addressable, which matches the schema subschema
//! index this crate serves.

use thiserror::Error;

mod pointer;

pub use pointer::JsonPointer;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("JsonPointer syntax error for \"{pointer}\" - first character of non-empty reference must be '/'")]
    Syntax { pointer: String },

    #[error("invalid json pointer \"{pointer}\": token \"{token}\" is missing")]
    MissingToken { pointer: String, token: String },

    #[error("invalid json pointer \"{pointer}\": \"{token}\" is not a valid array index")]
    InvalidIndex { pointer: String, token: String },

    #[error("invalid json pointer \"{pointer}\": index {index} out of range")]
    IndexOutOfRange { pointer: String, index: usize },
}
