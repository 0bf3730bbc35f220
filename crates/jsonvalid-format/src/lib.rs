//! Lexical checkers for the JSON Schema `format` assertion family.
//!
//! Each checker is a predicate over a string: `Ok(())` when the string is a
//! well-formed value of the format, or a [`FormatError`] describing why it
//! is not. [`check`] dispatches on the Draft-07 format name; unknown names
//! succeed, as Draft-07 requires.

use regex::Regex;
use thiserror::Error;

mod datetime;
mod email;
mod hostname;
mod ip;
mod pointer;
mod uri;

pub use datetime::{is_valid_date, is_valid_date_time, is_valid_time};
pub use email::{is_valid_email, is_valid_idn_email};
pub use hostname::{is_valid_hostname, is_valid_idn_hostname};
pub use ip::{is_valid_ipv4, is_valid_ipv6};
pub use pointer::{is_valid_json_pointer, is_valid_relative_json_pointer};
pub use uri::{
    is_valid_iri, is_valid_iri_reference, is_valid_uri, is_valid_uri_reference,
    is_valid_uri_template,
};

pub const FORMAT_DATE_TIME: &str = "date-time";
pub const FORMAT_DATE: &str = "date";
pub const FORMAT_TIME: &str = "time";
pub const FORMAT_EMAIL: &str = "email";
pub const FORMAT_IDN_EMAIL: &str = "idn-email";
pub const FORMAT_HOSTNAME: &str = "hostname";
pub const FORMAT_IDN_HOSTNAME: &str = "idn-hostname";
pub const FORMAT_IPV4: &str = "ipv4";
pub const FORMAT_IPV6: &str = "ipv6";
pub const FORMAT_URI: &str = "uri";
pub const FORMAT_URI_REFERENCE: &str = "uri-reference";
pub const FORMAT_IRI: &str = "iri";
pub const FORMAT_IRI_REFERENCE: &str = "iri-reference";
pub const FORMAT_URI_TEMPLATE: &str = "uri-template";
pub const FORMAT_JSON_POINTER: &str = "json-pointer";
pub const FORMAT_RELATIVE_JSON_POINTER: &str = "relative-json-pointer";
pub const FORMAT_REGEX: &str = "regex";

/// A string failed the lexical rules of a format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct FormatError {
    reason: String,
}

impl FormatError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Check `value` against the named format. Unknown format names succeed.
pub fn check(format: &str, value: &str) -> Result<(), FormatError> {
    match format {
        FORMAT_DATE_TIME => is_valid_date_time(value),
        FORMAT_DATE => is_valid_date(value),
        FORMAT_TIME => is_valid_time(value),
        FORMAT_EMAIL => is_valid_email(value),
        FORMAT_IDN_EMAIL => is_valid_idn_email(value),
        FORMAT_HOSTNAME => is_valid_hostname(value),
        FORMAT_IDN_HOSTNAME => is_valid_idn_hostname(value),
        FORMAT_IPV4 => is_valid_ipv4(value),
        FORMAT_IPV6 => is_valid_ipv6(value),
        FORMAT_URI => is_valid_uri(value),
        FORMAT_URI_REFERENCE => is_valid_uri_reference(value),
        FORMAT_IRI => is_valid_iri(value),
        FORMAT_IRI_REFERENCE => is_valid_iri_reference(value),
        FORMAT_URI_TEMPLATE => is_valid_uri_template(value),
        FORMAT_JSON_POINTER => is_valid_json_pointer(value),
        FORMAT_RELATIVE_JSON_POINTER => is_valid_relative_json_pointer(value),
        FORMAT_REGEX => is_valid_regex(value),
        _ => Ok(()),
    }
}

/// The string must compile in this implementation's regex dialect.
pub fn is_valid_regex(regex: &str) -> Result<(), FormatError> {
    Regex::new(regex)
        .map(|_| ())
        .map_err(|e| FormatError::new(format!("invalid regex: {e}")))
}
