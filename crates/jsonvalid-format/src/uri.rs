//! URI, IRI and URI-template formats (RFC 3986 / 3987 / 6570).

use std::sync::OnceLock;

use regex::Regex;
use url::{ParseError, Url};

use crate::FormatError;

fn scheme_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^:]+:").expect("scheme prefix pattern must compile"))
}

fn template_expression_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[^{}\\]*\}").expect("template pattern must compile"))
}

/// Base used to resolve relative references; `url` only parses absolute URIs.
fn reference_base() -> &'static Url {
    static BASE: OnceLock<Url> = OnceLock::new();
    BASE.get_or_init(|| Url::parse("http://example.com/").expect("static base URL must parse"))
}

/// An absolute URI: a scheme prefix followed by a parseable remainder.
pub fn is_valid_uri(uri: &str) -> Result<(), FormatError> {
    if !scheme_prefix_regex().is_match(uri) {
        return Err(FormatError::new("uri missing scheme prefix"));
    }
    Url::parse(uri)
        .map(|_| ())
        .map_err(|e| FormatError::new(format!("invalid uri {uri}: {e}")))
}

/// A URI reference: absolute, or relative against some base. Backslashes are
/// rejected explicitly because the parser would otherwise normalise them.
pub fn is_valid_uri_reference(uri_ref: &str) -> Result<(), FormatError> {
    if uri_ref.contains('\\') {
        return Err(FormatError::new(format!("invalid uri-ref {uri_ref}")));
    }
    match Url::parse(uri_ref) {
        Ok(_) => Ok(()),
        Err(ParseError::RelativeUrlWithoutBase) => reference_base()
            .join(uri_ref)
            .map(|_| ())
            .map_err(|e| FormatError::new(format!("invalid uri-ref {uri_ref}: {e}"))),
        Err(e) => Err(FormatError::new(format!("invalid uri-ref {uri_ref}: {e}"))),
    }
}

/// IRIs take the same path as URIs; internationalisation is the parser's job.
pub fn is_valid_iri(iri: &str) -> Result<(), FormatError> {
    is_valid_uri(iri)
}

pub fn is_valid_iri_reference(iri_ref: &str) -> Result<(), FormatError> {
    is_valid_uri_reference(iri_ref)
}

/// RFC 6570: substitute every `{...}` expression with a placeholder; the
/// result must have no stray braces and must itself be a URI reference.
pub fn is_valid_uri_template(uri_template: &str) -> Result<(), FormatError> {
    let substituted = template_expression_regex().replace_all(uri_template, "tmp");
    if substituted.contains('{') || substituted.contains('}') {
        return Err(FormatError::new(format!(
            "invalid uri template {uri_template}"
        )));
    }
    is_valid_uri_reference(&substituted)
}
