//! JSON Pointer formats (RFC 6901 §5 and the relative-pointer draft).

use crate::FormatError;

/// Empty is valid; otherwise the pointer must start with `/`, every `~` must
/// be followed by `0` or `1`, and the pointer may not end with `~`.
pub fn is_valid_json_pointer(json_pointer: &str) -> Result<(), FormatError> {
    if json_pointer.is_empty() {
        return Ok(());
    }
    if !json_pointer.starts_with('/') {
        return Err(FormatError::new(format!(
            "non-empty references must begin with a '/' character: {json_pointer}"
        )));
    }

    let bytes = json_pointer.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'~' {
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'0') | Some(b'1') => {}
            Some(_) => return Err(FormatError::new("unescaped tilda error")),
            None => return Err(FormatError::new("ending tilda error")),
        }
    }
    Ok(())
}

/// A non-negative integer prefix, then either a bare `#` or a valid JSON
/// Pointer suffix.
pub fn is_valid_relative_json_pointer(rel_json_pointer: &str) -> Result<(), FormatError> {
    let digits = rel_json_pointer
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return Err(FormatError::new(
            "relative json pointer must start with a non-negative integer",
        ));
    }

    let rest = &rel_json_pointer[digits..];
    if rest == "#" {
        return Ok(());
    }
    is_valid_json_pointer(rest)
}
