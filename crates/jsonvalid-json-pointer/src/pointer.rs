use std::fmt;

use serde_json::Value;

use crate::JsonPointerError;

/// A parsed JSON Pointer: a list of reference tokens.
///
/// A token is an object key or a decimal array index, applied in order
/// against the document handed to [`JsonPointer::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// Parse a pointer string.
    ///
    /// The empty string and `"/"` produce the whole-document pointer. Any
    /// other string must begin with `/`; the leading empty token produced by
    /// the split is discarded.
    pub fn parse(pointer: &str) -> Result<Self, JsonPointerError> {
        if pointer.is_empty() || pointer == "/" {
            return Ok(Self { tokens: Vec::new() });
        }

        if !pointer.starts_with('/') {
            return Err(JsonPointerError::Syntax {
                pointer: pointer.to_string(),
            });
        }

        Ok(Self {
            tokens: pointer[1..].split('/').map(str::to_string).collect(),
        })
    }

    /// The reference tokens, in application order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// `true` when this pointer designates the whole document.
    pub fn is_whole_document(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Walk the document and return the designated subvalue.
    ///
    /// Errors carry the full original pointer, not just the failing token.
    pub fn evaluate<'a>(&self, document: &'a Value) -> Result<&'a Value, JsonPointerError> {
        let mut current = document;

        for token in &self.tokens {
            current = match current {
                Value::Object(map) => map.get(token).ok_or_else(|| {
                    JsonPointerError::MissingToken {
                        pointer: self.to_string(),
                        token: token.clone(),
                    }
                })?,
                Value::Array(arr) => {
                    let index: usize =
                        token.parse().map_err(|_| JsonPointerError::InvalidIndex {
                            pointer: self.to_string(),
                            token: token.clone(),
                        })?;
                    arr.get(index)
                        .ok_or_else(|| JsonPointerError::IndexOutOfRange {
                            pointer: self.to_string(),
                            index,
                        })?
                }
                _ => {
                    return Err(JsonPointerError::MissingToken {
                        pointer: self.to_string(),
                        token: token.clone(),
                    })
                }
            };
        }

        Ok(current)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{token}")?;
        }
        Ok(())
    }
}
