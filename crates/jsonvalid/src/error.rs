use jsonvalid_json_pointer::JsonPointerError;
use thiserror::Error;

/// A single keyword rejected the instance. Internal to validation: the
/// enclosing schema node rewraps it into a [`SchemaValidationError`] before
/// it crosses the crate boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("\"{keyword}\" validation failed, reason: {reason}")]
pub struct KeywordValidationError {
    pub keyword: String,
    pub reason: String,
}

impl KeywordValidationError {
    pub(crate) fn new(keyword: &str, reason: impl Into<String>) -> Self {
        Self {
            keyword: keyword.to_string(),
            reason: reason.into(),
        }
    }
}

/// The instance was rejected. `path` locates the rejecting schema node's
/// instance subvalue; the root path renders as `/`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("validation failed in path {}: {}", display_path(.path), .reason)]
pub struct SchemaValidationError {
    pub path: String,
    pub reason: String,
}

/// The schema document itself was malformed. `path` locates the offending
/// subschema within its root document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("schema compilation failed in path {path}: {reason}")]
pub struct SchemaCompilationError {
    pub path: String,
    pub reason: String,
}

impl SchemaCompilationError {
    pub(crate) fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// A `$ref` could not be resolved against the root-schema registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}: schema id - {}, fragment - {}", .reason, .schema_uri, display_path(.fragment))]
pub struct InvalidReferenceError {
    pub schema_uri: String,
    pub fragment: String,
    pub reason: String,
}

/// Everything a validation call can fail with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    #[error(transparent)]
    Reference(#[from] InvalidReferenceError),

    #[error(transparent)]
    Pointer(#[from] JsonPointerError),

    #[error("instance is not valid JSON: {0}")]
    MalformedInstance(String),
}

impl ValidationError {
    /// The instance path of the failure, when the failure carries one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Schema(e) => Some(display_path(&e.path)),
            _ => None,
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

/// How a keyword assertion fails: with its own local error, or with an
/// error produced by a nested schema node that must pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AssertionError {
    Keyword(KeywordValidationError),
    Nested(ValidationError),
}

impl From<KeywordValidationError> for AssertionError {
    fn from(e: KeywordValidationError) -> Self {
        Self::Keyword(e)
    }
}

impl From<ValidationError> for AssertionError {
    fn from(e: ValidationError) -> Self {
        Self::Nested(e)
    }
}
