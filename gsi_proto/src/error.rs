use thiserror::Error;

/// Structural failure while decoding a payload.
///
/// Vocabulary drift (unknown enum strings, placeholder items, missing
/// sections) is never reported here; those are normalised silently.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("expected a JSON object at '{path}', found {found}")]
    NotAnObject { path: String, found: &'static str },
    #[error("invalid value at '{path}': {source}")]
    Section {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    pub(crate) fn section(path: impl Into<String>, source: serde_json::Error) -> Self {
        DecodeError::Section {
            path: path.into(),
            source,
        }
    }

    /// Dotted location of the failure, when it is known.
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodeError::Malformed(_) => None,
            DecodeError::NotAnObject { path, .. } | DecodeError::Section { path, .. } => {
                Some(path)
            }
        }
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
