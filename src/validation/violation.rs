use serde::Serialize;
use thiserror::Error;

use super::DocumentKind;

/// A single rule failure, annotated with the dotted/indexed path of the
/// offending field (e.g. `endpoints[2].context`). The message embeds the
/// path so it can be printed on its own line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    /// Violation on a specific field. `detail` continues the sentence
    /// started by the path: `field("endpoints[0].port", "must be ...")`.
    pub fn field(path: impl Into<String>, detail: impl AsRef<str>) -> Self {
        let path = path.into();
        let message = format!("{path} {}", detail.as_ref());
        Self { path, message }
    }

    /// Violation scoped to the document as a whole.
    pub fn document(message: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of a failed validation call.
///
/// `UnsupportedSchema` signals a caller mistake (nothing was validated),
/// while `Invalid` carries every violation found in the document.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no schema registered for {kind} documents with version {version}")]
    UnsupportedSchema {
        kind: DocumentKind,
        version: String,
    },

    #[error("document has {} violation(s)", violations.len())]
    Invalid { violations: Vec<Violation> },
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationError::Invalid { violations } => violations,
            ValidationError::UnsupportedSchema { .. } => &[],
        }
    }
}

/// Append a dotted segment to a field path, handling the document root.
pub fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

/// Path of the `index`-th element of the collection at `parent`.
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
