use super::DocumentKind;
use super::violation::ValidationError;

/// Render a failed validation as one human-readable message.
///
/// A single violation is inlined; several become a bulleted list with one
/// line per violation message. A failure that carries no violations is a
/// tool problem rather than a document problem and is reported as an
/// internal error embedding the raw detail.
pub fn format_failure(error: &ValidationError, kind: DocumentKind) -> String {
    match error {
        ValidationError::Invalid { violations } if violations.len() == 1 => {
            format!("{kind} configuration validation failed: {}", violations[0])
        }
        ValidationError::Invalid { violations } if !violations.is_empty() => {
            let mut message = format!("{kind} configuration validation failed:");
            for violation in violations {
                message.push_str("\n  - ");
                message.push_str(&violation.message);
            }
            message
        }
        other => format!("internal error while validating the {kind} configuration: {other}"),
    }
}
