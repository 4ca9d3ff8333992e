use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

use super::DocumentKind;
use super::probe::{FileProbe, FsProbe};
use super::rules::RuleContext;
use super::schema;
use super::violation::{ValidationError, Violation};

/// Validate a parsed document against the schema registered for
/// `(kind, version)`.
///
/// An unknown pair is a caller mistake: the fatal
/// [`ValidationError::UnsupportedSchema`] is returned before any rule
/// runs. Otherwise every structural and semantic rule is evaluated
/// (nothing fails fast) and all violations come back in discovery order.
/// `source_root` anchors `schemaFilePath` existence checks.
pub fn validate(
    document: &Value,
    kind: DocumentKind,
    version: &str,
    source_root: &Path,
) -> Result<(), ValidationError> {
    validate_with_probe(document, kind, version, source_root, &FsProbe)
}

/// [`validate`] with an injected filesystem probe.
pub fn validate_with_probe(
    document: &Value,
    kind: DocumentKind,
    version: &str,
    source_root: &Path,
    probe: &dyn FileProbe,
) -> Result<(), ValidationError> {
    let Some(entry) = schema::lookup(kind, version) else {
        return Err(ValidationError::UnsupportedSchema {
            kind,
            version: version.to_string(),
        });
    };

    let mut violations: Vec<Violation> = Vec::new();
    entry.structural.walk(document, "", &mut violations);

    let ctx = RuleContext { source_root, probe };
    (entry.semantic)(document, &ctx, &mut violations);

    if violations.is_empty() {
        debug!("{kind} document passed schema version {version}");
        Ok(())
    } else {
        debug!(
            "{kind} document failed schema version {version} with {} violation(s)",
            violations.len()
        );
        Err(ValidationError::Invalid { violations })
    }
}
