//! Locates and parses the configuration document for a component
//! directory. All validation happens later, in [`crate::validation`];
//! this module only finds the file, parses the YAML and reads the
//! version selector out of the tree.

use anyhow::{Context, Result, bail};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::validation::{
    COMPONENT_CONFIG_VERSION, DocumentKind, ENDPOINTS_DOC_VERSION, LATEST_COMPONENT_VERSION,
};

/// Directory that holds a component's configuration documents.
pub const CONFIG_DIR: &str = ".choreo";

// Discovery order: the richest document wins.
const CANDIDATES: &[(&str, DocumentKind)] = &[
    ("component", DocumentKind::Component),
    ("component-config", DocumentKind::ComponentConfig),
    ("endpoints", DocumentKind::Endpoints),
];

pub struct LoadedDocument {
    pub path: PathBuf,
    pub kind: DocumentKind,
    /// Version selector declared in the document.
    pub version: String,
    pub document: Value,
    /// Directory that `schemaFilePath` entries resolve against.
    pub source_root: PathBuf,
}

/// Find and parse the configuration document under `dir/.choreo/`.
pub fn load_from_dir(dir: &Path) -> Result<LoadedDocument> {
    let config_dir = dir.join(CONFIG_DIR);
    for (stem, kind) in CANDIDATES {
        for ext in ["yaml", "yml"] {
            let path = config_dir.join(format!("{stem}.{ext}"));
            if path.is_file() {
                debug!("found {kind} document at {}", path.display());
                return load_file_as(&path, *kind, dir);
            }
        }
    }
    bail!(
        "no configuration document found under {}; expected component.yaml, component-config.yaml or endpoints.yaml",
        config_dir.display()
    );
}

/// Parse a specific file. The kind is inferred from the file name when
/// not given explicitly.
pub fn load_file(path: &Path, kind: Option<DocumentKind>) -> Result<LoadedDocument> {
    let kind = match kind {
        Some(kind) => kind,
        None => infer_kind(path)?,
    };
    // When the file sits inside `.choreo/`, schema files live next to the
    // directory, not inside it.
    let parent = path.parent().unwrap_or(Path::new("."));
    let source_root = if parent.ends_with(CONFIG_DIR) {
        parent.parent().unwrap_or(parent)
    } else {
        parent
    };
    load_file_as(path, kind, source_root)
}

fn infer_kind(path: &Path) -> Result<DocumentKind> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    for (name, kind) in CANDIDATES {
        if stem == *name {
            return Ok(*kind);
        }
    }
    bail!(
        "cannot infer the document kind from '{}'; pass --kind",
        path.display()
    );
}

fn load_file_as(path: &Path, kind: DocumentKind, source_root: &Path) -> Result<LoadedDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let version = declared_version(kind, &document);
    Ok(LoadedDocument {
        path: path.to_path_buf(),
        kind,
        version,
        document,
        source_root: source_root.to_path_buf(),
    })
}

/// Version selector declared inside the document. A missing selector
/// falls back to the newest schema of the kind, so validation can still
/// report what the document itself is missing.
pub fn declared_version(kind: DocumentKind, document: &Value) -> String {
    let (field, fallback) = match kind {
        DocumentKind::Component => ("schemaVersion", LATEST_COMPONENT_VERSION),
        DocumentKind::Endpoints => ("version", ENDPOINTS_DOC_VERSION),
        DocumentKind::ComponentConfig => return COMPONENT_CONFIG_VERSION.to_string(),
    };
    match document.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fallback.to_string(),
    }
}
