use anyhow::{Result, bail};
use colored::Colorize;
use std::path::Path;

use compcheck::loader::{self, LoadedDocument};
use compcheck::validation::{self, DocumentKind, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn validate_command(
    dir: &Path,
    file: Option<&Path>,
    kind: Option<DocumentKind>,
    schema_version: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let loaded = match file {
        Some(file) => loader::load_file(file, kind)?,
        None => loader::load_from_dir(dir)?,
    };
    let version = schema_version.unwrap_or(&loaded.version);

    let result = validation::validate(&loaded.document, loaded.kind, version, &loaded.source_root);

    if format == OutputFormat::Json {
        print_json(&loaded, version, &result)?;
    }

    match result {
        Ok(()) => {
            if format == OutputFormat::Text {
                println!(
                    "{} {} is valid ({} schema {})",
                    "✓".green(),
                    loaded.path.display(),
                    loaded.kind,
                    version
                );
            }
            Ok(())
        }
        Err(error) => {
            if format == OutputFormat::Text {
                eprintln!(
                    "{} {}",
                    "✗".red(),
                    validation::format_failure(&error, loaded.kind)
                );
            }
            bail!("validation failed for {}", loaded.path.display());
        }
    }
}

fn print_json(
    loaded: &LoadedDocument,
    version: &str,
    result: &Result<(), ValidationError>,
) -> Result<()> {
    let violations = match result {
        Ok(()) => &[][..],
        Err(error) => error.violations(),
    };
    // Fatal errors carry no violations; surface them separately.
    let fatal = result.as_ref().err().and_then(|error| match error {
        ValidationError::Invalid { .. } => None,
        other => Some(other.to_string()),
    });
    let payload = serde_json::json!({
        "path": loaded.path.display().to_string(),
        "kind": loaded.kind.to_string(),
        "schemaVersion": version,
        "valid": result.is_ok(),
        "violations": violations,
        "error": fatal,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
