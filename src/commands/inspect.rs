use anyhow::{Context, Result};
use std::path::Path;

use compcheck::loader;
use compcheck::models::{ComponentConfigDoc, ComponentDoc, EndpointsDoc};
use compcheck::validation::DocumentKind;

/// Print the typed view of the parsed document.
pub fn inspect_command(dir: &Path, file: Option<&Path>, kind: Option<DocumentKind>) -> Result<()> {
    let loaded = match file {
        Some(file) => loader::load_file(file, kind)?,
        None => loader::load_from_dir(dir)?,
    };
    let context = || format!("Failed to interpret {}", loaded.path.display());
    match loaded.kind {
        DocumentKind::Component => {
            let doc: ComponentDoc =
                serde_yaml::from_value(loaded.document.clone()).with_context(context)?;
            println!("{doc:#?}");
        }
        DocumentKind::Endpoints => {
            let doc: EndpointsDoc =
                serde_yaml::from_value(loaded.document.clone()).with_context(context)?;
            println!("{doc:#?}");
        }
        DocumentKind::ComponentConfig => {
            let doc: ComponentConfigDoc =
                serde_yaml::from_value(loaded.document.clone()).with_context(context)?;
            println!("{doc:#?}");
        }
    }
    Ok(())
}
