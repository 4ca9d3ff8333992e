mod engine;
mod probe;
pub mod refs;
mod reporter;
mod rules;
mod schema;
mod violation;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

pub use engine::{validate, validate_with_probe};
pub use probe::{FileProbe, FsProbe};
pub use reporter::format_failure;
pub use schema::{COMPONENT_CONFIG_VERSION, ENDPOINTS_DOC_VERSION, LATEST_COMPONENT_VERSION};
pub use violation::{ValidationError, Violation};

/// Which schema family applies to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `component.yaml`, schemaVersion 1.0 / 1.1 / 1.2.
    Component,
    /// `endpoints.yaml`, version 0.1.
    Endpoints,
    /// `component-config.yaml`, apiVersion `core.choreo.dev/v1beta1`.
    ComponentConfig,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Endpoints => "endpoints",
            Self::ComponentConfig => "component-config",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "component" => Ok(Self::Component),
            "endpoints" => Ok(Self::Endpoints),
            "component-config" => Ok(Self::ComponentConfig),
            other => Err(format!(
                "unknown document kind '{other}'; expected component, endpoints or component-config"
            )),
        }
    }
}
