use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One network endpoint exposed by a component.
///
/// The same struct backs both endpoint dialects: the standalone endpoint
/// list (`version: 0.1`, top-level `port`/`context`, singular
/// `networkVisibility`) and the component descriptor (`service.basePath`
/// plus `service.port`, plural `networkVisibilities`). Per-version schemas
/// decide which fields are declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_visibility: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_visibilities: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<EndpointService>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
}

impl Endpoint {
    /// The request path prefix in either dialect (`context` or
    /// `service.basePath`).
    pub fn route_prefix(&self) -> Option<&str> {
        self.context
            .as_deref()
            .or_else(|| self.service.as_ref()?.base_path.as_deref())
    }

    pub fn parsed_type(&self) -> Option<EndpointType> {
        self.endpoint_type.as_deref()?.parse().ok()
    }

    /// Declared visibilities, merging the singular and plural spellings.
    pub fn declared_visibilities(&self) -> Vec<&str> {
        let mut all = Vec::new();
        if let Some(v) = self.network_visibility.as_deref() {
            all.push(v);
        }
        if let Some(vs) = &self.network_visibilities {
            all.extend(vs.iter().map(String::as_str));
        }
        all
    }
}

/// Transport/protocol family of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointType {
    Rest,
    GraphQl,
    Grpc,
    Tcp,
    Udp,
    Ws,
}

impl EndpointType {
    /// Types whose endpoints take requests on a path prefix.
    pub fn requires_route_prefix(self) -> bool {
        matches!(self, Self::Rest | Self::GraphQl | Self::Ws)
    }

    /// Types that may only be exposed within the project.
    pub fn is_project_scoped(self) -> bool {
        matches!(self, Self::Grpc | Self::Tcp | Self::Udp)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rest => "REST",
            Self::GraphQl => "GraphQL",
            Self::Grpc => "GRPC",
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
            Self::Ws => "WS",
        }
    }
}

impl FromStr for EndpointType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REST" => Ok(Self::Rest),
            "GraphQL" => Ok(Self::GraphQl),
            "GRPC" => Ok(Self::Grpc),
            "TCP" => Ok(Self::Tcp),
            "UDP" => Ok(Self::Udp),
            "WS" => Ok(Self::Ws),
            _ => Err(()),
        }
    }
}

/// Exposure scope of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkVisibility {
    Public,
    Project,
    Organization,
}

impl NetworkVisibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Project => "Project",
            Self::Organization => "Organization",
        }
    }
}

impl FromStr for NetworkVisibility {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Public" => Ok(Self::Public),
            "Project" => Ok(Self::Project),
            "Organization" => Ok(Self::Organization),
            _ => Err(()),
        }
    }
}

/// Standalone endpoint list document (`endpoints.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<serde_yaml::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<Endpoint>>,
}
