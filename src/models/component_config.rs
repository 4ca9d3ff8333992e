use serde::{Deserialize, Serialize};

use super::component::ServiceReference;
use super::endpoint::Endpoint;

/// Kubernetes-style component configuration document
/// (`component-config.yaml`, apiVersion `core.choreo.dev/v1beta1`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConfigDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<ComponentConfigSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfigSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound: Option<Vec<Endpoint>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound: Option<OutboundConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_references: Option<Vec<ServiceReference>>,
}
