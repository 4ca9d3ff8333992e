use serde::{Deserialize, Serialize};

use super::endpoint::Endpoint;

/// Component descriptor (`component.yaml`, schemaVersion 1.0 / 1.1 / 1.2).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<serde_yaml::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<Endpoint>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,

    // Both spellings appear in the wild; `configurations` wins when both
    // are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Configurations>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Configurations>,
}

impl ComponentDoc {
    pub fn effective_configurations(&self) -> Option<&Configurations> {
        self.configurations.as_ref().or(self.configuration.as_ref())
    }
}

/// Outbound dependencies of a component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependencies {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_references: Option<Vec<ServiceReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_references: Option<Vec<ConnectionReference>>,
}

/// A dependency on another service endpoint, in document form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_config: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvMapping>>,
}

/// `{from, to}` pair injecting a connection value into an env variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// A named connection to a service, third-party API or database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_ref: Option<String>,
}

/// Environment variable bindings of the component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configurations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVariable>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVariable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    // Any scalar is acceptable as a literal value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_yaml::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_from: Option<ValueFrom>,
}

impl EnvVariable {
    pub fn has_literal_value(&self) -> bool {
        self.value.as_ref().is_some_and(|v| !v.is_null())
    }
}

/// Indirect value sources for an env variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueFrom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_ref: Option<RefBinding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_group_ref: Option<RefBinding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_form: Option<ConfigForm>,
}

/// `{name, key}` lookup into a connection or configuration group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefBinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Prompt-at-deploy-time value source (schemaVersion 1.2 and later).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
}
