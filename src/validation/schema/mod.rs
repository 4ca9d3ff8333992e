//! Versioned schema registry.
//!
//! Every supported `(document kind, schema version)` pair has one
//! [`SchemaEntry`]: a structural declaration walked against the raw tree,
//! plus an enumerated semantic pass run over the typed model. Entries are
//! complete, independent declarations; versions share leaf constraints and
//! rule helpers but never inherit from each other.

mod component;
mod component_config;
mod endpoint;
mod structure;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;

use crate::models::component::EnvVariable;
use crate::models::endpoint::Endpoint;

use super::DocumentKind;
use super::refs;
use super::rules::{
    RuleContext, at_most_one_of, conditional_required, exactly_one_of, probe_file,
    restricted_visibility, unique_by_key,
};
use super::violation::{Violation, index_path, join_path};

pub use structure::ObjectSchema;
use structure::{Field, FieldType, PatternRule, StrRules, checked, list, object, text};

// Constraint constants shared by every version that declares the field.

pub const PORT_LOWER_BOUND: i64 = 1000; // exclusive
pub const PORT_UPPER_BOUND: i64 = 65535; // exclusive
pub const ENDPOINT_NAME_MAX: usize = 50;
pub const CONNECTION_NAME_MAX: usize = 50;

pub static ENDPOINT_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").unwrap());
pub static ENV_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
pub static ROUTE_PATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/[a-zA-Z0-9/\-_]*$").unwrap());
pub static CONNECTION_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _-]*$").unwrap());
pub static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

pub const ENDPOINT_TYPES: &[&str] = &["REST", "GraphQL", "GRPC", "TCP", "UDP", "WS"];
pub const NETWORK_VISIBILITIES: &[&str] = &["Public", "Project", "Organization"];

pub const COMPONENT_CONFIG_API_VERSION: &str = "core.choreo.dev/v1beta1";
pub const COMPONENT_CONFIG_KIND: &str = "ComponentConfig";
pub const COMPONENT_CONFIG_VERSION: &str = "v1beta1";
pub const ENDPOINTS_DOC_VERSION: &str = "0.1";
pub const LATEST_COMPONENT_VERSION: &str = "1.2";

/// One registered schema: the structural declaration plus the semantic
/// rule pass for a single `(kind, version)` pair.
pub struct SchemaEntry {
    pub kind: DocumentKind,
    pub version: &'static str,
    pub structural: ObjectSchema,
    pub semantic: SemanticPass,
}

pub type SemanticPass = fn(&Value, &RuleContext, &mut Vec<Violation>);

static REGISTRY: Lazy<Vec<SchemaEntry>> = Lazy::new(|| {
    vec![
        component::v1_0(),
        component::v1_1(),
        component::v1_2(),
        endpoint::v0_1(),
        component_config::v1beta1(),
    ]
});

/// Exact-equality lookup; no version range matching.
pub fn lookup(kind: DocumentKind, version: &str) -> Option<&'static SchemaEntry> {
    REGISTRY
        .iter()
        .find(|entry| entry.kind == kind && entry.version == version)
}

// Leaf constraints reused across version declarations.

fn endpoint_name() -> FieldType {
    FieldType::Str(StrRules {
        pattern: Some(PatternRule {
            re: &ENDPOINT_NAME_RE,
            expects: "must start with a lowercase letter and contain only lowercase letters, digits, '-' and '_'",
        }),
        max_len: Some(ENDPOINT_NAME_MAX),
        ..StrRules::default()
    })
}

fn port_number() -> FieldType {
    structure::int_between_exclusive(PORT_LOWER_BOUND, PORT_UPPER_BOUND)
}

fn route_path() -> FieldType {
    structure::pattern(
        &ROUTE_PATH_RE,
        "must start with '/' and contain only letters, digits, '/', '-' and '_'",
    )
}

fn env_name() -> FieldType {
    structure::pattern(
        &ENV_NAME_RE,
        "must start with a letter or '_' and contain only letters, digits and '_'",
    )
}

fn connection_name() -> FieldType {
    FieldType::Str(StrRules {
        pattern: Some(PatternRule {
            re: &CONNECTION_NAME_RE,
            expects: "must start with a letter or digit and contain only letters, digits, spaces, '-' and '_'",
        }),
        max_len: Some(CONNECTION_NAME_MAX),
        ..StrRules::default()
    })
}

fn uuid_string() -> FieldType {
    structure::pattern(&UUID_RE, "must be a UUID")
}

// Field groups shared by more than one document kind.

fn service_reference_fields() -> Vec<Field> {
    vec![
        Field::required("name", checked(refs::check_service_ref)),
        Field::required("connectionConfig", uuid_string()),
        Field::optional(
            "env",
            list(object(vec![
                Field::required("from", text()),
                Field::required("to", text()),
            ])),
        ),
    ]
}

fn connection_reference_fields() -> Vec<Field> {
    vec![
        Field::required("name", connection_name()),
        Field::required("resourceRef", checked(refs::check_resource_ref)),
    ]
}

// Semantic rule passes shared across dialects. The two endpoint dialects
// spell the route prefix and visibility fields differently.

struct EndpointDialect {
    prefix_field: &'static str,
    visibility_field: &'static str,
}

const COMPONENT_ENDPOINTS: EndpointDialect = EndpointDialect {
    prefix_field: "service.basePath",
    visibility_field: "networkVisibilities",
};

const STANDALONE_ENDPOINTS: EndpointDialect = EndpointDialect {
    prefix_field: "context",
    visibility_field: "networkVisibility",
};

fn endpoint_rules(
    endpoints: Option<&[Endpoint]>,
    list_path: &str,
    dialect: &EndpointDialect,
    ctx: &RuleContext,
    out: &mut Vec<Violation>,
) {
    let Some(endpoints) = endpoints else { return };
    out.extend(unique_by_key(
        endpoints,
        |e| e.name.clone(),
        list_path,
        "name",
        "the endpoint collection",
    ));
    for (i, endpoint) in endpoints.iter().enumerate() {
        let endpoint_path = index_path(list_path, i);
        if let Some(ty) = endpoint.parsed_type() {
            out.extend(conditional_required(
                endpoint.route_prefix(),
                ty.requires_route_prefix(),
                &join_path(&endpoint_path, dialect.prefix_field),
                &format!("is required for {}-type endpoints", ty.as_str()),
            ));
        }
        out.extend(restricted_visibility(
            endpoint,
            &endpoint_path,
            dialect.visibility_field,
        ));
        out.extend(probe_file(
            ctx,
            endpoint.schema_file_path.as_deref(),
            &join_path(&endpoint_path, "schemaFilePath"),
        ));
    }
}

/// Env-binding rules. 1.2 recognizes `configForm` as a fourth source and
/// requires exactly one source; 1.1 only rejects conflicting sources.
fn env_rules(
    vars: Option<&[EnvVariable]>,
    list_path: &str,
    allow_config_form: bool,
    strict_completeness: bool,
    out: &mut Vec<Violation>,
) {
    let Some(vars) = vars else { return };
    out.extend(unique_by_key(
        vars,
        |v| v.name.clone(),
        list_path,
        "name",
        "the environment variable collection",
    ));
    for (i, var) in vars.iter().enumerate() {
        let var_path = index_path(list_path, i);
        let from = var.value_from.as_ref();
        let mut sources = vec![
            ("value", var.has_literal_value()),
            (
                "valueFrom.connectionRef",
                from.is_some_and(|f| f.connection_ref.is_some()),
            ),
            (
                "valueFrom.configGroupRef",
                from.is_some_and(|f| f.config_group_ref.is_some()),
            ),
        ];
        if allow_config_form {
            sources.push((
                "valueFrom.configForm",
                from.is_some_and(|f| f.config_form.is_some()),
            ));
        }
        if strict_completeness {
            out.extend(exactly_one_of(&sources, &var_path));
        } else {
            out.extend(at_most_one_of(&sources, &var_path));
        }
    }
}

/// Deserialize the typed model for the semantic pass. When the document
/// does not fit the model, the structural pass has already reported the
/// type violations and the semantic pass is skipped; the serde detail is
/// only surfaced if nothing else was reported.
fn typed<T: serde::de::DeserializeOwned>(value: &Value, out: &mut Vec<Violation>) -> Option<T> {
    match serde_yaml::from_value(value.clone()) {
        Ok(doc) => Some(doc),
        Err(e) => {
            if out.is_empty() {
                out.push(Violation::document(format!(
                    "document could not be interpreted: {e}"
                )));
            }
            None
        }
    }
}
