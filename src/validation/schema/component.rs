//! Component descriptor schemas (`component.yaml`, versions 1.0–1.2).
//!
//! Each version is declared in full. Later versions repeat the shared
//! shape instead of inheriting it, so a version can be read top to bottom
//! as the complete contract for its documents.

use serde_yaml::Value;

use crate::models::component::{ComponentDoc, EnvVariable};
use crate::validation::rules::RuleContext;
use crate::validation::violation::Violation;

use super::structure::{Field, ObjectSchema, any, boolean, list, object, one_of, text, version};
use super::{
    COMPONENT_ENDPOINTS, DocumentKind, ENDPOINT_TYPES, NETWORK_VISIBILITIES, SchemaEntry,
    connection_reference_fields, endpoint_name, endpoint_rules, env_name, env_rules, port_number,
    route_path, service_reference_fields, typed,
};

pub(super) fn v1_0() -> SchemaEntry {
    SchemaEntry {
        kind: DocumentKind::Component,
        version: "1.0",
        structural: ObjectSchema::new(vec![
            Field::required("schemaVersion", version("1.0")),
            Field::optional("endpoints", list(object(endpoint_fields()))),
            Field::optional(
                "dependencies",
                object(vec![Field::optional(
                    "serviceReferences",
                    list(object(service_reference_fields())),
                )]),
            ),
        ]),
        semantic: semantic_v1_0,
    }
}

pub(super) fn v1_1() -> SchemaEntry {
    SchemaEntry {
        kind: DocumentKind::Component,
        version: "1.1",
        structural: ObjectSchema::new(vec![
            Field::required("schemaVersion", version("1.1")),
            Field::optional("endpoints", list(object(endpoint_fields()))),
            Field::optional(
                "dependencies",
                object(vec![
                    Field::optional(
                        "serviceReferences",
                        list(object(service_reference_fields())),
                    ),
                    Field::optional(
                        "connectionReferences",
                        list(object(connection_reference_fields())),
                    ),
                ]),
            ),
            Field::optional("configuration", object(configurations_fields(false))),
            Field::optional("configurations", object(configurations_fields(false))),
        ]),
        semantic: semantic_v1_1,
    }
}

pub(super) fn v1_2() -> SchemaEntry {
    SchemaEntry {
        kind: DocumentKind::Component,
        version: "1.2",
        structural: ObjectSchema::new(vec![
            Field::required("schemaVersion", version("1.2")),
            Field::optional("endpoints", list(object(endpoint_fields()))),
            Field::optional(
                "dependencies",
                object(vec![
                    Field::optional(
                        "serviceReferences",
                        list(object(service_reference_fields())),
                    ),
                    Field::optional(
                        "connectionReferences",
                        list(object(connection_reference_fields())),
                    ),
                ]),
            ),
            Field::optional("configuration", object(configurations_fields(true))),
            Field::optional("configurations", object(configurations_fields(true))),
        ]),
        semantic: semantic_v1_2,
    }
}

fn endpoint_fields() -> Vec<Field> {
    vec![
        Field::required("name", endpoint_name()),
        Field::optional("displayName", text()),
        Field::required("type", one_of(ENDPOINT_TYPES)),
        Field::optional("networkVisibilities", list(one_of(NETWORK_VISIBILITIES))),
        Field::required(
            "service",
            object(vec![
                Field::optional("basePath", route_path()),
                Field::required("port", port_number()),
            ]),
        ),
        Field::optional("schemaFilePath", text()),
    ]
}

fn configurations_fields(allow_config_form: bool) -> Vec<Field> {
    vec![Field::optional(
        "env",
        list(object(env_var_fields(allow_config_form))),
    )]
}

fn env_var_fields(allow_config_form: bool) -> Vec<Field> {
    let mut value_from = vec![
        Field::optional("connectionRef", object(binding_fields())),
        Field::optional("configGroupRef", object(binding_fields())),
    ];
    if allow_config_form {
        value_from.push(Field::optional(
            "configForm",
            object(vec![
                Field::optional("displayName", text()),
                Field::optional("required", boolean()),
                Field::optional("type", text()),
            ]),
        ));
    }
    vec![
        Field::required("name", env_name()),
        Field::optional("value", any()),
        Field::optional("valueFrom", object(value_from)),
    ]
}

fn binding_fields() -> Vec<Field> {
    vec![
        Field::required("name", text()),
        Field::required("key", text()),
    ]
}

fn semantic_v1_0(value: &Value, ctx: &RuleContext, out: &mut Vec<Violation>) {
    let Some(doc) = typed::<ComponentDoc>(value, out) else {
        return;
    };
    endpoint_rules(
        doc.endpoints.as_deref(),
        "endpoints",
        &COMPONENT_ENDPOINTS,
        ctx,
        out,
    );
}

fn semantic_v1_1(value: &Value, ctx: &RuleContext, out: &mut Vec<Violation>) {
    let Some(doc) = typed::<ComponentDoc>(value, out) else {
        return;
    };
    endpoint_rules(
        doc.endpoints.as_deref(),
        "endpoints",
        &COMPONENT_ENDPOINTS,
        ctx,
        out,
    );
    let (env, env_path) = env_bindings(&doc);
    env_rules(env, env_path, false, false, out);
}

fn semantic_v1_2(value: &Value, ctx: &RuleContext, out: &mut Vec<Violation>) {
    let Some(doc) = typed::<ComponentDoc>(value, out) else {
        return;
    };
    endpoint_rules(
        doc.endpoints.as_deref(),
        "endpoints",
        &COMPONENT_ENDPOINTS,
        ctx,
        out,
    );
    let (env, env_path) = env_bindings(&doc);
    env_rules(env, env_path, true, true, out);
}

fn env_bindings(doc: &ComponentDoc) -> (Option<&[EnvVariable]>, &'static str) {
    if let Some(c) = &doc.configurations {
        (c.env.as_deref(), "configurations.env")
    } else if let Some(c) = &doc.configuration {
        (c.env.as_deref(), "configuration.env")
    } else {
        (None, "configurations.env")
    }
}
