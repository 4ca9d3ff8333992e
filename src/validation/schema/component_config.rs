//! Kubernetes-style component configuration schema
//! (`component-config.yaml`, apiVersion `core.choreo.dev/v1beta1`).

use serde_yaml::Value;

use crate::models::component_config::ComponentConfigDoc;
use crate::validation::rules::RuleContext;
use crate::validation::violation::Violation;

use super::structure::{Field, ObjectSchema, list, literal, object, one_of, text};
use super::{
    COMPONENT_CONFIG_API_VERSION, COMPONENT_CONFIG_KIND, COMPONENT_CONFIG_VERSION, DocumentKind,
    ENDPOINT_TYPES, NETWORK_VISIBILITIES, STANDALONE_ENDPOINTS, SchemaEntry, endpoint_name,
    endpoint_rules, port_number, route_path, service_reference_fields, typed,
};

pub(super) fn v1beta1() -> SchemaEntry {
    SchemaEntry {
        kind: DocumentKind::ComponentConfig,
        version: COMPONENT_CONFIG_VERSION,
        structural: ObjectSchema::new(vec![
            Field::required("apiVersion", literal(COMPONENT_CONFIG_API_VERSION)),
            Field::required("kind", literal(COMPONENT_CONFIG_KIND)),
            Field::optional(
                "spec",
                object(vec![
                    Field::optional("inbound", list(object(inbound_endpoint_fields()))),
                    Field::optional(
                        "outbound",
                        object(vec![Field::optional(
                            "serviceReferences",
                            list(object(service_reference_fields())),
                        )]),
                    ),
                ]),
            ),
        ]),
        semantic: semantic_v1beta1,
    }
}

fn inbound_endpoint_fields() -> Vec<Field> {
    vec![
        Field::required("name", endpoint_name()),
        Field::optional("displayName", text()),
        Field::required("port", port_number()),
        Field::required("type", one_of(ENDPOINT_TYPES)),
        Field::optional("networkVisibility", one_of(NETWORK_VISIBILITIES)),
        Field::optional("context", route_path()),
        Field::optional("schemaFilePath", text()),
    ]
}

fn semantic_v1beta1(value: &Value, ctx: &RuleContext, out: &mut Vec<Violation>) {
    let Some(doc) = typed::<ComponentConfigDoc>(value, out) else {
        return;
    };
    let inbound = doc.spec.as_ref().and_then(|s| s.inbound.as_deref());
    endpoint_rules(inbound, "spec.inbound", &STANDALONE_ENDPOINTS, ctx, out);
}
