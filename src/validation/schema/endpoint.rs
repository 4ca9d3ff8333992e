//! Standalone endpoint list schema (`endpoints.yaml`, version 0.1).
//!
//! The 0.1 dialect keeps `port` and `context` on the endpoint itself and
//! uses a single `networkVisibility` value. Endpoint names predate the
//! lowercase grammar and are only required to be present.

use serde_yaml::Value;

use crate::models::endpoint::EndpointsDoc;
use crate::validation::rules::RuleContext;
use crate::validation::violation::Violation;

use super::structure::{Field, ObjectSchema, list, object, one_of, text, version};
use super::{
    DocumentKind, ENDPOINT_TYPES, ENDPOINTS_DOC_VERSION, NETWORK_VISIBILITIES, STANDALONE_ENDPOINTS,
    SchemaEntry, endpoint_rules, port_number, route_path, typed,
};

pub(super) fn v0_1() -> SchemaEntry {
    SchemaEntry {
        kind: DocumentKind::Endpoints,
        version: ENDPOINTS_DOC_VERSION,
        structural: ObjectSchema::new(vec![
            Field::required("version", version(ENDPOINTS_DOC_VERSION)),
            Field::required(
                "endpoints",
                list(object(vec![
                    Field::required("name", text()),
                    Field::optional("displayName", text()),
                    Field::required("port", port_number()),
                    Field::required("type", one_of(ENDPOINT_TYPES)),
                    Field::optional("networkVisibility", one_of(NETWORK_VISIBILITIES)),
                    Field::optional("context", route_path()),
                    Field::optional("schemaFilePath", text()),
                ])),
            ),
        ]),
        semantic: semantic_v0_1,
    }
}

fn semantic_v0_1(value: &Value, ctx: &RuleContext, out: &mut Vec<Violation>) {
    let Some(doc) = typed::<EndpointsDoc>(value, out) else {
        return;
    };
    endpoint_rules(
        doc.endpoints.as_deref(),
        "endpoints",
        &STANDALONE_ENDPOINTS,
        ctx,
        out,
    );
}
