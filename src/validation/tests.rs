use std::io;
use std::path::Path;

use serde_yaml::Value;

use super::violation::Violation;
use super::{
    DocumentKind, FileProbe, ValidationError, format_failure, validate, validate_with_probe,
};

fn doc(yaml: &str) -> Value {
    serde_yaml::from_str(yaml).unwrap()
}

fn violations_of(result: Result<(), ValidationError>) -> Vec<Violation> {
    match result {
        Err(ValidationError::Invalid { violations }) => violations,
        other => panic!("expected violations, got {other:?}"),
    }
}

/// Probe that reports every file as present.
struct AllFiles;

impl FileProbe for AllFiles {
    fn exists(&self, _: &Path) -> io::Result<bool> {
        Ok(true)
    }
}

/// Probe that reports every file as missing.
struct NoFiles;

impl FileProbe for NoFiles {
    fn exists(&self, _: &Path) -> io::Result<bool> {
        Ok(false)
    }
}

/// Probe whose I/O always fails.
struct BrokenProbe;

impl FileProbe for BrokenProbe {
    fn exists(&self, _: &Path) -> io::Result<bool> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "permission denied",
        ))
    }
}

fn check(yaml: &str, kind: DocumentKind, version: &str) -> Result<(), ValidationError> {
    validate_with_probe(&doc(yaml), kind, version, Path::new("."), &AllFiles)
}

const VALID_COMPONENT_1_1: &str = r#"
schemaVersion: 1.1
endpoints:
  - name: api
    displayName: Orders API
    type: REST
    service:
      basePath: /api
      port: 8080
    networkVisibilities:
      - Public
dependencies:
  serviceReferences:
    - name: choreo:///acme/shop/billing/invoice/v1/PUBLIC
      connectionConfig: 01234567-89ab-cdef-0123-456789abcdef
      env:
        - from: ServiceURL
          to: BILLING_URL
  connectionReferences:
    - name: primary db
      resourceRef: database:primary/orders
configurations:
  env:
    - name: LOG_LEVEL
      value: debug
"#;

#[test]
fn valid_component_passes() {
    assert!(check(VALID_COMPONENT_1_1, DocumentKind::Component, "1.1").is_ok());
}

#[test]
fn validation_is_deterministic() {
    let tree = doc(
        r#"
schemaVersion: 1.2
endpoints:
  - name: API
    type: GRPC
    networkVisibilities: [Public]
    service:
      port: 99
configurations:
  env:
    - name: DUP
      value: a
    - name: DUP
"#,
    );
    let first = violations_of(validate_with_probe(
        &tree,
        DocumentKind::Component,
        "1.2",
        Path::new("."),
        &AllFiles,
    ));
    let second = violations_of(validate_with_probe(
        &tree,
        DocumentKind::Component,
        "1.2",
        Path::new("."),
        &AllFiles,
    ));
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn duplicate_endpoint_names_produce_one_violation() {
    let result = check(
        r#"
schemaVersion: 1.0
endpoints:
  - name: api
    type: REST
    service: { basePath: /a, port: 8080 }
  - name: api
    type: REST
    service: { basePath: /b, port: 8081 }
"#,
        DocumentKind::Component,
        "1.0",
    );
    let violations = violations_of(result);
    let unique: Vec<_> = violations
        .iter()
        .filter(|v| v.message.contains("must be unique"))
        .collect();
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].path, "endpoints[1].name");
}

#[test]
fn one_duplicate_among_three_is_still_one_violation() {
    let result = check(
        r#"
schemaVersion: 1.0
endpoints:
  - name: api
    type: REST
    service: { basePath: /a, port: 8080 }
  - name: web
    type: REST
    service: { basePath: /b, port: 8081 }
  - name: api
    type: REST
    service: { basePath: /c, port: 8082 }
"#,
        DocumentKind::Component,
        "1.0",
    );
    let violations = violations_of(result);
    assert_eq!(
        violations
            .iter()
            .filter(|v| v.message.contains("must be unique"))
            .count(),
        1
    );
}

#[test]
fn context_is_required_for_rest_but_not_tcp() {
    let result = check(
        r#"
version: 0.1
endpoints:
  - name: Greeter
    port: 8080
    type: REST
  - name: Relay
    port: 8081
    type: TCP
    networkVisibility: Project
"#,
        DocumentKind::Endpoints,
        "0.1",
    );
    let violations = violations_of(result);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, "endpoints[0].context");
    assert!(
        violations[0]
            .message
            .contains("is required for REST-type endpoints")
    );
}

#[test]
fn grpc_visibility_must_be_exactly_project() {
    let bad = check(
        r#"
schemaVersion: 1.0
endpoints:
  - name: grpc-api
    type: GRPC
    networkVisibilities: [Public]
    service: { port: 8080 }
"#,
        DocumentKind::Component,
        "1.0",
    );
    let violations = violations_of(bad);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, "endpoints[0].networkVisibilities");
    assert!(violations[0].message.contains("'grpc-api'"));
    assert!(violations[0].message.contains("Project"));

    let good = check(
        r#"
schemaVersion: 1.0
endpoints:
  - name: grpc-api
    type: GRPC
    networkVisibilities: [Project]
    service: { port: 8080 }
"#,
        DocumentKind::Component,
        "1.0",
    );
    assert!(good.is_ok());
}

#[test]
fn grpc_with_extra_visibilities_is_rejected() {
    let result = check(
        r#"
schemaVersion: 1.0
endpoints:
  - name: grpc-api
    type: GRPC
    networkVisibilities: [Project, Organization]
    service: { port: 8080 }
"#,
        DocumentKind::Component,
        "1.0",
    );
    assert_eq!(violations_of(result).len(), 1);
}

#[test]
fn env_binding_needs_exactly_one_source_in_1_2() {
    let result = check(
        r#"
schemaVersion: 1.2
configurations:
  env:
    - name: BOTH
      value: x
      valueFrom:
        connectionRef: { name: conn, key: url }
    - name: NONE
    - name: OK
      value: "1"
"#,
        DocumentKind::Component,
        "1.2",
    );
    let violations = violations_of(result);
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].path, "configurations.env[0]");
    assert!(violations[0].message.contains("are all set"));
    assert_eq!(violations[1].path, "configurations.env[1]");
    assert!(violations[1].message.contains("none are set"));
}

#[test]
fn config_form_counts_as_a_source_in_1_2() {
    let result = check(
        r#"
schemaVersion: 1.2
configurations:
  env:
    - name: PROMPTED
      valueFrom:
        configForm:
          displayName: Database password
          required: true
          type: secret
"#,
        DocumentKind::Component,
        "1.2",
    );
    assert!(result.is_ok());
}

#[test]
fn unset_env_binding_is_tolerated_in_1_1() {
    let result = check(
        r#"
schemaVersion: 1.1
configurations:
  env:
    - name: PENDING
"#,
        DocumentKind::Component,
        "1.1",
    );
    assert!(result.is_ok());
}

#[test]
fn conflicting_env_sources_are_rejected_in_1_1() {
    let result = check(
        r#"
schemaVersion: 1.1
configurations:
  env:
    - name: BOTH
      value: x
      valueFrom:
        configGroupRef: { name: shared, key: url }
"#,
        DocumentKind::Component,
        "1.1",
    );
    let violations = violations_of(result);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("only one value source"));
}

#[test]
fn duplicate_env_names_are_rejected() {
    let result = check(
        r#"
schemaVersion: 1.2
configurations:
  env:
    - name: TOKEN
      value: a
    - name: TOKEN
      value: b
"#,
        DocumentKind::Component,
        "1.2",
    );
    let violations = violations_of(result);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, "configurations.env[1].name");
    assert!(violations[0].message.contains("must be unique"));
}

#[test]
fn env_name_grammar_is_enforced() {
    let result = check(
        r#"
schemaVersion: 1.1
configurations:
  env:
    - name: 1BAD
      value: x
"#,
        DocumentKind::Component,
        "1.1",
    );
    let violations = violations_of(result);
    assert_eq!(violations[0].path, "configurations.env[0].name");
}

#[test]
fn port_bounds_are_exclusive() {
    let result = check(
        r#"
version: 0.1
endpoints:
  - name: low
    port: 1000
    type: TCP
    networkVisibility: Project
  - name: low-ok
    port: 1001
    type: TCP
    networkVisibility: Project
  - name: high-ok
    port: 65534
    type: TCP
    networkVisibility: Project
  - name: high
    port: 65535
    type: TCP
    networkVisibility: Project
"#,
        DocumentKind::Endpoints,
        "0.1",
    );
    let violations = violations_of(result);
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].path, "endpoints[0].port");
    assert_eq!(violations[1].path, "endpoints[3].port");
    for violation in &violations {
        assert!(
            violation
                .message
                .contains("strictly between 1000 and 65535")
        );
    }
}

#[test]
fn unsupported_version_is_a_fatal_error_not_a_violation() {
    let result = check(VALID_COMPONENT_1_1, DocumentKind::Component, "1.3");
    match result {
        Err(ValidationError::UnsupportedSchema { kind, version }) => {
            assert_eq!(kind, DocumentKind::Component);
            assert_eq!(version, "1.3");
        }
        other => panic!("expected UnsupportedSchema, got {other:?}"),
    }
}

#[test]
fn version_1_2_is_dispatchable() {
    let result = check(
        r#"
schemaVersion: 1.2
endpoints:
  - name: api
    type: REST
    service: { basePath: /api, port: 8080 }
"#,
        DocumentKind::Component,
        "1.2",
    );
    assert!(result.is_ok());
}

#[test]
fn missing_schema_version_field_is_reported() {
    let result = check(
        r#"
endpoints:
  - name: api
    type: REST
    service: { basePath: /api, port: 8080 }
"#,
        DocumentKind::Component,
        "1.2",
    );
    let violations = violations_of(result);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, "schemaVersion");
    assert!(violations[0].message.contains("is required"));
}

#[test]
fn bad_service_reference_and_connection_config_stack_up() {
    let result = check(
        r#"
schemaVersion: 1.0
dependencies:
  serviceReferences:
    - name: thirdparty:Stripe API/v2.1
      connectionConfig: not-a-uuid
"#,
        DocumentKind::Component,
        "1.0",
    );
    let violations = violations_of(result);
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].path, "dependencies.serviceReferences[0].name");
    assert!(violations[0].message.contains("choreo:///"));
    assert_eq!(
        violations[1].path,
        "dependencies.serviceReferences[0].connectionConfig"
    );
    assert!(violations[1].message.contains("UUID"));
}

#[test]
fn connection_reference_grammar_dispatches_by_prefix() {
    let result = check(
        r#"
schemaVersion: 1.1
dependencies:
  connectionReferences:
    - name: payments
      resourceRef: thirdparty:Stripe API/2.1
"#,
        DocumentKind::Component,
        "1.1",
    );
    let violations = violations_of(result);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].path,
        "dependencies.connectionReferences[0].resourceRef"
    );
    assert!(violations[0].message.contains("thirdparty:<name>/v<version>"));
}

#[test]
fn missing_schema_file_is_a_violation() {
    let tree = doc(
        r#"
version: 0.1
endpoints:
  - name: api
    port: 8080
    type: REST
    context: /api
    schemaFilePath: openapi.yaml
"#,
    );
    let result = validate_with_probe(
        &tree,
        DocumentKind::Endpoints,
        "0.1",
        Path::new("."),
        &NoFiles,
    );
    let violations = violations_of(result);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, "endpoints[0].schemaFilePath");
    assert!(violations[0].message.contains("was not found"));
}

#[test]
fn probe_failure_is_a_violation_and_does_not_abort_the_pass() {
    let tree = doc(
        r#"
version: 0.1
endpoints:
  - name: api
    port: 8080
    type: REST
    context: /api
    schemaFilePath: openapi.yaml
  - name: api
    port: 8081
    type: REST
    context: /api2
"#,
    );
    let result = validate_with_probe(
        &tree,
        DocumentKind::Endpoints,
        "0.1",
        Path::new("."),
        &BrokenProbe,
    );
    let violations = violations_of(result);
    // Both the duplicate name and the probe failure are reported.
    assert!(violations.iter().any(|v| v.message.contains("must be unique")));
    assert!(
        violations
            .iter()
            .any(|v| v.message.contains("could not be checked")
                && v.message.contains("permission denied"))
    );
}

#[test]
fn schema_file_resolves_against_the_source_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("openapi.yaml"), "openapi: 3.0.0\n").unwrap();
    let tree = doc(
        r#"
version: 0.1
endpoints:
  - name: api
    port: 8080
    type: REST
    context: /api
    schemaFilePath: openapi.yaml
"#,
    );
    assert!(validate(&tree, DocumentKind::Endpoints, "0.1", dir.path()).is_ok());
}

#[test]
fn valid_component_config_passes() {
    let result = check(
        r#"
apiVersion: core.choreo.dev/v1beta1
kind: ComponentConfig
spec:
  inbound:
    - name: api
      port: 8080
      type: REST
      context: /api
  outbound:
    serviceReferences:
      - name: choreo:///acme/shop/billing/invoice/v1/PROJECT
        connectionConfig: 01234567-89ab-cdef-0123-456789abcdef
        env:
          - from: ServiceURL
            to: BILLING_URL
"#,
        DocumentKind::ComponentConfig,
        "v1beta1",
    );
    assert!(result.is_ok());
}

#[test]
fn component_config_checks_its_literals() {
    let result = check(
        r#"
apiVersion: core.choreo.dev/v2
kind: Component
"#,
        DocumentKind::ComponentConfig,
        "v1beta1",
    );
    let violations = violations_of(result);
    assert_eq!(violations.len(), 2);
    assert!(violations[0].message.contains("core.choreo.dev/v1beta1"));
    assert!(violations[1].message.contains("ComponentConfig"));
}

#[test]
fn unknown_extension_fields_are_tolerated() {
    let result = check(
        r#"
schemaVersion: 1.0
endpoints:
  - name: api
    type: REST
    service: { basePath: /api, port: 8080 }
    annotations:
      team: payments
buildpack: java
"#,
        DocumentKind::Component,
        "1.0",
    );
    assert!(result.is_ok());
}

#[test]
fn endpoint_name_grammar_applies_to_component_documents() {
    let result = check(
        r#"
schemaVersion: 1.0
endpoints:
  - name: Not Valid
    type: REST
    service: { basePath: /api, port: 8080 }
"#,
        DocumentKind::Component,
        "1.0",
    );
    let violations = violations_of(result);
    assert_eq!(violations[0].path, "endpoints[0].name");
    assert!(violations[0].message.contains("lowercase"));
}

#[test]
fn single_violation_is_reported_inline() {
    let error = ValidationError::Invalid {
        violations: vec![Violation::field("endpoints[0].context", "is required")],
    };
    let message = format_failure(&error, DocumentKind::Component);
    assert_eq!(
        message,
        "component configuration validation failed: endpoints[0].context is required"
    );
}

#[test]
fn multiple_violations_are_reported_as_a_list() {
    let error = ValidationError::Invalid {
        violations: vec![
            Violation::field("endpoints[0].context", "is required"),
            Violation::field("endpoints[1].port", "must be an integer"),
        ],
    };
    let message = format_failure(&error, DocumentKind::Endpoints);
    assert_eq!(
        message,
        "endpoints configuration validation failed:\n  - endpoints[0].context is required\n  - endpoints[1].port must be an integer"
    );
}

#[test]
fn empty_violation_list_is_an_internal_error() {
    let error = ValidationError::Invalid { violations: vec![] };
    let message = format_failure(&error, DocumentKind::Component);
    assert!(message.starts_with("internal error"));
}

#[test]
fn unsupported_schema_is_reported_as_internal() {
    let error = ValidationError::UnsupportedSchema {
        kind: DocumentKind::Component,
        version: "9.9".to_string(),
    };
    let message = format_failure(&error, DocumentKind::Component);
    assert!(message.starts_with("internal error"));
    assert!(message.contains("9.9"));
}
