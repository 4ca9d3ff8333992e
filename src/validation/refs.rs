//! Grammars for the identifier strings used in dependency declarations.
//!
//! Every reference is classified by its literal prefix into one dialect,
//! then checked against that dialect's fixed grammar. Strings are only
//! checked for shape; nothing is resolved against a live registry.

use once_cell::sync::Lazy;
use regex::Regex;

const SERVICE_REF_PREFIX: &str = "choreo:///";
const THIRD_PARTY_PREFIX: &str = "thirdparty:";
const DATABASE_PREFIX: &str = "database:";

static SERVICE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^choreo:///[A-Za-z0-9_-]+/[A-Za-z0-9_-]+/[A-Za-z0-9_-]+/[A-Za-z0-9_-]+/v\d+(\.\d+)?/(PUBLIC|PROJECT|ORGANIZATION)$",
    )
    .unwrap()
});

static THIRD_PARTY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^thirdparty:[A-Za-z0-9 _.\-]+/[vV]\d+(\.\d+)*$").unwrap());

static DATABASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^database:([A-Za-z0-9_\-]+/)?[A-Za-z0-9_\-]+$").unwrap());

static RESOURCE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(service:)?(/[A-Za-z0-9_\-]+/)?[A-Za-z0-9_\-]+/v?\d+(\.\d+)*(/[A-Za-z0-9_\-]+)?(/(PUBLIC|PROJECT|ORGANIZATION))?$",
    )
    .unwrap()
});

const SERVICE_REF_SHAPE: &str =
    "choreo:///<org>/<project>/<component>/<endpoint>/v<major>[.<minor>]/<PUBLIC|PROJECT|ORGANIZATION>";
const THIRD_PARTY_SHAPE: &str = "thirdparty:<name>/v<version>";
const DATABASE_SHAPE: &str = "database:[<server>/]<database>";
const RESOURCE_SHAPE: &str =
    "[service:][/<project>/]<component>/<version>[/<endpoint>][/<PUBLIC|PROJECT|ORGANIZATION>]";

/// Reference dialect, keyed by the literal prefix of the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefDialect {
    /// `choreo:///...`: a service endpoint in document form.
    Service,
    /// `thirdparty:...`: an external third-party service.
    ThirdParty,
    /// `database:...`: a database on an optional server.
    Database,
    /// `service:...` or unprefixed: the permissive connection form.
    Resource,
}

pub fn classify(value: &str) -> RefDialect {
    if value.starts_with(SERVICE_REF_PREFIX) {
        RefDialect::Service
    } else if value.starts_with(THIRD_PARTY_PREFIX) {
        RefDialect::ThirdParty
    } else if value.starts_with(DATABASE_PREFIX) {
        RefDialect::Database
    } else {
        // `service:` carries no dedicated grammar; it shares the resource form.
        RefDialect::Resource
    }
}

/// Check a dependency service reference, which must use the document form.
pub fn check_service_ref(value: &str) -> Result<(), String> {
    if SERVICE_REF_RE.is_match(value) {
        Ok(())
    } else {
        Err(format!("must match {SERVICE_REF_SHAPE}"))
    }
}

/// Check a connection resource reference. The dialect is picked by prefix;
/// the permissive unprefixed form is the fallback.
pub fn check_resource_ref(value: &str) -> Result<(), String> {
    match classify(value) {
        RefDialect::Service => check_service_ref(value),
        RefDialect::ThirdParty => {
            if THIRD_PARTY_RE.is_match(value) {
                Ok(())
            } else {
                Err(format!("must match {THIRD_PARTY_SHAPE}"))
            }
        }
        RefDialect::Database => {
            if DATABASE_RE.is_match(value) {
                Ok(())
            } else {
                Err(format!("must match {DATABASE_SHAPE}"))
            }
        }
        RefDialect::Resource => {
            if RESOURCE_REF_RE.is_match(value) {
                Ok(())
            } else {
                Err(format!(
                    "is not a recognized reference; expected {RESOURCE_SHAPE}, {THIRD_PARTY_SHAPE} or {DATABASE_SHAPE}"
                ))
            }
        }
    }
}
