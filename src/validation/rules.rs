//! Reusable cross-field rules. Each rule is a pure function over the
//! parent record (or collection) and produces at most one violation per
//! invocation; rules never short-circuit their siblings.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;

use crate::models::endpoint::{Endpoint, NetworkVisibility};

use super::probe::FileProbe;
use super::violation::{Violation, index_path, join_path};

/// Read-only collaborators handed to the semantic rule passes.
pub struct RuleContext<'a> {
    pub source_root: &'a Path,
    pub probe: &'a dyn FileProbe,
}

/// Fails when two elements of a collection share a key. An absent or
/// empty collection is valid; the violation lands on the first element
/// that repeats an earlier key.
pub fn unique_by_key<T, K, F>(
    items: &[T],
    key: F,
    collection_path: &str,
    key_field: &str,
    scope: &str,
) -> Option<Violation>
where
    K: Eq + Hash + Display,
    F: Fn(&T) -> Option<K>,
{
    let mut seen = HashSet::new();
    for (i, item) in items.iter().enumerate() {
        let Some(k) = key(item) else { continue };
        if seen.contains(&k) {
            let path = join_path(&index_path(collection_path, i), key_field);
            return Some(Violation::field(
                path,
                format!("'{k}' must be unique within {scope}"),
            ));
        }
        seen.insert(k);
    }
    None
}

/// Fails when `condition` holds for the parent record and the field is
/// absent or blank.
pub fn conditional_required(
    value: Option<&str>,
    condition: bool,
    path: &str,
    detail: &str,
) -> Option<Violation> {
    if condition && value.is_none_or(|v| v.trim().is_empty()) {
        Some(Violation::field(path, detail))
    } else {
        None
    }
}

/// Fails unless precisely one of the listed sources is present.
pub fn exactly_one_of(sources: &[(&str, bool)], path: &str) -> Option<Violation> {
    let present: Vec<&str> = sources.iter().filter(|(_, p)| *p).map(|(n, _)| *n).collect();
    let expected = || {
        sources
            .iter()
            .map(|(n, _)| *n)
            .collect::<Vec<_>>()
            .join(", ")
    };
    match present.len() {
        1 => None,
        0 => Some(Violation::field(
            path,
            format!("must set exactly one of {}; none are set", expected()),
        )),
        _ => Some(Violation::field(
            path,
            format!(
                "must set exactly one of {}; {} are all set",
                expected(),
                present.join(", ")
            ),
        )),
    }
}

/// Conflict-only variant of [`exactly_one_of`]: zero sources is tolerated.
pub fn at_most_one_of(sources: &[(&str, bool)], path: &str) -> Option<Violation> {
    let present: Vec<&str> = sources.iter().filter(|(_, p)| *p).map(|(n, _)| *n).collect();
    if present.len() > 1 {
        Some(Violation::field(
            path,
            format!("may set only one value source; {} are all set", present.join(", ")),
        ))
    } else {
        None
    }
}

/// Fails when the endpoint type is project-scoped (GRPC, TCP, UDP) and
/// the declared visibilities are anything but exactly `Project`.
pub fn restricted_visibility(
    endpoint: &Endpoint,
    endpoint_path: &str,
    visibility_field: &str,
) -> Option<Violation> {
    let ty = endpoint.parsed_type()?;
    if !ty.is_project_scoped() {
        return None;
    }
    let declared = endpoint.declared_visibilities();
    let only_project = declared.len() == 1
        && declared[0].parse::<NetworkVisibility>() == Ok(NetworkVisibility::Project);
    if only_project {
        return None;
    }
    let name = endpoint.name.as_deref().unwrap_or("<unnamed>");
    Some(Violation::field(
        join_path(endpoint_path, visibility_field),
        format!(
            "endpoint '{name}' of type {} may only use the Project network visibility",
            ty.as_str()
        ),
    ))
}

/// Delegates to the injected filesystem probe. An absent path is valid;
/// a probe I/O failure becomes its own violation instead of aborting
/// the validation pass.
pub fn probe_file(ctx: &RuleContext, relative: Option<&str>, path: &str) -> Option<Violation> {
    let relative = relative?;
    if relative.trim().is_empty() {
        return None;
    }
    let target = ctx.source_root.join(relative);
    match ctx.probe.exists(&target) {
        Ok(true) => None,
        Ok(false) => Some(Violation::field(
            path,
            format!("file '{relative}' was not found under the component source directory"),
        )),
        Err(e) => Some(Violation::field(
            path,
            format!("file '{relative}' could not be checked: {e}"),
        )),
    }
}
