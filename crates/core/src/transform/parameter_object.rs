use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::{GlobalContext, TransformOptions, child_path, is_true, ref_of, schema_object_comment, schema_type};
use crate::load::DocumentMap;
use crate::reference::{canonical_index, make_ts_index, parse_ts_index};
use crate::ts::utils::{ts_non_nullable, ts_pick};
use crate::ts::{PropKey, TsProp, TsType};
use crate::walk::visit;

/// Parameter locations in the order their groups are rendered.
pub(crate) const LOCATIONS: [&str; 4] = ["query", "header", "path", "cookie"];

/// `in` of every parameter object, keyed by its canonical index path.
pub type ParameterLocations = HashMap<String, String>;

/// Record the location of every parameter object across the loaded documents,
/// so parameters introduced by reference can be grouped without their body.
pub fn collect_parameter_locations(documents: &DocumentMap) -> ParameterLocations {
    let mut locations = ParameterLocations::new();
    for (id, document) in documents {
        visit(&document.schema, |node, path| {
            let Some(location) = node.get("in").and_then(Value::as_str) else {
                return;
            };
            if !LOCATIONS.contains(&location) || !node.get("name").is_some_and(Value::is_string) {
                return;
            }
            let segments: Vec<&String> = path.iter().filter(|s| *s != "properties").collect();
            locations.insert(canonical_index(id, &segments), location.to_string());
        });
    }
    debug!(count = locations.len(), "Collected parameter locations.");
    locations
}

/// Type of a parameter's value: its schema, or `string` without one.
pub fn transform_parameter_object(parameter: &Value, options: &TransformOptions<'_>) -> TsType {
    match parameter.get("schema") {
        Some(schema) => schema_type(schema, options),
        None => TsType::string(),
    }
}

/// The `parameters` member of an operation or path item rendered at
/// `ctx.indent_lv`, grouped by location.
///
/// Inline parameters make up an object literal per group; referenced ones are
/// picked from the object holding them. Path parameters are always required.
pub(crate) fn parameters_member(
    parameters: &[Value],
    path: &str,
    ctx: &GlobalContext,
) -> Option<TsProp> {
    let inline_ctx = ctx.with_indent(ctx.indent_lv + 3);
    let mut groups = Vec::new();

    for location in LOCATIONS {
        let mut inline = Vec::new();
        let mut refs: IndexMap<String, Vec<String>> = IndexMap::new();
        for parameter in parameters {
            if let Some(reference) = ref_of(parameter) {
                let Some((root, key)) = split_reference(reference, ctx) else {
                    continue;
                };
                if reference_location(reference, ctx) == location {
                    refs.entry(root).or_default().push(key);
                }
                continue;
            }
            if parameter.get("in").and_then(Value::as_str) != Some(location) {
                continue;
            }
            let Some(name) = parameter.get("name").and_then(Value::as_str) else {
                continue;
            };
            let parameter_path = child_path(&child_path(path, "parameters"), name);
            let ty = transform_parameter_object(
                parameter,
                &TransformOptions {
                    path: &parameter_path,
                    ctx: &inline_ctx,
                },
            );
            inline.push(
                TsProp::new(PropKey::Name(name.to_string()), ty)
                    .optional(location != "path" && !is_true(parameter, "required"))
                    .doc(schema_object_comment(parameter)),
            );
        }

        if inline.is_empty() && refs.is_empty() {
            continue;
        }
        let mut parts = Vec::new();
        if !inline.is_empty() {
            parts.push(TsType::Object(inline));
        }
        for (root, keys) in refs {
            let root = TsType::raw(root);
            parts.push(if location == "path" {
                ts_pick(root, &keys)
            } else {
                ts_pick(ts_non_nullable(root), &keys)
            });
        }
        groups.push(
            TsProp::new(PropKey::Name(location.to_string()), TsType::Intersection(parts))
                .readonly(ctx.immutable_types),
        );
    }

    (!groups.is_empty())
        .then(|| TsProp::new(PropKey::Name("parameters".to_string()), TsType::Object(groups)))
}

/// Split a parameter reference into the index path of its container and its key.
fn split_reference(reference: &str, ctx: &GlobalContext) -> Option<(String, String)> {
    let mut parts = parse_ts_index(reference);
    let known = ctx.parameter_locations.contains_key(reference);
    if parts.len() < 2 || !(known || parts.iter().any(|p| p == "parameters")) {
        return None;
    }
    let key = parts.pop()?;
    Some((make_ts_index(&parts), key))
}

fn reference_location<'a>(reference: &'a str, ctx: &'a GlobalContext) -> &'a str {
    if let Some(location) = ctx.parameter_locations.get(reference) {
        return location;
    }
    parse_ts_index(reference)
        .iter()
        .find_map(|part| LOCATIONS.iter().find(|l| **l == part.as_str()).copied())
        .unwrap_or("query")
}
