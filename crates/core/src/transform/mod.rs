//! Schema-to-TypeScript transformers.
//!
//! The schema object transformer is the recursive core; the other modules assemble the
//! containing API constructs (operations, path items, components) around it.
//! Every transformer builds a [`TsType`] meant to be emitted at
//! `ctx.indent_lv`; anything nested one member deeper is built with a context
//! one level deeper.

mod comment;
mod components_object;
mod header_object;
mod media_type_object;
mod operation_object;
mod parameter_object;
mod path_item_object;
mod paths_object;
mod request_body_object;
mod response_object;
mod schema_object;
mod webhooks_object;

use std::cmp::Ordering;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

pub use comment::schema_object_comment;
pub use components_object::transform_components_object;
pub use header_object::transform_header_object;
pub use media_type_object::transform_media_type_object;
pub use operation_object::transform_operation_object;
pub use parameter_object::{ParameterLocations, collect_parameter_locations, transform_parameter_object};
pub use path_item_object::transform_path_item_object;
pub use paths_object::transform_paths_object;
pub use request_body_object::transform_request_body_object;
pub use response_object::transform_response_object;
pub use schema_object::{schema_type, transform_schema_object};
pub use webhooks_object::transform_webhooks_object;

use crate::hint::ConstructKind;
use crate::load::DiscriminatorRegistry;
use crate::ts::{Emit, PropKey, TsProp, TsType};

/// Per-node override: return a full replacement type expression.
pub type TransformHook =
    Arc<dyn Fn(&Map<String, Value>, &TransformOptions<'_>) -> Option<String> + Send + Sync>;

/// Post-processing of a synthesized type expression.
pub type PostTransformHook = Arc<dyn Fn(&str, &TransformOptions<'_>) -> Option<String> + Send + Sync>;

/// Hoisted operation types keyed by `operationId`, emitted at indent level 1.
pub type Operations = IndexMap<String, String>;

/// Configuration threaded through every transformer call.
///
/// Descents never mutate a shared context; they derive a copy with a new
/// indentation level through [`GlobalContext::with_indent`].
#[derive(Clone, Default)]
pub struct GlobalContext {
    /// Open every object schema to extra properties.
    pub additional_properties: bool,
    /// Sort keyed maps in natural order.
    pub alphabetize: bool,
    /// Members with a `default` are required.
    pub default_non_nullable: bool,
    /// Discriminators by canonical index path.
    pub discriminators: Arc<DiscriminatorRegistry>,
    /// Skip entries marked `deprecated: true`.
    pub exclude_deprecated: bool,
    /// Mark members and arrays `readonly`.
    pub immutable_types: bool,
    /// Indentation level the current node is emitted at.
    pub indent_lv: usize,
    /// Parameter locations by canonical index path.
    pub parameter_locations: Arc<ParameterLocations>,
    /// Key templated paths by template literal types.
    pub path_params_as_types: bool,
    /// Encode `minItems`/`maxItems` as tuples.
    pub support_array_length: bool,
    /// Per-node override hook.
    pub transform: Option<TransformHook>,
    /// Hook applied to every synthesized schema type.
    pub post_transform: Option<PostTransformHook>,
}

impl fmt::Debug for GlobalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalContext")
            .field("additional_properties", &self.additional_properties)
            .field("alphabetize", &self.alphabetize)
            .field("default_non_nullable", &self.default_non_nullable)
            .field("discriminators", &self.discriminators.len())
            .field("exclude_deprecated", &self.exclude_deprecated)
            .field("immutable_types", &self.immutable_types)
            .field("indent_lv", &self.indent_lv)
            .field("path_params_as_types", &self.path_params_as_types)
            .field("support_array_length", &self.support_array_length)
            .field("transform", &self.transform.is_some())
            .field("post_transform", &self.post_transform.is_some())
            .finish_non_exhaustive()
    }
}

impl GlobalContext {
    /// Copy of this context at another indentation level.
    pub fn with_indent(&self, indent_lv: usize) -> Self {
        Self {
            indent_lv,
            ..self.clone()
        }
    }

    /// Copy of this context one level deeper.
    pub fn deeper(&self) -> Self {
        self.with_indent(self.indent_lv + 1)
    }
}

/// Location of the node being transformed plus the context to use.
#[derive(Debug, Clone, Copy)]
pub struct TransformOptions<'a> {
    /// JSON pointer of the node inside its document (`#/components/schemas/Pet`).
    pub path: &'a str,
    /// Context of the current node.
    pub ctx: &'a GlobalContext,
}

/// Rendered top-level sections of a document; empty when a section is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutput {
    /// The `paths` object.
    pub paths: String,
    /// The `webhooks` object.
    pub webhooks: String,
    /// The `components` object.
    pub components: String,
}

/// Transform the `paths`, `webhooks` and `components` sections of a document.
pub fn transform_schema(
    schema: &Value,
    ctx: &GlobalContext,
    operations: &mut Operations,
) -> TransformOutput {
    let section = |name: &str| schema.get(name).and_then(Value::as_object);
    let mut output = TransformOutput::default();
    if let Some(paths) = section("paths") {
        output.paths = transform_paths_object(paths, ctx, operations).emit_at(ctx.indent_lv);
    }
    if let Some(webhooks) = section("webhooks") {
        output.webhooks =
            transform_webhooks_object(webhooks, ctx, operations).emit_at(ctx.indent_lv);
    }
    if let Some(components) = section("components") {
        let options = TransformOptions {
            path: "#/components",
            ctx,
        };
        output.components =
            transform_components_object(components, &options, operations).emit_at(ctx.indent_lv);
    }
    output
}

/// Keywords marking an object as a schema.
const SCHEMA_KEYWORDS: [&str; 13] = [
    "type",
    "properties",
    "items",
    "allOf",
    "anyOf",
    "oneOf",
    "enum",
    "const",
    "$ref",
    "additionalProperties",
    "nullable",
    "format",
    "discriminator",
];

/// Transform `node` as a construct of the given kind.
pub fn transform_construct(
    kind: ConstructKind,
    node: &Value,
    options: &TransformOptions<'_>,
    operations: &mut Operations,
) -> TsType {
    let ctx = options.ctx;
    match (kind, node.as_object()) {
        (ConstructKind::OpenApi3, Some(document)) => {
            let member_ctx = ctx.deeper();
            let mut members = Vec::new();
            if let Some(paths) = document.get("paths").and_then(Value::as_object) {
                let ty = transform_paths_object(paths, &member_ctx, operations);
                members.push(TsProp::new(PropKey::Name("paths".to_string()), ty));
            }
            if let Some(webhooks) = document.get("webhooks").and_then(Value::as_object) {
                let ty = transform_webhooks_object(webhooks, &member_ctx, operations);
                members.push(TsProp::new(PropKey::Name("webhooks".to_string()), ty));
            }
            if let Some(components) = document.get("components").and_then(Value::as_object) {
                let path = child_path(options.path, "components");
                let ty = transform_components_object(
                    components,
                    &TransformOptions {
                        path: &path,
                        ctx: &member_ctx,
                    },
                    operations,
                );
                members.push(TsProp::new(PropKey::Name("components".to_string()), ty));
            }
            TsType::Object(members)
        }
        (ConstructKind::PathItem, Some(item)) => transform_path_item_object(item, options, operations),
        (ConstructKind::Operation, Some(operation)) => {
            transform_operation_object(operation, options, &[])
        }
        (ConstructKind::Parameter, _) => transform_parameter_object(node, options),
        (ConstructKind::RequestBody, _) => transform_request_body_object(node, options),
        (ConstructKind::Response, _) => transform_response_object(node, options),
        (ConstructKind::MediaType, _) => transform_media_type_object(node, options),
        (ConstructKind::Header, _) => transform_header_object(node, options),
        _ => schema_type(node, options),
    }
}

/// Whether an object has the shape of the given construct kind.
pub(crate) fn looks_like(kind: ConstructKind, node: &Map<String, Value>) -> bool {
    let has = |key: &str| node.contains_key(key);
    match kind {
        ConstructKind::OpenApi3 => ["openapi", "swagger", "paths", "webhooks", "components"]
            .iter()
            .any(|k| has(k)),
        ConstructKind::PathItem => path_item_object::METHODS.iter().any(|m| has(m)),
        ConstructKind::Operation => has("responses") || has("operationId") || has("requestBody"),
        ConstructKind::Parameter => has("in") && has("name"),
        ConstructKind::RequestBody => has("content"),
        ConstructKind::Response => has("description") || has("content") || has("headers"),
        ConstructKind::MediaType => has("schema"),
        ConstructKind::Header => has("schema") || has("content"),
        ConstructKind::Schema => SCHEMA_KEYWORDS.iter().any(|k| has(k)),
    }
}

/// Extend a JSON pointer by one segment, escaping `~` and `/`.
pub(crate) fn child_path(path: &str, segment: &str) -> String {
    let segment = segment.replace('~', "~0").replace('/', "~1");
    if path.ends_with('/') {
        format!("{path}{segment}")
    } else {
        format!("{path}/{segment}")
    }
}

/// Entries of an object in declaration order, or naturally sorted by key.
/// Deprecated entries are dropped when the context asks for it.
pub(crate) fn entries<'a>(
    map: &'a Map<String, Value>,
    ctx: &GlobalContext,
) -> Vec<(&'a String, &'a Value)> {
    let mut entries: Vec<_> = map
        .iter()
        .filter(|(_, value)| !(ctx.exclude_deprecated && is_true(value, "deprecated")))
        .collect();
    if ctx.alphabetize {
        entries.sort_by(|(a, _), (b, _)| natural_cmp(a, b));
    }
    entries
}

/// Whether `node[key]` is the boolean `true`.
pub(crate) fn is_true(node: &Value, key: &str) -> bool {
    node.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Whether `node` has a string `$ref`.
pub(crate) fn ref_of(node: &Value) -> Option<&str> {
    node.get("$ref").and_then(Value::as_str)
}

/// Key order where digit runs compare numerically (`2` before `10`).
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();
    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let x_digits = take_digits(&mut a_chars);
                let y_digits = take_digits(&mut b_chars);
                let x_trim = x_digits.trim_start_matches('0');
                let y_trim = y_digits.trim_start_matches('0');
                let ordering = x_trim
                    .len()
                    .cmp(&y_trim.len())
                    .then_with(|| x_trim.cmp(y_trim));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                let ordering = x
                    .to_lowercase()
                    .cmp(y.to_lowercase())
                    .then_with(|| x.cmp(&y));
                if ordering != Ordering::Equal {
                    return ordering;
                }
                a_chars.next();
                b_chars.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    digits
}
