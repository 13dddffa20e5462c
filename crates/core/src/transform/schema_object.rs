//! Schema object transformer.
//!
//! Dispatch order, first match wins:
//!
//! 1. non-objects are emitted verbatim, `$ref` nodes as their index path
//! 2. arrays become tuples
//! 3. the user transform hook
//! 4. `const`, as an enum of one
//! 5. `enum`, as a union of literals
//! 6. `oneOf` without discriminated members, as a union (exclusive when any
//!    member is an object literal)
//! 7. `type`
//! 8. the structural fallback: properties, index signature, discriminator
//!    tag, compositions and nullability
//!
//! Shapes that match nothing come out as `Record<string, never>`.

use serde_json::{Map, Value};

use super::{
    GlobalContext, TransformOptions, entries, is_true, ref_of, schema_object_comment,
};
use crate::load::Discriminator;
use crate::ROOT_ID;
use crate::reference::{EXTERNAL_ROOT, canonical_index, parse_ref, parse_ts_index};
use crate::ts::utils::{json_literal, make_empty_record, make_unknown_record, ts_omit};
use crate::ts::{Emit, PropKey, TsLiteral, TsPrimitive, TsProp, TsType};

/// Upper bound on the tuple code an array length constraint may expand to.
const ARRAY_LENGTH_BUDGET: u64 = 30;

/// Transform a schema node into a type expression emitted at `ctx.indent_lv`.
pub fn transform_schema_object(schema: &Value, options: &TransformOptions<'_>) -> String {
    schema_type(schema, options).emit_at(options.ctx.indent_lv)
}

/// Transform a schema node, applying the post-transform hook.
pub fn schema_type(schema: &Value, options: &TransformOptions<'_>) -> TsType {
    let ty = default_schema_type(schema, options);
    if let Some(hook) = &options.ctx.post_transform {
        if let Some(replaced) = hook(&ty.emit_at(options.ctx.indent_lv), options) {
            return TsType::Ref(replaced);
        }
    }
    ty
}

fn default_schema_type(schema: &Value, options: &TransformOptions<'_>) -> TsType {
    let ctx = options.ctx;
    let node = match schema {
        Value::Object(node) => node,
        Value::Array(items) => {
            let tuple = TsType::Tuple {
                items: items.iter().map(|item| schema_type(item, options)).collect(),
                rest: None,
            };
            return tuple.readonly_if(ctx.immutable_types);
        }
        Value::String(text) => return TsType::raw(text.clone()),
        other => return TsType::raw(other.to_string()),
    };

    if let Some(reference) = ref_of(schema) {
        return TsType::raw(reference);
    }

    if let Some(hook) = &ctx.transform {
        if let Some(replaced) = hook(node, options) {
            return TsType::Ref(replaced);
        }
    }

    if let Some(value) = node.get("const") {
        return enum_type(std::slice::from_ref(value), node);
    }

    if let Some(Value::Array(items)) = node.get("enum") {
        return enum_type(items, node);
    }

    if let Some(Value::Array(one_of)) = node.get("oneOf") {
        if !one_of.iter().any(|item| discriminator_of(item, ctx).is_some()) {
            let members: Vec<_> = one_of.iter().map(|item| schema_type(item, options)).collect();
            return if members.iter().any(TsType::contains_object_literal) {
                TsType::OneOf(members)
            } else {
                TsType::Union(members)
            };
        }
    }

    match node.get("type") {
        Some(Value::Array(types)) => {
            let members = types
                .iter()
                .map(|ty| {
                    let mut variant = node.clone();
                    variant.insert("type".to_string(), ty.clone());
                    schema_type(&Value::Object(variant), options)
                })
                .collect();
            return TsType::OneOf(members);
        }
        Some(Value::String(ty)) => {
            let nullable = is_true(schema, "nullable");
            let primitive = |p: TsPrimitive| {
                let ty = TsType::Primitive(p);
                if nullable { ty.or_null() } else { ty }
            };
            match ty.as_str() {
                "null" => return TsType::null(),
                "string" => return primitive(TsPrimitive::String),
                "boolean" => return primitive(TsPrimitive::Boolean),
                "number" | "integer" => return primitive(TsPrimitive::Number),
                "array" => return array_type(node, options),
                _ => {}
            }
        }
        _ => {}
    }

    structural_type(node, options)
}

/// Union of literal members; strings are quoted for string-typed or untyped
/// enums, `null` is appended for nullable ones.
fn enum_type(items: &[Value], node: &Map<String, Value>) -> TsType {
    let quote = match node.get("type") {
        None => true,
        Some(Value::String(ty)) => ty == "string",
        Some(Value::Array(types)) => types.iter().any(|t| t == "string"),
        Some(_) => false,
    };
    let mut members: Vec<TsType> = items.iter().map(|item| enum_member(item, quote)).collect();
    let null_typed = matches!(node.get("type"), Some(Value::Array(types)) if types.iter().any(|t| t == "null"));
    if node.get("nullable").and_then(Value::as_bool) == Some(true) || null_typed {
        members.push(TsType::null());
    }
    TsType::Union(members)
}

fn enum_member(item: &Value, quote: bool) -> TsType {
    match item {
        Value::String(text) if !quote => TsType::raw(text.clone()),
        Value::Array(values) => TsType::Tuple {
            items: values.iter().map(|v| enum_member(v, true)).collect(),
            rest: None,
        },
        Value::Object(_) => TsType::raw(item.to_string()),
        scalar => json_literal(scalar).map_or_else(TsType::unknown, TsType::Literal),
    }
}

fn array_type(node: &Map<String, Value>, options: &TransformOptions<'_>) -> TsType {
    let ctx = options.ctx;
    let item_type = node
        .get("items")
        .map_or_else(TsType::unknown, |items| schema_type(items, options));
    let readonly = ctx.immutable_types || node.get("readOnly").and_then(Value::as_bool) == Some(true);
    let nullable = node.get("nullable").and_then(Value::as_bool) == Some(true);

    let min_items = node.get("minItems").and_then(Value::as_u64).unwrap_or(0);
    let max_items = node
        .get("maxItems")
        .and_then(Value::as_u64)
        .filter(|max| *max >= min_items);
    let estimate = match max_items {
        None => min_items,
        Some(max) => {
            max.saturating_mul(max.saturating_add(1))
                .saturating_sub(min_items.saturating_mul(min_items.saturating_sub(1)))
                / 2
        }
    };

    if ctx.support_array_length
        && !nullable
        && (min_items != 0 || max_items.is_some())
        && estimate < ARRAY_LENGTH_BUDGET
    {
        let repeat = |n: u64| vec![item_type.clone(); usize::try_from(n).unwrap_or_default()];
        return match max_items {
            None => TsType::Tuple {
                items: repeat(min_items),
                rest: Some(Box::new(item_type.clone())),
            }
            .readonly_if(readonly),
            Some(max) => TsType::Union(
                (min_items..=max)
                    .map(|n| {
                        TsType::Tuple {
                            items: repeat(n),
                            rest: None,
                        }
                        .readonly_if(readonly)
                    })
                    .collect(),
            ),
        };
    }

    let ty = TsType::Array(Box::new(item_type)).readonly_if(readonly);
    if nullable { ty.or_null() } else { ty }
}

fn structural_type(node: &Map<String, Value>, options: &TransformOptions<'_>) -> TsType {
    let ctx = options.ctx;
    let schema_readonly = node.get("readOnly").and_then(Value::as_bool) == Some(true);
    let properties = node
        .get("properties")
        .and_then(Value::as_object)
        .filter(|p| !p.is_empty());
    let additional = node.get("additionalProperties");
    let additional_allowed = additional.is_some_and(is_truthy);

    let mut members = Vec::new();
    if properties.is_some() || additional_allowed {
        let member_ctx = ctx.deeper();
        let member_options = TransformOptions {
            path: options.path,
            ctx: &member_ctx,
        };
        let required = node.get("required").and_then(Value::as_array);
        if let Some(properties) = properties {
            for (name, property) in entries(properties, ctx) {
                let mut optional = !required.is_some_and(|r| r.iter().any(|k| k == name.as_str()));
                if optional && ctx.default_non_nullable && property.get("default").is_some() {
                    optional = false;
                }
                members.push(
                    TsProp::new(
                        PropKey::Name(name.clone()),
                        schema_type(property, &member_options),
                    )
                    .optional(optional)
                    .readonly(ctx.immutable_types || schema_readonly)
                    .doc(schema_object_comment(property)),
                );
            }
        }
        let explicitly_closed = additional == Some(&Value::Bool(false));
        if additional_allowed || (ctx.additional_properties && !explicitly_closed) {
            let value_type = match additional {
                Some(schema) if schema.as_object().is_some_and(|f| !f.is_empty()) => {
                    schema_type(schema, &member_options)
                }
                _ => TsType::unknown(),
            };
            members.push(TsProp::new(
                PropKey::Raw("[key: string]".to_string()),
                TsType::Union(vec![value_type, TsType::Primitive(TsPrimitive::Undefined)]),
            ));
        }
    }

    for key in ["oneOf", "allOf", "anyOf"] {
        let Some(Value::Array(items)) = node.get(key) else {
            continue;
        };
        let discriminated = items.iter().find_map(|item| {
            let reference = ref_of(item)?;
            Some((reference, discriminator_of(item, ctx)?))
        });
        if let Some((reference, discriminator)) = discriminated {
            let tag = discriminator_tag(discriminator, &index_document(reference), options.path);
            members.insert(
                0,
                TsProp::new(
                    PropKey::Name(discriminator.property_name.clone()),
                    TsType::Literal(TsLiteral::String(tag)),
                ),
            );
            break;
        }
    }

    let mut final_type = (!members.is_empty()).then(|| TsType::Object(members));
    if let Some(Value::Array(one_of)) = node.get("oneOf") {
        let one_of = TsType::OneOf(compositions(one_of, options));
        final_type = Some(intersect(final_type, one_of));
    } else {
        if let Some(Value::Array(all_of)) = node.get("allOf") {
            let mut parts: Vec<_> = final_type.into_iter().collect();
            parts.extend(compositions(all_of, options));
            final_type = Some(TsType::Intersection(parts));
        }
        if let Some(Value::Array(any_of)) = node.get("anyOf") {
            let any_of = TsType::Union(compositions(any_of, options));
            final_type = Some(intersect(final_type, any_of));
        }
    }

    if node.get("nullable").and_then(Value::as_bool) == Some(true) {
        return TsType::Union(vec![
            final_type.unwrap_or_else(make_unknown_record),
            TsType::null(),
        ]);
    }
    final_type.unwrap_or_else(make_empty_record)
}

fn intersect(base: Option<TsType>, ty: TsType) -> TsType {
    match base {
        Some(base) => TsType::Intersection(vec![base, ty]),
        None => ty,
    }
}

/// Transform composition members; discriminated members lose their tag
/// property, which is hoisted into the composing schema.
fn compositions(items: &[Value], options: &TransformOptions<'_>) -> Vec<TsType> {
    items
        .iter()
        .map(|item| {
            let ty = schema_type(item, options);
            match discriminator_of(item, options.ctx) {
                Some(discriminator) => ts_omit(ty, &[discriminator.property_name.clone()]),
                None => ty,
            }
        })
        .collect()
}

fn discriminator_of<'a>(item: &Value, ctx: &'a GlobalContext) -> Option<&'a Discriminator> {
    ref_of(item).and_then(|reference| ctx.discriminators.get(reference))
}

/// Tag value of the schema at `path`: its own name, unless the mapping
/// assigns a tag to that name or location.
///
/// Mapping targets are pointers relative to `declared_in`, the document
/// holding the discriminator, and match only the schema in the document they
/// resolve to.
fn discriminator_tag(discriminator: &Discriminator, declared_in: &str, path: &str) -> String {
    let own = parse_ref(path);
    let name = own.path.last().cloned().unwrap_or_default();
    let own_document = if own.is_local() { ROOT_ID } else { own.document.as_str() };
    let own_index = canonical_index(own_document, &own.path);
    if let Some(mapping) = &discriminator.mapping {
        let matched = mapping.iter().find(|(_, target)| {
            if !target.contains('#') && !target.contains('/') {
                return **target == name;
            }
            let target = parse_ref(target);
            let document = if target.is_local() {
                declared_in.to_string()
            } else {
                relative_document(declared_in, &target.document)
            };
            !own.path.is_empty() && canonical_index(&document, &target.path) == own_index
        });
        if let Some((tag, _)) = matched {
            return tag.clone();
        }
    }
    name
}

/// Document identifier a canonical index path points into.
fn index_document(index: &str) -> String {
    let parts = parse_ts_index(index);
    match parts.as_slice() {
        [root, document, ..] if root == EXTERNAL_ROOT => document.clone(),
        _ => ROOT_ID.to_string(),
    }
}

/// Identifier of `target`, a document reference found in document `base`.
fn relative_document(base: &str, target: &str) -> String {
    if target.contains("://") {
        return target.to_string();
    }
    let mut segments: Vec<&str> = match base.rsplit_once('/') {
        Some((dir, _)) if base != ROOT_ID => dir.split('/').collect(),
        _ => Vec::new(),
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." if segments.last().is_some_and(|s| *s != "..") => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    if segments.is_empty() {
        ROOT_ID.to_string()
    } else {
        segments.join("/")
    }
}

/// JavaScript truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::Arc;

    use indexmap::IndexMap;
    use serde_json::json;

    use super::*;
    use crate::load::DiscriminatorRegistry;

    const PATH: &str = "#/components/schemas/Test";

    fn render(schema: Value, ctx: &GlobalContext) -> String {
        transform_schema_object(&schema, &TransformOptions { path: PATH, ctx })
    }

    fn render_default(schema: Value) -> String {
        render(schema, &GlobalContext::default())
    }

    fn with_array_length() -> GlobalContext {
        GlobalContext {
            support_array_length: true,
            ..GlobalContext::default()
        }
    }

    #[test]
    fn test_primitives() {
        assert_eq!(render_default(json!({ "type": "string" })), "string");
        assert_eq!(
            render_default(json!({ "type": "string", "nullable": true })),
            "string | null"
        );
        assert_eq!(render_default(json!({ "type": "integer" })), "number");
        assert_eq!(
            render_default(json!({ "type": "number", "nullable": true })),
            "number | null"
        );
        assert_eq!(render_default(json!({ "type": "boolean" })), "boolean");
        assert_eq!(render_default(json!({ "type": "null" })), "null");
    }

    #[test]
    fn test_verbatim_and_refs() {
        assert_eq!(render_default(json!("Date")), "Date");
        assert_eq!(render_default(json!(true)), "true");
        assert_eq!(
            render_default(json!({ "$ref": "components[\"schemas\"][\"Pet\"]" })),
            r#"components["schemas"]["Pet"]"#
        );
        assert_eq!(render_default(json!(["string", "number"])), "[string, number]");
    }

    #[test]
    fn test_enums() {
        assert_eq!(
            render_default(json!({ "type": "string", "enum": ["a", "b"] })),
            r#""a" | "b""#
        );
        assert_eq!(
            render_default(json!({ "enum": ["a", 1, null] })),
            r#""a" | 1 | null"#
        );
        assert_eq!(
            render_default(json!({ "type": "integer", "enum": [1, 2], "nullable": true })),
            "1 | 2 | null"
        );
        assert_eq!(
            render_default(json!({ "type": ["string", "null"], "enum": ["x"] })),
            r#""x" | null"#
        );
        assert_eq!(render_default(json!({ "const": "fixed" })), r#""fixed""#);
        assert_eq!(render_default(json!({ "const": 0, "type": "number" })), "0");
        assert_eq!(render_default(json!({ "const": false })), "false");
    }

    #[test]
    fn test_type_arrays_are_exclusive() {
        assert_eq!(
            render_default(json!({ "type": ["string", "number"] })),
            "OneOf<[string, number]>"
        );
    }

    #[test]
    fn test_one_of() {
        assert_eq!(
            render_default(json!({ "oneOf": [{ "type": "string" }, { "type": "number" }] })),
            "string | number"
        );
        let out = render_default(json!({ "oneOf": [
            { "type": "object", "properties": { "a": { "type": "string" } } },
            { "type": "string" }
        ]}));
        assert_eq!(out, "OneOf<[{\n  a?: string;\n}, string]>");
    }

    #[test]
    fn test_arrays() {
        assert_eq!(
            render_default(json!({ "type": "array", "items": { "type": "string" } })),
            "string[]"
        );
        assert_eq!(render_default(json!({ "type": "array" })), "unknown[]");
        assert_eq!(
            render_default(json!({ "type": "array", "items": { "type": "string" }, "nullable": true })),
            "string[] | null"
        );
        let immutable = GlobalContext {
            immutable_types: true,
            ..GlobalContext::default()
        };
        assert_eq!(
            render(json!({ "type": "array", "items": { "type": "number" } }), &immutable),
            "readonly number[]"
        );
    }

    #[test]
    fn test_array_length_fixed_tuple() {
        let schema = json!({ "type": "array", "items": { "type": "boolean" }, "minItems": 2, "maxItems": 2 });
        assert_eq!(render(schema.clone(), &with_array_length()), "[boolean, boolean]");
        assert_eq!(render_default(schema), "boolean[]");
    }

    #[test]
    fn test_array_length_min_with_rest() {
        let schema = json!({ "type": "array", "items": { "type": "boolean" }, "minItems": 3 });
        assert_eq!(
            render(schema, &with_array_length()),
            "[boolean, boolean, boolean, ...boolean[]]"
        );
    }

    #[test]
    fn test_array_length_range_and_budget() {
        let schema = json!({ "type": "array", "items": { "type": "string" }, "minItems": 0, "maxItems": 2 });
        assert_eq!(
            render(schema, &with_array_length()),
            "[] | [string] | [string, string]"
        );
        let schema = json!({ "type": "array", "items": { "type": "string" }, "maxItems": 8 });
        assert_eq!(render(schema, &with_array_length()), "string[]");
        let schema = json!({ "type": "array", "items": { "type": "string" }, "minItems": 1, "nullable": true });
        assert_eq!(render(schema, &with_array_length()), "string[] | null");
    }

    #[test]
    fn test_required_and_optional_members() {
        let out = render_default(json!({
            "type": "object",
            "required": ["a"],
            "properties": { "a": { "type": "string" }, "b": { "type": "number" } }
        }));
        assert_eq!(out, "{\n  a: string;\n  b?: number;\n}");
    }

    #[test]
    fn test_member_options() {
        let ctx = GlobalContext {
            alphabetize: true,
            default_non_nullable: true,
            immutable_types: true,
            ..GlobalContext::default()
        };
        let out = render(
            json!({
                "properties": {
                    "z": { "type": "string", "default": "x" },
                    "a": { "type": "string", "description": "First" }
                }
            }),
            &ctx,
        );
        assert_eq!(
            out,
            "{\n  /** @description First */\n  readonly a?: string;\n  /** @default x */\n  readonly z: string;\n}"
        );
    }

    #[test]
    fn test_nested_indentation() {
        let ctx = GlobalContext::default().with_indent(1);
        let out = render(
            json!({ "properties": { "inner": { "properties": { "x": { "type": "number" } } } } }),
            &ctx,
        );
        assert_eq!(out, "{\n    inner?: {\n      x?: number;\n    };\n  }");
    }

    #[test]
    fn test_additional_properties() {
        assert_eq!(
            render_default(json!({ "type": "object", "additionalProperties": true })),
            "{\n  [key: string]: unknown;\n}"
        );
        assert_eq!(
            render_default(json!({ "additionalProperties": { "type": "string" } })),
            "{\n  [key: string]: string | undefined;\n}"
        );
        let ctx = GlobalContext {
            additional_properties: true,
            ..GlobalContext::default()
        };
        assert_eq!(
            render(json!({ "properties": { "a": { "type": "string" } } }), &ctx),
            "{\n  a?: string;\n  [key: string]: unknown;\n}"
        );
        assert_eq!(
            render(
                json!({ "properties": { "a": { "type": "string" } }, "additionalProperties": false }),
                &ctx
            ),
            "{\n  a?: string;\n}"
        );
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(render_default(json!({})), "Record<string, never>");
        assert_eq!(render_default(json!({ "type": "object" })), "Record<string, never>");
        assert_eq!(
            render_default(json!({ "type": "object", "nullable": true })),
            "Record<string, unknown> | null"
        );
    }

    #[test]
    fn test_compositions() {
        assert_eq!(
            render_default(json!({ "allOf": [{ "$ref": "A" }, { "$ref": "B" }] })),
            "A & B"
        );
        assert_eq!(
            render_default(json!({ "anyOf": [{ "$ref": "A" }, { "$ref": "B" }] })),
            "A | B"
        );
        assert_eq!(
            render_default(json!({
                "properties": { "id": { "type": "string" } },
                "anyOf": [{ "$ref": "A" }, { "$ref": "B" }]
            })),
            "{\n  id?: string;\n} & (A | B)"
        );
        assert_eq!(
            render_default(json!({ "allOf": [{ "$ref": "A" }], "nullable": true })),
            "A | null"
        );
    }

    fn pet_registry() -> Arc<DiscriminatorRegistry> {
        let mut mapping = IndexMap::new();
        mapping.insert("cat".to_string(), "#/components/schemas/Cat".to_string());
        let mut registry = DiscriminatorRegistry::new();
        registry.insert(
            r#"components["schemas"]["Pet"]"#.to_string(),
            Discriminator {
                property_name: "petType".to_string(),
                mapping: Some(mapping),
            },
        );
        Arc::new(registry)
    }

    #[test]
    fn test_discriminator_mapping_tag() {
        let ctx = GlobalContext {
            discriminators: pet_registry(),
            ..GlobalContext::default()
        };
        let cat = json!({ "allOf": [
            { "$ref": "components[\"schemas\"][\"Pet\"]" },
            { "type": "object", "properties": { "name": { "type": "string" } } }
        ]});
        let out = transform_schema_object(
            &cat,
            &TransformOptions {
                path: "#/components/schemas/Cat",
                ctx: &ctx,
            },
        );
        assert_eq!(
            out,
            "{\n  petType: \"cat\";\n} & Omit<components[\"schemas\"][\"Pet\"], \"petType\"> & {\n  name?: string;\n}"
        );

        let dog = json!({ "allOf": [{ "$ref": "components[\"schemas\"][\"Pet\"]" }] });
        let out = transform_schema_object(
            &dog,
            &TransformOptions {
                path: "#/components/schemas/Dog",
                ctx: &ctx,
            },
        );
        assert!(out.starts_with("{\n  petType: \"Dog\";\n}"), "{out}");
    }

    #[test]
    fn test_mapping_targets_match_their_document() {
        let mut registry = DiscriminatorRegistry::new();
        for (index, target) in [
            (r#"components["schemas"]["Pet"]"#, "other.yaml#/components/schemas/Cat"),
            (r#"external["other.yaml"]["components"]["schemas"]["Animal"]"#, "#/components/schemas/Dog"),
        ] {
            registry.insert(
                index.to_string(),
                Discriminator {
                    property_name: "kind".to_string(),
                    mapping: Some(IndexMap::from([("tagged".to_string(), target.to_string())])),
                },
            );
        }
        let ctx = GlobalContext {
            discriminators: Arc::new(registry),
            ..GlobalContext::default()
        };
        let tag = |parent: &str, path: &str| {
            let schema = json!({ "allOf": [{ "$ref": parent }] });
            let out = transform_schema_object(&schema, &TransformOptions { path, ctx: &ctx });
            out.lines().nth(1).unwrap().trim().to_string()
        };

        let pet = r#"components["schemas"]["Pet"]"#;
        assert_eq!(tag(pet, "other.yaml#/components/schemas/Cat"), "kind: \"tagged\";");
        assert_eq!(tag(pet, "#/components/schemas/Cat"), "kind: \"Cat\";");

        let animal = r#"external["other.yaml"]["components"]["schemas"]["Animal"]"#;
        assert_eq!(tag(animal, "other.yaml#/components/schemas/Dog"), "kind: \"tagged\";");
        assert_eq!(tag(animal, "#/components/schemas/Dog"), "kind: \"Dog\";");
    }

    #[test]
    fn test_document_identifiers() {
        assert_eq!(index_document(r#"components["schemas"]["Pet"]"#), ".");
        assert_eq!(index_document(r#"external["a/b.yaml"]["Pet"]"#), "a/b.yaml");
        assert_eq!(relative_document(".", "./common.yaml"), "common.yaml");
        assert_eq!(relative_document("schemas/pet.yaml", "../common.yaml"), "common.yaml");
        assert_eq!(relative_document("schemas/pet.yaml", "./cat.yaml"), "schemas/cat.yaml");
        assert_eq!(relative_document(".", "../shared/x.yaml"), "../shared/x.yaml");
        assert_eq!(
            relative_document("a.yaml", "https://example.com/x.yaml"),
            "https://example.com/x.yaml"
        );
    }

    #[test]
    fn test_discriminated_one_of() {
        let ctx = GlobalContext {
            discriminators: pet_registry(),
            ..GlobalContext::default()
        };
        let schema = json!({ "oneOf": [
            { "$ref": "components[\"schemas\"][\"Pet\"]" },
            { "type": "object", "properties": { "lives": { "type": "integer" } } }
        ]});
        let out = transform_schema_object(
            &schema,
            &TransformOptions {
                path: "#/components/schemas/Cat",
                ctx: &ctx,
            },
        );
        assert_eq!(
            out,
            "{\n  petType: \"cat\";\n} & OneOf<[Omit<components[\"schemas\"][\"Pet\"], \"petType\">, {\n  lives?: number;\n}]>"
        );
    }

    fn date_hook(node: &Map<String, Value>, _: &TransformOptions<'_>) -> Option<String> {
        (node.get("format").and_then(Value::as_str) == Some("date-time")).then(|| "Date".to_string())
    }

    fn bigint_hook(ty: &str, _: &TransformOptions<'_>) -> Option<String> {
        (ty == "number").then(|| "bigint".to_string())
    }

    #[test]
    fn test_hooks() {
        let ctx = GlobalContext {
            transform: Some(Arc::new(date_hook)),
            post_transform: Some(Arc::new(bigint_hook)),
            ..GlobalContext::default()
        };
        assert_eq!(
            render(json!({ "type": "string", "format": "date-time" }), &ctx),
            "Date"
        );
        assert_eq!(render(json!({ "type": "integer" }), &ctx), "bigint");
        assert_eq!(
            render(json!({ "type": "array", "items": { "type": "number" } }), &ctx),
            "bigint[]"
        );
        assert_eq!(render(json!({ "type": "string" }), &ctx), "string");
    }
}
