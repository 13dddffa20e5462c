use serde_json::{Map, Value};

use super::{
    Operations, TransformOptions, child_path, entries, is_true, ref_of, schema_object_comment,
    schema_type, transform_header_object, transform_parameter_object, transform_path_item_object,
    transform_request_body_object, transform_response_object,
};
use crate::ts::{PropKey, TsProp, TsType};

/// Component collections in output order; absent ones render as `never`.
const COLLECTIONS: [&str; 6] = [
    "schemas",
    "responses",
    "parameters",
    "requestBodies",
    "headers",
    "pathItems",
];

/// Components object with one member per collection, entries emitted two
/// levels below `ctx.indent_lv`. `options.path` locates the components object
/// itself (`#/components`, or `common.yaml#/components` in another document).
pub fn transform_components_object(
    components: &Map<String, Value>,
    options: &TransformOptions<'_>,
    operations: &mut Operations,
) -> TsType {
    let ctx = options.ctx;
    let entry_ctx = ctx.with_indent(ctx.indent_lv + 2);
    let members = COLLECTIONS
        .iter()
        .map(|kind| {
            let ty = match components.get(*kind).and_then(Value::as_object) {
                Some(collection) => TsType::Object(
                    entries(collection, ctx)
                        .into_iter()
                        .map(|(name, node)| {
                            let path = child_path(&child_path(options.path, kind), name);
                            let options = TransformOptions {
                                path: &path,
                                ctx: &entry_ctx,
                            };
                            component_member(kind, name, node, &options, operations)
                        })
                        .collect(),
                ),
                None => TsType::never(),
            };
            TsProp::new(PropKey::Name((*kind).to_string()), ty)
        })
        .collect();
    TsType::Object(members)
}

fn component_member(
    kind: &str,
    name: &str,
    node: &Value,
    options: &TransformOptions<'_>,
    operations: &mut Operations,
) -> TsProp {
    let immutable = options.ctx.immutable_types;
    let key = PropKey::Name(name.to_string());
    let doc = schema_object_comment(node);

    if kind == "schemas" {
        return TsProp::new(key, schema_type(node, options))
            .readonly(immutable || is_true(node, "readOnly"))
            .doc(doc);
    }
    if let Some(reference) = ref_of(node) {
        return TsProp::new(key, TsType::raw(reference))
            .readonly(immutable)
            .doc(doc);
    }

    let prop = match kind {
        "responses" => TsProp::new(key, transform_response_object(node, options)),
        "parameters" => TsProp::new(key, transform_parameter_object(node, options)).optional(
            node.get("in").and_then(Value::as_str) != Some("path") && !is_true(node, "required"),
        ),
        "requestBodies" => TsProp::new(key, transform_request_body_object(node, options))
            .optional(!is_true(node, "required")),
        "headers" => TsProp::new(key, transform_header_object(node, options)),
        _ => match node.as_object() {
            Some(item) => TsProp::new(key, transform_path_item_object(item, options, operations)),
            None => TsProp::new(key, TsType::unknown()),
        },
    };
    prop.readonly(immutable).doc(doc)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::transform::GlobalContext;
    use crate::ts::Emit;

    fn render(components: Value, ctx: &GlobalContext) -> String {
        let mut operations = Operations::new();
        transform_components_object(
            components.as_object().unwrap(),
            &TransformOptions {
                path: "#/components",
                ctx,
            },
            &mut operations,
        )
            .emit_at(ctx.indent_lv)
    }

    #[test]
    fn test_absent_collections_are_never() {
        assert_eq!(
            render(json!({}), &GlobalContext::default()),
            [
                "{",
                "  schemas: never;",
                "  responses: never;",
                "  parameters: never;",
                "  requestBodies: never;",
                "  headers: never;",
                "  pathItems: never;",
                "}",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_components() {
        let out = render(
            json!({
                "schemas": {
                    "Pet": {
                        "description": "A pet",
                        "type": "object",
                        "required": ["id"],
                        "properties": { "id": { "type": "integer" } }
                    },
                    "Frozen": { "type": "string", "readOnly": true }
                },
                "parameters": {
                    "limit": { "name": "limit", "in": "query", "schema": { "type": "integer" } },
                    "petId": { "name": "petId", "in": "path", "schema": { "type": "string" } }
                },
                "requestBodies": {
                    "Pet": { "$ref": "components[\"schemas\"][\"Pet\"]" }
                }
            }),
            &GlobalContext::default(),
        );
        let expected = [
            "{",
            "  schemas: {",
            "    /** @description A pet */",
            "    Pet: {",
            "      id: number;",
            "    };",
            "    readonly Frozen: string;",
            "  };",
            "  responses: never;",
            "  parameters: {",
            "    limit?: number;",
            "    petId: string;",
            "  };",
            "  requestBodies: {",
            "    Pet: components[\"schemas\"][\"Pet\"];",
            "  };",
            "  headers: never;",
            "  pathItems: never;",
            "}",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }
}
