use serde_json::{Map, Value};

use super::parameter_object::parameters_member;
use super::{Operations, TransformOptions, ref_of, schema_object_comment, transform_operation_object};
use crate::ts::utils::esc_str;
use crate::ts::{Emit, PropKey, TsProp, TsType};

/// HTTP methods of a path item, in output order.
pub(crate) const METHODS: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// Path item object as an object literal keyed by method.
///
/// Operations with an `operationId` are hoisted into `operations` and
/// referenced as `operations["<id>"]`; the rest are rendered in place.
pub fn transform_path_item_object(
    path_item: &Map<String, Value>,
    options: &TransformOptions<'_>,
    operations: &mut Operations,
) -> TsType {
    if let Some(reference) = path_item.get("$ref").and_then(Value::as_str) {
        return TsType::raw(reference);
    }

    let ctx = options.ctx;
    let member_ctx = ctx.deeper();
    let inherited: &[Value] = path_item
        .get("parameters")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut members = Vec::new();
    for method in METHODS {
        let Some(operation) = path_item.get(method) else {
            continue;
        };
        let ty = if let Some(reference) = ref_of(operation) {
            TsType::raw(reference)
        } else if let Some(object) = operation.as_object() {
            match object.get("operationId").and_then(Value::as_str) {
                Some(id) => {
                    let hoisted = ctx.with_indent(1);
                    let ty = transform_operation_object(
                        object,
                        &TransformOptions {
                            path: options.path,
                            ctx: &hoisted,
                        },
                        inherited,
                    );
                    operations.insert(id.to_string(), ty.emit_at(1));
                    TsType::raw(format!("operations[{}]", esc_str(id)))
                }
                None => transform_operation_object(
                    object,
                    &TransformOptions {
                        path: options.path,
                        ctx: &member_ctx,
                    },
                    inherited,
                ),
            }
        } else {
            continue;
        };
        members.push(TsProp::new(PropKey::Name(method.to_string()), ty).doc(schema_object_comment(operation)));
    }

    members.extend(parameters_member(inherited, options.path, ctx));
    TsType::Object(members)
}
