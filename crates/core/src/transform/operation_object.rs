use serde_json::{Map, Value};

use super::parameter_object::parameters_member;
use super::{
    TransformOptions, child_path, entries, is_true, ref_of, schema_object_comment,
    transform_request_body_object, transform_response_object,
};
use crate::ts::{PropKey, TsProp, TsType};

/// Operation object as an object literal of `parameters`, `requestBody` and
/// `responses`.
///
/// `inherited` are the parameters of the enclosing path item; those the
/// operation does not redeclare are merged in.
pub fn transform_operation_object(
    operation: &Map<String, Value>,
    options: &TransformOptions<'_>,
    inherited: &[Value],
) -> TsType {
    let ctx = options.ctx;
    let member_ctx = ctx.deeper();
    let mut members = Vec::new();

    let own: &[Value] = operation
        .get("parameters")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let mut parameters: Vec<Value> = inherited
        .iter()
        .filter(|param| !own.iter().any(|o| overrides(o, param)))
        .cloned()
        .collect();
    parameters.extend(own.iter().cloned());
    members.extend(parameters_member(&parameters, options.path, ctx));

    if let Some(body) = operation.get("requestBody") {
        let member = match ref_of(body) {
            Some(reference) => TsProp::new(PropKey::Name("requestBody".to_string()), TsType::raw(reference)),
            None => {
                let body_path = child_path(options.path, "requestBody");
                let ty = transform_request_body_object(
                    body,
                    &TransformOptions {
                        path: &body_path,
                        ctx: &member_ctx,
                    },
                );
                TsProp::new(PropKey::Name("requestBody".to_string()), ty)
                    .optional(!is_true(body, "required"))
            }
        };
        members.push(
            member
                .readonly(ctx.immutable_types)
                .doc(schema_object_comment(body)),
        );
    }

    if let Some(responses) = operation.get("responses").and_then(Value::as_object) {
        let response_ctx = ctx.with_indent(ctx.indent_lv + 2);
        let responses_path = child_path(options.path, "responses");
        let codes = entries(responses, ctx)
            .into_iter()
            .map(|(code, response)| {
                let ty = match ref_of(response) {
                    Some(reference) => TsType::raw(reference),
                    None => transform_response_object(
                        response,
                        &TransformOptions {
                            path: &child_path(&responses_path, code),
                            ctx: &response_ctx,
                        },
                    ),
                };
                TsProp::new(PropKey::Name(code.clone()), ty).doc(schema_object_comment(response))
            })
            .collect();
        members.push(TsProp::new(
            PropKey::Name("responses".to_string()),
            TsType::Object(codes),
        ));
    }

    TsType::Object(members)
}

/// Whether `own` redeclares the inherited parameter `inherited`.
fn overrides(own: &Value, inherited: &Value) -> bool {
    if let (Some(a), Some(b)) = (ref_of(own), ref_of(inherited)) {
        return a == b;
    }
    let key = |p: &Value| (p.get("name").cloned(), p.get("in").cloned());
    let (name, location) = key(own);
    name.is_some() && location.is_some() && (name, location) == key(inherited)
}
