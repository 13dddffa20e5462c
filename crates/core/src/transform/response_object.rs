use serde_json::Value;

use super::media_type_object::content_members;
use super::{
    TransformOptions, child_path, entries, is_true, ref_of, schema_object_comment,
    transform_header_object,
};
use crate::ts::{PropKey, TsProp, TsType};

/// Response object as `{ headers: {...}; content: {...} }`; `content` is
/// `never` when the response has no body.
pub fn transform_response_object(response: &Value, options: &TransformOptions<'_>) -> TsType {
    let ctx = options.ctx;
    let entry_ctx = ctx.with_indent(ctx.indent_lv + 2);
    let mut members = Vec::new();

    if let Some(headers) = response.get("headers").and_then(Value::as_object) {
        let headers_path = child_path(options.path, "headers");
        let headers = entries(headers, ctx)
            .into_iter()
            .map(|(name, header)| {
                let prop = match ref_of(header) {
                    Some(reference) => TsProp::new(PropKey::Name(name.clone()), TsType::raw(reference)),
                    None => {
                        let ty = transform_header_object(
                            header,
                            &TransformOptions {
                                path: &child_path(&headers_path, name),
                                ctx: &entry_ctx,
                            },
                        );
                        TsProp::new(PropKey::Name(name.clone()), ty).optional(!is_true(header, "required"))
                    }
                };
                prop.readonly(ctx.immutable_types)
                    .doc(schema_object_comment(header))
            })
            .collect();
        members.push(TsProp::new(PropKey::Name("headers".to_string()), TsType::Object(headers)));
    }

    let content = match response.get("content").and_then(Value::as_object) {
        Some(content) => TsType::Object(content_members(
            content,
            &child_path(options.path, "content"),
            &entry_ctx,
        )),
        None => TsType::never(),
    };
    members.push(TsProp::new(PropKey::Name("content".to_string()), content));

    TsType::Object(members)
}
