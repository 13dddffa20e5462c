use serde_json::Value;

use super::TransformOptions;
use super::child_path;
use super::media_type_object::content_members;
use crate::ts::{PropKey, TsPrimitive, TsProp, TsType};

/// Request body object as `{ content: { "<media type>": T } }`.
///
/// A body declaring no media types accepts `"*/*": never`.
pub fn transform_request_body_object(body: &Value, options: &TransformOptions<'_>) -> TsType {
    let ctx = options.ctx;
    let content_ctx = ctx.with_indent(ctx.indent_lv + 2);
    let path = child_path(options.path, "content");
    let mut content = body
        .get("content")
        .and_then(Value::as_object)
        .map(|content| content_members(content, &path, &content_ctx))
        .unwrap_or_default();
    if content.is_empty() {
        content.push(TsProp::new(
            PropKey::Quoted("*/*".to_string()),
            TsType::Primitive(TsPrimitive::Never),
        ));
    }
    TsType::Object(vec![
        TsProp::new(PropKey::Name("content".to_string()), TsType::Object(content))
            .readonly(ctx.immutable_types),
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::transform::GlobalContext;
    use crate::ts::Emit;

    #[test]
    fn test_request_body() {
        let ctx = GlobalContext {
            immutable_types: true,
            ..GlobalContext::default()
        };
        let body = json!({ "content": { "application/json": { "schema": { "type": "boolean" } } } });
        let out = transform_request_body_object(&body, &TransformOptions { path: "#/", ctx: &ctx }).emit();
        assert_eq!(
            out,
            "{\n  readonly content: {\n    readonly \"application/json\": boolean;\n  };\n}"
        );
    }

    #[test]
    fn test_request_body_without_content() {
        let ctx = GlobalContext::default();
        let out = transform_request_body_object(&json!({}), &TransformOptions { path: "#/", ctx: &ctx }).emit();
        assert_eq!(out, "{\n  content: {\n    \"*/*\": never;\n  };\n}");
    }
}
