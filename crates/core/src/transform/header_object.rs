use serde_json::Value;

use super::TransformOptions;
use super::media_type_object::content_members;
use super::{child_path, schema_type};
use crate::ts::TsType;

/// Header object: its schema, else its `content` map, else `unknown`.
pub fn transform_header_object(header: &Value, options: &TransformOptions<'_>) -> TsType {
    if let Some(schema) = header.get("schema") {
        return schema_type(schema, options);
    }
    if let Some(content) = header.get("content").and_then(Value::as_object) {
        let member_ctx = options.ctx.deeper();
        let path = child_path(options.path, "content");
        return TsType::Object(content_members(content, &path, &member_ctx));
    }
    TsType::unknown()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::transform::GlobalContext;
    use crate::ts::Emit;

    #[test]
    fn test_header_shapes() {
        let ctx = GlobalContext::default();
        let options = TransformOptions { path: "#/", ctx: &ctx };
        assert_eq!(
            transform_header_object(&json!({ "schema": { "type": "integer" } }), &options).emit(),
            "number"
        );
        assert_eq!(
            transform_header_object(
                &json!({ "content": { "text/plain": { "schema": { "type": "string" } } } }),
                &options
            )
            .emit(),
            "{\n  \"text/plain\": string;\n}"
        );
        assert_eq!(transform_header_object(&json!({}), &options).emit(), "unknown");
    }
}
