use serde_json::{Map, Value};

use super::{GlobalContext, TransformOptions, child_path, entries, ref_of, schema_object_comment, schema_type};
use crate::ts::{PropKey, TsProp, TsType};

/// Media type object: its schema, or `unknown` without one.
pub fn transform_media_type_object(media_type: &Value, options: &TransformOptions<'_>) -> TsType {
    match media_type.get("schema") {
        Some(schema) => schema_type(schema, options),
        None => TsType::unknown(),
    }
}

/// Members of a `content` map keyed by quoted media type, rendered at
/// `ctx.indent_lv`. Referenced entries stay references.
pub(crate) fn content_members(
    content: &Map<String, Value>,
    path: &str,
    ctx: &GlobalContext,
) -> Vec<TsProp> {
    entries(content, ctx)
        .into_iter()
        .map(|(mime, media_type)| {
            let ty = match ref_of(media_type) {
                Some(reference) => TsType::raw(reference),
                None => transform_media_type_object(
                    media_type,
                    &TransformOptions {
                        path: &child_path(path, mime),
                        ctx,
                    },
                ),
            };
            TsProp::new(PropKey::Quoted(mime.clone()), ty)
                .readonly(ctx.immutable_types)
                .doc(schema_object_comment(media_type))
        })
        .collect()
}
