use serde_json::{Map, Value};

use super::path_item_object::METHODS;
use super::{
    GlobalContext, Operations, TransformOptions, child_path, entries, transform_parameter_object,
    transform_path_item_object,
};
use crate::ts::{Emit, PropKey, TsProp, TsType};

/// Paths object keyed by URL template.
///
/// With `path_params_as_types`, templated URLs become template literal index
/// signatures (`[path: `/pets/${string}`]`).
pub fn transform_paths_object(
    paths: &Map<String, Value>,
    ctx: &GlobalContext,
    operations: &mut Operations,
) -> TsType {
    let member_ctx = ctx.deeper();
    let mut members = Vec::new();
    for (url, path_item) in entries(paths, ctx) {
        let Some(item) = path_item.as_object() else {
            continue;
        };
        let path = child_path("#/paths", url);
        let key = if ctx.path_params_as_types && url.contains('{') {
            PropKey::Raw(format!("[path: `{}`]", template_url(url, item, &path, ctx)))
        } else {
            PropKey::Quoted(url.clone())
        };
        let ty = transform_path_item_object(
            item,
            &TransformOptions {
                path: &path,
                ctx: &member_ctx,
            },
            operations,
        );
        members.push(TsProp::new(key, ty));
    }
    TsType::Object(members)
}

/// Replace every `{name}` of `url` with the type of its path parameter.
fn template_url(url: &str, item: &Map<String, Value>, path: &str, ctx: &GlobalContext) -> String {
    let declared = std::iter::once(item.get("parameters"))
        .chain(METHODS.iter().map(|m| item.get(*m).and_then(|op| op.get("parameters"))))
        .flatten()
        .filter_map(Value::as_array)
        .flatten()
        .filter(|p| p.get("in").and_then(Value::as_str) == Some("path"));

    let mut template = url.replace('`', "\\`");
    for parameter in declared {
        let Some(name) = parameter.get("name").and_then(Value::as_str) else {
            continue;
        };
        let parameter_path = child_path(&child_path(path, "parameters"), name);
        let ty = transform_parameter_object(
            parameter,
            &TransformOptions {
                path: &parameter_path,
                ctx,
            },
        );
        template = template.replace(&format!("{{{name}}}"), &format!("${{{}}}", ty.emit()));
    }

    // Undeclared placeholders still match any segment.
    let mut output = String::with_capacity(template.len());
    let mut rest = template.as_str();
    while let Some(start) = rest.find('{') {
        let is_substitution = rest[..start].ends_with('$');
        match rest[start..].find('}') {
            Some(end) if !is_substitution => {
                output.push_str(&rest[..start]);
                output.push_str("${string}");
                rest = &rest[start + end + 1..];
            }
            Some(end) => {
                output.push_str(&rest[..start + end + 1]);
                rest = &rest[start + end + 1..];
            }
            None => break,
        }
    }
    output.push_str(rest);
    output
}
