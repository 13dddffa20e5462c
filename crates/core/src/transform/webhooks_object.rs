use serde_json::{Map, Value};

use super::{GlobalContext, Operations, TransformOptions, child_path, entries, transform_path_item_object};
use crate::ts::{PropKey, TsProp, TsType};

/// Webhooks object: path items keyed by quoted webhook name.
pub fn transform_webhooks_object(
    webhooks: &Map<String, Value>,
    ctx: &GlobalContext,
    operations: &mut Operations,
) -> TsType {
    let member_ctx = ctx.deeper();
    let members = entries(webhooks, ctx)
        .into_iter()
        .filter_map(|(name, item)| Some((name, item.as_object()?)))
        .map(|(name, item)| {
            let path = child_path("#/webhooks", name);
            let ty = transform_path_item_object(
                item,
                &TransformOptions {
                    path: &path,
                    ctx: &member_ctx,
                },
                operations,
            );
            TsProp::new(PropKey::Quoted(name.clone()), ty)
        })
        .collect();
    TsType::Object(members)
}
