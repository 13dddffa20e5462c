use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::DocumentMap;
use crate::reference::canonical_index;
use crate::walk::visit;

/// Discriminator object of a composed schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// Property holding the tag.
    pub property_name: String,
    /// Tag value to schema reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<IndexMap<String, String>>,
}

/// Discriminators keyed by the canonical index path of the schema carrying them.
pub type DiscriminatorRegistry = HashMap<String, Discriminator>;

/// Scan every loaded document for discriminator-bearing schemas.
pub(crate) fn collect(documents: &DocumentMap) -> DiscriminatorRegistry {
    let mut registry = DiscriminatorRegistry::new();
    for (id, document) in documents {
        visit(&document.schema, |node, path| {
            let Some(value) = node.get("discriminator") else {
                return;
            };
            // A property that happens to be named "discriminator" is a schema.
            if value.get("propertyName").is_none() {
                return;
            }
            let segments: Vec<&String> = path.iter().filter(|s| *s != "properties").collect();
            let key = canonical_index(id, &segments);
            match serde_json::from_value::<Discriminator>(value.clone()) {
                Ok(discriminator) => {
                    registry.insert(key, discriminator);
                }
                Err(err) => warn!(%key, error = %err, "Skipping malformed discriminator."),
            }
        });
    }
    debug!(count = registry.len(), "Collected discriminators.");
    registry
}
