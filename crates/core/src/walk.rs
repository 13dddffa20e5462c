//! Generic traversal of parsed documents.

use serde_json::{Map, Value};

/// Visit every object node of `value`, depth first, parents before children.
///
/// `visit` receives the node and its path from the root (array indices are
/// rendered as decimal strings). The callback may mutate the node in place;
/// traversal continues into whatever children the node has after the callback
/// returns, so pruned branches are never visited. Arrays are traversed but not
/// passed to the callback.
pub fn walk<E, F>(value: &mut Value, mut visit: F) -> Result<(), E>
where
    F: FnMut(&mut Map<String, Value>, &[String]) -> Result<(), E>,
{
    let mut path = Vec::new();
    walk_inner(value, &mut path, &mut visit)
}

fn walk_inner<E, F>(value: &mut Value, path: &mut Vec<String>, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&mut Map<String, Value>, &[String]) -> Result<(), E>,
{
    match value {
        Value::Object(map) => {
            visit(map, path)?;
            for (key, child) in map.iter_mut() {
                path.push(key.clone());
                let result = walk_inner(child, path, visit);
                path.pop();
                result?;
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter_mut().enumerate() {
                path.push(index.to_string());
                let result = walk_inner(child, path, visit);
                path.pop();
                result?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Read-only counterpart of [`walk`].
pub fn visit<F>(value: &Value, mut visitor: F)
where
    F: FnMut(&Map<String, Value>, &[String]),
{
    let mut path = Vec::new();
    visit_inner(value, &mut path, &mut visitor);
}

fn visit_inner<F>(value: &Value, path: &mut Vec<String>, visitor: &mut F)
where
    F: FnMut(&Map<String, Value>, &[String]),
{
    match value {
        Value::Object(map) => {
            visitor(map, path);
            for (key, child) in map {
                path.push(key.clone());
                visit_inner(child, path, visitor);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(index.to_string());
                visit_inner(child, path, visitor);
                path.pop();
            }
        }
        _ => {}
    }
}
