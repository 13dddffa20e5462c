use serde_json::Value;

/// JSDoc text for a schema, operation, parameter or response node.
pub fn schema_object_comment(node: &Value) -> Option<String> {
    let node = node.as_object()?;
    let text = |key: &str| {
        node.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    let mut lines = Vec::new();
    lines.extend(text("title").map(str::to_string));
    lines.extend(text("summary").map(str::to_string));
    if let Some(format) = text("format") {
        lines.push(format!("Format: {format}"));
    }
    if node.get("deprecated").and_then(Value::as_bool) == Some(true) {
        lines.push("@deprecated".to_string());
    }
    if let Some(description) = text("description") {
        lines.push(format!("@description {description}"));
    }
    for tag in ["default", "example"] {
        if let Some(value) = node.get(tag) {
            lines.push(format!("@{tag} {}", render(value)));
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_comment_lines() {
        let node = json!({
            "title": "Pet",
            "format": "uuid",
            "deprecated": true,
            "description": "  A pet.  ",
            "default": { "a": 1 },
            "example": "rex"
        });
        assert_eq!(
            schema_object_comment(&node).unwrap(),
            "Pet\nFormat: uuid\n@deprecated\n@description A pet.\n@default {\n  \"a\": 1\n}\n@example rex"
        );
    }

    #[test]
    fn test_no_comment() {
        assert_eq!(schema_object_comment(&json!({ "type": "string" })), None);
        assert_eq!(schema_object_comment(&json!({ "description": "" })), None);
        assert_eq!(schema_object_comment(&json!("text")), None);
        assert_eq!(
            schema_object_comment(&json!({ "default": "" })).as_deref(),
            Some("@default ")
        );
    }
}
