//! Document parsing.
//!
//! Documents are parsed into `serde_json::Value` whichever format they come
//! in. YAML goes through `serde_yaml::Value` first because YAML mappings may
//! have non-string keys (unquoted status codes such as `200:`).

use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// Serialization of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Decide by file extension (`.json`, `.yaml`, `.yml`).
    pub(crate) fn from_path(path: &str) -> Option<Self> {
        let name = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Decide by HTTP content type.
    pub(crate) fn from_content_type(content_type: &str) -> Option<Self> {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("json") {
            Some(Self::Json)
        } else if content_type.contains("yaml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }

    /// Decide by the first non-whitespace character.
    pub(crate) fn sniff(text: &str) -> Self {
        if text.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

/// Parse `text` as `format`. `id` names the document in error messages.
pub(crate) fn parse(text: &str, format: Format, id: &str) -> Result<Value> {
    match format {
        Format::Json => serde_json::from_str(text).map_err(|err| Error::Json {
            id: id.to_string(),
            message: err.to_string(),
        }),
        Format::Yaml => serde_yaml::from_str::<serde_yaml::Value>(text)
            .map(yaml_to_json)
            .map_err(|err| Error::Yaml {
                id: id.to_string(),
                message: err.to_string(),
            }),
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Null => "null".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
