//! Reference pointers and canonical index paths.
//!
//! A reference pointer looks like `<document>#/seg1/seg2`. Once loading is
//! done every pointer is rewritten into a canonical index path, a TypeScript
//! indexed-access expression such as `components["schemas"]["Pet"]`.

use crate::ts::utils::esc_str;

/// Segment prefix marking vendor extensions (`x-...`).
pub const EXTENSION_PREFIX: &str = "x-";

/// Leading segment of canonical index paths into non-root documents.
pub const EXTERNAL_ROOT: &str = "external";

/// A parsed reference pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Document part; empty means "this document".
    pub document: String,
    /// Path segments within the document, decoded, with `properties` dropped.
    pub path: Vec<String>,
}

impl Reference {
    /// Whether the pointer targets the document it appears in.
    pub fn is_local(&self) -> bool {
        self.document.is_empty()
    }

    /// Whether any segment names a vendor extension.
    pub fn touches_extension(&self) -> bool {
        self.path.iter().any(|s| s.starts_with(EXTENSION_PREFIX))
    }
}

/// Parse a pointer string into its document part and path segments.
///
/// Canonical index paths (`a["b"]["c"]`) parse as local pointers, so the
/// transformers can read references after they have been rewritten.
pub fn parse_ref(pointer: &str) -> Reference {
    if let Some((document, fragment)) = pointer.split_once('#') {
        let path = fragment
            .split('/')
            .filter(|s| !s.is_empty() && *s != "properties")
            .map(decode_segment)
            .collect();
        return Reference {
            document: document.to_string(),
            path,
        };
    }
    if pointer.contains("[\"") {
        let path = parse_ts_index(pointer)
            .into_iter()
            .filter(|s| !s.is_empty() && s != "properties")
            .collect();
        return Reference {
            document: String::new(),
            path,
        };
    }
    Reference {
        document: pointer.to_string(),
        path: Vec::new(),
    }
}

/// Decode JSON pointer escapes (`~1` is `/`, `~0` is `~`).
fn decode_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Build a canonical index path from segments: `head["a"]["b"]`.
pub fn make_ts_index<S: AsRef<str>>(path: &[S]) -> String {
    let Some((head, rest)) = path.split_first() else {
        return String::new();
    };
    let mut out = head.as_ref().to_string();
    for segment in rest {
        out.push('[');
        out.push_str(&esc_str(segment.as_ref()));
        out.push(']');
    }
    out
}

/// Canonical index path of `path` inside the document `document_id`.
///
/// Root document paths are bare; any other document is reached through the
/// `external` root keyed by its identifier.
pub fn canonical_index<S: AsRef<str>>(document_id: &str, path: &[S]) -> String {
    if document_id == crate::ROOT_ID {
        return make_ts_index(path);
    }
    let mut segments = vec![EXTERNAL_ROOT.to_string(), document_id.to_string()];
    segments.extend(path.iter().map(|s| s.as_ref().to_string()));
    make_ts_index(&segments)
}

/// Split a canonical index path back into segments.
pub fn parse_ts_index(index: &str) -> Vec<String> {
    let Some(bracket) = index.find('[') else {
        return vec![index.to_string()];
    };
    let mut parts = vec![index[..bracket].to_string()];
    let mut rest = &index[bracket..];
    while let Some(body) = rest.strip_prefix("[\"") {
        let mut end = None;
        let mut escaped = false;
        for (i, c) in body.char_indices() {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => {
                    end = Some(i);
                    break;
                }
                _ => escaped = false,
            }
        }
        let Some(end) = end else { break };
        parts.push(body[..end].replace("\\\"", "\"").replace("\\\\", "\\"));
        rest = body[end + 1..].strip_prefix(']').unwrap_or_default();
    }
    parts
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_ref() {
        let r = parse_ref("#/components/schemas/Pet");
        assert!(r.is_local());
        assert_eq!(r.path, vec!["components", "schemas", "Pet"]);
    }

    #[test]
    fn test_parse_remote_ref() {
        let r = parse_ref("./common.yaml#/components/schemas/Id");
        assert_eq!(r.document, "./common.yaml");
        assert_eq!(r.path, vec!["components", "schemas", "Id"]);
    }

    #[test]
    fn test_parse_whole_document_ref() {
        let r = parse_ref("pet.yaml");
        assert_eq!(r.document, "pet.yaml");
        assert!(r.path.is_empty());
    }

    #[test]
    fn test_parse_ref_drops_properties_and_decodes() {
        let r = parse_ref("#/paths/~1users~1{id}/get/properties/a~0b");
        assert_eq!(r.path, vec!["paths", "/users/{id}", "get", "a~b"]);
    }

    #[test]
    fn test_extension_segments() {
        assert!(parse_ref("#/x-vendor/thing").touches_extension());
        assert!(!parse_ref("#/components/schemas/x").touches_extension());
    }

    #[test]
    fn test_make_ts_index() {
        assert_eq!(
            make_ts_index(&["components", "schemas", "Pet"]),
            r#"components["schemas"]["Pet"]"#
        );
        assert_eq!(make_ts_index(&["paths"]), "paths");
        assert_eq!(make_ts_index::<&str>(&[]), "");
        assert_eq!(make_ts_index(&["a", "say \"hi\""]), r#"a["say \"hi\""]"#);
    }

    #[test]
    fn test_canonical_index() {
        assert_eq!(
            canonical_index(".", &["components", "schemas", "Pet"]),
            r#"components["schemas"]["Pet"]"#
        );
        assert_eq!(
            canonical_index("common.yaml", &["components", "schemas", "Id"]),
            r#"external["common.yaml"]["components"]["schemas"]["Id"]"#
        );
    }

    #[test]
    fn test_parse_ts_index() {
        assert_eq!(
            parse_ts_index(r#"components["parameters"]["limit"]"#),
            vec!["components", "parameters", "limit"]
        );
        assert_eq!(parse_ts_index("plain"), vec!["plain"]);
        assert_eq!(parse_ts_index(r#"a["say \"hi\""]"#), vec!["a", "say \"hi\""]);
    }

    #[test]
    fn test_parse_ref_reads_canonical_paths() {
        let r = parse_ref(r#"components["schemas"]["Pet"]"#);
        assert!(r.is_local());
        assert_eq!(r.path, vec!["components", "schemas", "Pet"]);
    }
}
