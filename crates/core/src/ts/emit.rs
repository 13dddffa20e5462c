//! TypeScript code emission via the Emit trait.
//!
//! Each node renders itself at an indentation level. Object literals put their
//! members one level deeper and their closing brace at the given level, so a
//! nested type emitted at its member's level lines up with the member.

use super::types::{PropKey, TsLiteral, TsPrimitive, TsProp, TsType};
use super::utils::{INDENT, esc_obj_key, esc_str, make_empty_record};

/// Trait for emitting TypeScript code from type nodes.
pub trait Emit {
    /// Render the node with nested lines indented relative to `level`.
    fn emit_at(&self, level: usize) -> String;

    /// Render the node at the outermost level.
    fn emit(&self) -> String {
        self.emit_at(0)
    }
}

// =============================================================================
// Primitive Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit_at(&self, _level: usize) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Unknown => "unknown",
            TsPrimitive::Never => "never",
            TsPrimitive::Undefined => "undefined",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit_at(&self, _level: usize) -> String {
        match self {
            TsLiteral::String(s) => esc_str(s),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsType {
    fn emit_at(&self, level: usize) -> String {
        match self {
            TsType::Primitive(p) => p.emit_at(level),
            TsType::Literal(lit) => lit.emit_at(level),
            TsType::Ref(text) => text.clone(),
            TsType::Array(inner) => array_of(&inner.emit_at(level)),
            TsType::Tuple { items, rest } => {
                let mut parts: Vec<_> = items.iter().map(|t| t.emit_at(level)).collect();
                if let Some(rest) = rest {
                    parts.push(format!("...{}", array_of(&rest.emit_at(level))));
                }
                format!("[{}]", parts.join(", "))
            }
            TsType::Readonly(inner) => format!("readonly {}", inner.emit_at(level)),
            TsType::Union(types) => emit_union(types, level),
            TsType::Intersection(types) => emit_intersection(types, level),
            TsType::OneOf(types) => match types.as_slice() {
                [] => "never".to_string(),
                [only] => only.emit_at(level),
                _ => {
                    let parts: Vec<_> = types.iter().map(|t| t.emit_at(level)).collect();
                    format!("OneOf<[{}]>", parts.join(", "))
                }
            },
            TsType::Object(props) => {
                if props.is_empty() {
                    return make_empty_record().emit_at(level);
                }
                let mut output = String::from("{\n");
                for prop in props {
                    output.push_str(&prop.emit_at(level + 1));
                    output.push('\n');
                }
                output.push_str(&INDENT.repeat(level));
                output.push('}');
                output
            }
            TsType::Generic { name, args } => {
                let parts: Vec<_> = args.iter().map(|t| t.emit_at(level)).collect();
                format!("{}<{}>", name, parts.join(", "))
            }
        }
    }
}

/// `T[]`, parenthesizing compound element types.
fn array_of(inner: &str) -> String {
    if inner.contains(" | ") || inner.contains(" & ") || inner.starts_with("readonly ") {
        format!("({inner})[]")
    } else {
        format!("{inner}[]")
    }
}

/// De-duplicated union; `unknown` swallows the union, `never` drops out of it.
fn emit_union(types: &[TsType], level: usize) -> String {
    let mut members: Vec<String> = Vec::new();
    for ty in types {
        let rendered = ty.emit_at(level);
        if rendered == "unknown" {
            return rendered;
        }
        if !members.contains(&rendered) {
            members.push(rendered);
        }
    }
    if members.len() > 1 {
        members.retain(|m| m != "never");
    }
    match members.len() {
        0 => "never".to_string(),
        1 => members.swap_remove(0),
        _ => members.join(" | "),
    }
}

/// Intersection without `unknown` members; unions are parenthesized.
fn emit_intersection(types: &[TsType], level: usize) -> String {
    let members: Vec<(bool, String)> = types
        .iter()
        .map(|ty| (matches!(ty, TsType::Union(_)), ty.emit_at(level)))
        .filter(|(_, rendered)| rendered != "unknown")
        .collect();
    match members.as_slice() {
        [] => "unknown".to_string(),
        [(_, only)] => only.clone(),
        _ => members
            .iter()
            .map(|(is_union, rendered)| {
                if *is_union && rendered.contains(" | ") {
                    format!("({rendered})")
                } else {
                    rendered.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" & "),
    }
}

// =============================================================================
// Members
// =============================================================================

impl Emit for PropKey {
    fn emit_at(&self, _level: usize) -> String {
        match self {
            PropKey::Name(name) => esc_obj_key(name),
            PropKey::Quoted(name) => esc_str(name),
            PropKey::Raw(text) => text.clone(),
        }
    }
}

impl Emit for TsProp {
    fn emit_at(&self, level: usize) -> String {
        let mut output = String::new();
        if let Some(doc) = &self.doc {
            output.push_str(&doc_comment(doc, level));
            output.push('\n');
        }
        output.push_str(&INDENT.repeat(level));
        if self.readonly {
            output.push_str("readonly ");
        }
        output.push_str(&self.key.emit_at(level));
        if self.optional {
            output.push('?');
        }
        output.push_str(": ");
        output.push_str(&self.ty.emit_at(level));
        output.push(';');
        output
    }
}

/// Render a JSDoc block at `level`; single lines stay on one line.
pub fn doc_comment(text: &str, level: usize) -> String {
    let pad = INDENT.repeat(level);
    let text = text.trim().replace("*/", "*\\/");
    if !text.contains('\n') {
        return format!("{pad}/** {text} */");
    }
    let mut output = format!("{pad}/**\n");
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            output.push_str(&format!("{pad} *\n"));
        } else {
            output.push_str(&format!("{pad} * {line}\n"));
        }
    }
    output.push_str(&format!("{pad} */"));
    output
}
