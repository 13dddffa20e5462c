//! Construct-kind hints.
//!
//! Given a path into a document whose root is of a known kind, work out what
//! kind of construct the path lands on. Each kind has one continuation rule
//! that looks at the next segment; anything unmatched settles on the kind of
//! the rule, and the document-level fallback is [`ConstructKind::Schema`].

use std::fmt;

/// Semantic category of a document root or a position inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConstructKind {
    /// A whole API description document.
    #[default]
    OpenApi3,
    /// An entry of `paths`, `webhooks` or `components.pathItems`.
    PathItem,
    /// A method of a path item.
    Operation,
    /// A parameter object.
    Parameter,
    /// A request body object.
    RequestBody,
    /// A response object.
    Response,
    /// An entry of a `content` map.
    MediaType,
    /// A header object.
    Header,
    /// A schema object; also the fallback for unrecognised positions.
    Schema,
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OpenApi3 => "OpenAPI3",
            Self::PathItem => "PathItemObject",
            Self::Operation => "OperationObject",
            Self::Parameter => "ParameterObject",
            Self::RequestBody => "RequestBodyObject",
            Self::Response => "ResponseObject",
            Self::MediaType => "MediaTypeObject",
            Self::Header => "HeaderObject",
            Self::Schema => "SchemaObject",
        };
        f.write_str(name)
    }
}

impl ConstructKind {
    /// Continue resolution from a position already known to be of this kind.
    fn continue_from<S: AsRef<str>>(self, path: &[S]) -> Self {
        let rule: fn(&[S]) -> Self = match self {
            Self::OpenApi3 => from_document,
            Self::PathItem => from_path_item,
            Self::Operation => from_operation,
            Self::Parameter => from_parameter,
            Self::RequestBody => from_request_body,
            Self::Response => from_response,
            Self::MediaType => from_media_type,
            Self::Header => from_header,
            Self::Schema => from_schema,
        };
        rule(path)
    }
}

/// Resolve the construct kind at `path`, starting from a document of kind
/// `start` (a whole API description when absent). Never fails.
pub fn resolve_hint<S: AsRef<str>>(path: &[S], start: Option<ConstructKind>) -> ConstructKind {
    start.unwrap_or_default().continue_from(path)
}

fn head<S: AsRef<str>>(path: &[S]) -> Option<&str> {
    path.first().map(AsRef::as_ref)
}

fn skip<S>(path: &[S], n: usize) -> &[S] {
    &path[n.min(path.len())..]
}

fn from_document<S: AsRef<str>>(path: &[S]) -> ConstructKind {
    match head(path) {
        Some("paths" | "webhooks") => from_path_item(skip(path, 2)),
        Some("components") => from_components(skip(path, 1)),
        _ => ConstructKind::Schema,
    }
}

fn from_components<S: AsRef<str>>(path: &[S]) -> ConstructKind {
    match head(path) {
        Some("schemas" | "headers") => from_schema(skip(path, 2)),
        Some("parameters") => from_parameter(skip(path, 2)),
        Some("responses") => from_response(skip(path, 2)),
        Some("requestBodies") => from_request_body(skip(path, 2)),
        Some("pathItems") => from_path_item(skip(path, 2)),
        _ => ConstructKind::Schema,
    }
}

fn from_path_item<S: AsRef<str>>(path: &[S]) -> ConstructKind {
    match head(path) {
        None => ConstructKind::PathItem,
        // parameters/<index>/...
        Some("parameters") => from_parameter(skip(path, 2)),
        // <method>/...
        Some(_) => from_operation(skip(path, 1)),
    }
}

fn from_operation<S: AsRef<str>>(path: &[S]) -> ConstructKind {
    match head(path) {
        Some("parameters") => from_parameter(skip(path, 2)),
        Some("requestBody") => from_request_body(skip(path, 1)),
        Some("responses") => from_response(skip(path, 2)),
        _ => ConstructKind::Operation,
    }
}

fn from_parameter<S: AsRef<str>>(path: &[S]) -> ConstructKind {
    match head(path) {
        Some("content") => from_media_type(skip(path, 2)),
        Some("schema") => from_schema(skip(path, 1)),
        _ => ConstructKind::Parameter,
    }
}

fn from_request_body<S: AsRef<str>>(path: &[S]) -> ConstructKind {
    match head(path) {
        Some("content") => from_media_type(skip(path, 2)),
        _ => ConstructKind::RequestBody,
    }
}

fn from_response<S: AsRef<str>>(path: &[S]) -> ConstructKind {
    match head(path) {
        Some("headers") => from_header(skip(path, 2)),
        Some("content") => from_media_type(skip(path, 2)),
        _ => ConstructKind::Response,
    }
}

fn from_media_type<S: AsRef<str>>(path: &[S]) -> ConstructKind {
    match head(path) {
        Some("schema") => from_schema(skip(path, 1)),
        _ => ConstructKind::MediaType,
    }
}

fn from_header<S: AsRef<str>>(path: &[S]) -> ConstructKind {
    match head(path) {
        Some("schema") => from_schema(skip(path, 1)),
        Some("content") => from_media_type(skip(path, 2)),
        _ => ConstructKind::Header,
    }
}

fn from_schema<S: AsRef<str>>(path: &[S]) -> ConstructKind {
    match head(path) {
        Some("allOf" | "anyOf" | "oneOf") => from_schema(skip(path, 2)),
        _ => ConstructKind::Schema,
    }
}
