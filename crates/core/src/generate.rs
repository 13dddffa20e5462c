//! Declaration file assembly.
//!
//! Renders the root document's `paths`, `webhooks` and `components`, every
//! other loaded document under `external`, and the hoisted `operations`.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::error::Result;
use crate::hint::ConstructKind;
use crate::load::fetch::{Fetch, ReqwestFetch};
use crate::load::{Document, LoadOptions, Loaded, Source, load};
use crate::transform::{
    GlobalContext, Operations, PostTransformHook, TransformHook, TransformOptions,
    child_path, collect_parameter_locations, looks_like, natural_cmp, transform_construct,
    transform_schema,
};
use crate::ts::utils::esc_obj_key;
use crate::ts::{Emit, PropKey, TsProp, TsType};

const BANNER: &str = "/**
 * This file was auto-generated by oats.
 * Do not make direct changes to the file.
 */";

const ONE_OF_HELPERS: &str = "/** OneOf type helpers */
type Without<T, U> = { [P in Exclude<keyof T, keyof U>]?: never };
type XOR<T, U> = (T | U) extends object ? (Without<T, U> & U) | (Without<U, T> & T) : T | U;
type OneOf<T extends any[]> = T extends [infer Only] ? Only : T extends [infer A, infer B, ...infer Rest] ? OneOf<[XOR<A, B>, ...Rest]> : never;";

/// Options for [`generate`]; also the `oats.toml` format.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GenerateOptions {
    /// Allow arbitrary extra properties on every object schema.
    pub additional_properties: bool,
    /// Sort object members naturally instead of keeping declaration order.
    pub alphabetize: bool,
    /// Treat members with a `default` as required.
    pub default_non_nullable: bool,
    /// Leave out schemas, members and operations marked deprecated.
    pub exclude_deprecated: bool,
    /// Mark every member and array `readonly`.
    pub immutable_types: bool,
    /// Encode `minItems`/`maxItems` as tuples.
    pub support_array_length: bool,
    /// Key templated paths by template literal types.
    pub path_params_as_types: bool,
    /// Emit `export type X = {...}` instead of `export interface X {...}`.
    pub export_type: bool,
    /// `Authorization` header for remote documents.
    pub auth: Option<String>,
    /// Extra headers for remote documents.
    pub http_headers: IndexMap<String, Value>,
    /// Request method for remote documents.
    pub http_method: Option<String>,
    /// Base for relative references of stream or in-memory roots.
    #[serde(skip)]
    pub root_url: Option<Url>,
    /// Construct kind of the root document.
    #[serde(skip)]
    pub hint: Option<ConstructKind>,
    /// Replaces the type of a schema object when it returns one.
    #[serde(skip)]
    pub transform: Option<TransformHook>,
    /// Rewrites the type of every schema object after transformation.
    #[serde(skip)]
    pub post_transform: Option<PostTransformHook>,
    /// Fetcher for remote documents; reqwest when unset.
    #[serde(skip)]
    pub fetch: Option<Arc<dyn Fetch>>,
}

impl fmt::Debug for GenerateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateOptions")
            .field("additional_properties", &self.additional_properties)
            .field("alphabetize", &self.alphabetize)
            .field("default_non_nullable", &self.default_non_nullable)
            .field("exclude_deprecated", &self.exclude_deprecated)
            .field("immutable_types", &self.immutable_types)
            .field("support_array_length", &self.support_array_length)
            .field("path_params_as_types", &self.path_params_as_types)
            .field("export_type", &self.export_type)
            .field("auth", &self.auth.as_ref().map(|_| "<redacted>"))
            .field("http_headers", &self.http_headers.keys().collect::<Vec<_>>())
            .field("http_method", &self.http_method)
            .field("root_url", &self.root_url.as_ref().map(Url::as_str))
            .field("hint", &self.hint)
            .field("transform", &self.transform.is_some())
            .field("post_transform", &self.post_transform.is_some())
            .finish_non_exhaustive()
    }
}

impl GenerateOptions {
    /// Loader options derived from the remote-fetch settings.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            root_url: self.root_url.clone(),
            hint: self.hint,
            auth: self.auth.clone(),
            http_headers: self.http_headers.clone(),
            http_method: self.http_method.clone(),
            fetch: self
                .fetch
                .clone()
                .unwrap_or_else(|| Arc::new(ReqwestFetch::default())),
        }
    }

    /// Transform context for the loaded documents.
    pub fn context(&self, loaded: &Loaded) -> GlobalContext {
        GlobalContext {
            additional_properties: self.additional_properties,
            alphabetize: self.alphabetize,
            default_non_nullable: self.default_non_nullable,
            discriminators: Arc::new(loaded.discriminators.clone()),
            exclude_deprecated: self.exclude_deprecated,
            immutable_types: self.immutable_types,
            indent_lv: 0,
            parameter_locations: Arc::new(collect_parameter_locations(&loaded.documents)),
            path_params_as_types: self.path_params_as_types,
            support_array_length: self.support_array_length,
            transform: self.transform.clone(),
            post_transform: self.post_transform.clone(),
        }
    }
}

/// Load `source` and render its TypeScript declarations.
pub async fn generate(source: Source, options: &GenerateOptions) -> Result<String> {
    let loaded = load(source, &options.load_options()).await?;
    Ok(generate_from_documents(&loaded, options))
}

/// Render TypeScript declarations for already loaded documents.
pub fn generate_from_documents(loaded: &Loaded, options: &GenerateOptions) -> String {
    let ctx = options.context(loaded);
    let mut operations = Operations::new();
    debug!(documents = loaded.documents.len(), "Transforming documents.");

    let mut sections = Vec::new();
    match loaded.root() {
        Some(root) if root.hint == ConstructKind::OpenApi3 => {
            let output = transform_schema(&root.schema, &ctx, &mut operations);
            sections.push(section("paths", &output.paths, options));
            sections.push(section("webhooks", &output.webhooks, options));
            sections.push(section("components", &output.components, options));
        }
        Some(root) => {
            let ty = transform_construct(
                root.hint,
                &root.schema,
                &TransformOptions {
                    path: "#",
                    ctx: &ctx,
                },
                &mut operations,
            );
            sections.push(format!("export type root = {};", ty.emit()));
        }
        None => {}
    }

    let external = external_documents(loaded, &ctx, &mut operations);
    sections.push(section("external", &external, options));

    let operations_text = if operations.is_empty() {
        String::new()
    } else {
        let mut text = String::from("{\n");
        for (id, ty) in &operations {
            text.push_str(&format!("  {}: {ty};\n", esc_obj_key(id)));
        }
        text.push('}');
        text
    };
    sections.push(section("operations", &operations_text, options));

    let body = sections.join("\n\n");
    let mut output = String::from(BANNER);
    output.push_str("\n\n");
    if body.contains("OneOf<") {
        output.push_str(ONE_OF_HELPERS);
        output.push_str("\n\n");
    }
    output.push_str(&body);
    output.push('\n');

    info!(
        documents = loaded.documents.len(),
        operations = operations.len(),
        "Generated declarations."
    );
    output
}

/// `export interface <name> {...}`, or the empty record for absent sections.
fn section(name: &str, text: &str, options: &GenerateOptions) -> String {
    if text.is_empty() {
        return format!("export type {name} = Record<string, never>;");
    }
    if options.export_type || !text.starts_with('{') {
        format!("export type {name} = {text};")
    } else {
        format!("export interface {name} {text}")
    }
}

/// Every non-root document keyed by identifier, in natural order.
fn external_documents(
    loaded: &Loaded,
    ctx: &GlobalContext,
    operations: &mut Operations,
) -> String {
    let mut documents: Vec<(&String, &Document)> = loaded
        .documents
        .iter()
        .filter(|(id, _)| id.as_str() != crate::ROOT_ID)
        .collect();
    if documents.is_empty() {
        return String::new();
    }
    documents.sort_by(|(a, _), (b, _)| natural_cmp(a, b));

    let member_ctx = ctx.deeper();
    let members = documents
        .into_iter()
        .map(|(id, document)| {
            let path = format!("{id}#");
            let ty = external_node(document.hint, &document.schema, &path, &member_ctx, operations);
            TsProp::new(PropKey::Quoted(id.clone()), ty)
        })
        .collect();
    TsType::Object(members).emit_at(ctx.indent_lv)
}

/// Render a node of an external document. API descriptions render as their
/// sections; nodes shaped like the document's construct kind render as that
/// construct; anything else is a map whose entries are rendered in turn.
fn external_node(
    hint: ConstructKind,
    node: &Value,
    path: &str,
    ctx: &GlobalContext,
    operations: &mut Operations,
) -> TsType {
    let Some(object) = node.as_object() else {
        return transform_construct(
            ConstructKind::Schema,
            node,
            &TransformOptions { path, ctx },
            operations,
        );
    };
    if looks_like(ConstructKind::OpenApi3, object) {
        return transform_construct(
            ConstructKind::OpenApi3,
            node,
            &TransformOptions { path, ctx },
            operations,
        );
    }
    if looks_like(hint, object) || object.is_empty() {
        return transform_construct(hint, node, &TransformOptions { path, ctx }, operations);
    }
    let member_ctx = ctx.deeper();
    let members = object
        .iter()
        .map(|(key, value)| {
            let child = child_path(path, key);
            let ty = external_node(hint, value, &child, &member_ctx, operations);
            TsProp::new(PropKey::Name(key.clone()), ty)
        })
        .collect();
    TsType::Object(members)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::load::DocumentMap;

    fn loaded(documents: Vec<(&str, ConstructKind, Value)>) -> Loaded {
        let documents: DocumentMap = documents
            .into_iter()
            .map(|(id, hint, schema)| (id.to_string(), Document { hint, schema }))
            .collect();
        Loaded {
            discriminators: Default::default(),
            documents,
        }
    }

    #[test]
    fn test_empty_document() {
        let out = generate_from_documents(
            &loaded(vec![(".", ConstructKind::OpenApi3, json!({ "openapi": "3.0.0" }))]),
            &GenerateOptions::default(),
        );
        let expected = [
            BANNER,
            "",
            "export type paths = Record<string, never>;",
            "",
            "export type webhooks = Record<string, never>;",
            "",
            "export type components = Record<string, never>;",
            "",
            "export type external = Record<string, never>;",
            "",
            "export type operations = Record<string, never>;",
            "",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_sections_and_operations() {
        let root = json!({
            "openapi": "3.0.0",
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "listPets",
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "application/json": { "schema": {
                                    "type": "array",
                                    "items": { "$ref": "components[\"schemas\"][\"Pet\"]" }
                                } } }
                            }
                        }
                    }
                }
            },
            "components": { "schemas": { "Pet": { "type": "string" } } }
        });
        let out = generate_from_documents(
            &loaded(vec![(".", ConstructKind::OpenApi3, root)]),
            &GenerateOptions::default(),
        );
        assert!(out.contains(
            "export interface paths {\n  \"/pets\": {\n    get: operations[\"listPets\"];\n  };\n}"
        ));
        assert!(out.contains("export interface operations {\n  listPets: {\n    responses: {"));
        assert!(out.contains("\"application/json\": components[\"schemas\"][\"Pet\"][];"));
        assert!(!out.contains("OneOf<"));
    }

    #[test]
    fn test_export_type_and_one_of_helpers() {
        let root = json!({
            "components": { "schemas": { "Value": { "type": ["string", "number"] } } }
        });
        let options = GenerateOptions {
            export_type: true,
            ..GenerateOptions::default()
        };
        let out = generate_from_documents(&loaded(vec![(".", ConstructKind::OpenApi3, root)]), &options);
        assert!(out.contains(ONE_OF_HELPERS));
        assert!(out.contains("export type components = {\n  schemas: {\n    Value: OneOf<[string, number]>;"));
    }

    #[test]
    fn test_external_documents() {
        let documents = vec![
            (".", ConstructKind::OpenApi3, json!({ "openapi": "3.0.0" })),
            (
                "schemas/common.yaml",
                ConstructKind::Schema,
                json!({ "Id": { "type": "string" }, "Tags": { "type": "array", "items": { "type": "string" } } }),
            ),
            ("pet.yaml", ConstructKind::Schema, json!({ "type": "integer" })),
        ];
        let out = generate_from_documents(&loaded(documents), &GenerateOptions::default());
        let expected = [
            "export interface external {",
            "  \"pet.yaml\": number;",
            "  \"schemas/common.yaml\": {",
            "    Id: string;",
            "    Tags: string[];",
            "  };",
            "}",
        ]
        .join("\n");
        assert!(out.contains(&expected), "{out}");
    }

    #[test]
    fn test_external_components_keep_their_document() {
        let pet = r#"external["other.yaml"]["components"]["schemas"]["Pet"]"#;
        let cat = json!({ "allOf": [{ "$ref": pet }] });
        let mut loaded = loaded(vec![
            (".", ConstructKind::OpenApi3, json!({ "components": { "schemas": { "Cat": cat.clone() } } })),
            (
                "other.yaml",
                ConstructKind::OpenApi3,
                json!({ "components": { "schemas": { "Pet": { "type": "object" }, "Cat": cat } } }),
            ),
        ]);
        loaded.discriminators.insert(
            pet.to_string(),
            crate::load::Discriminator {
                property_name: "petType".to_string(),
                mapping: Some(IndexMap::from([(
                    "cat".to_string(),
                    "#/components/schemas/Cat".to_string(),
                )])),
            },
        );
        let out = generate_from_documents(&loaded, &GenerateOptions::default());
        let (root, external) = out.split_once("export interface external").unwrap();
        assert!(root.contains("petType: \"Cat\";"), "{root}");
        assert!(external.contains("petType: \"cat\";"), "{external}");
    }

    #[test]
    fn test_options_from_toml_keys() {
        let options: GenerateOptions = serde_json::from_value(json!({
            "immutable-types": true,
            "path-params-as-types": true,
            "http-headers": { "x-api-key": "secret" }
        }))
        .unwrap();
        assert!(options.immutable_types);
        assert!(options.path_params_as_types);
        assert_eq!(options.http_headers["x-api-key"], "secret");
        assert!(serde_json::from_value::<GenerateOptions>(json!({ "unknown": 1 })).is_err());
    }
}
