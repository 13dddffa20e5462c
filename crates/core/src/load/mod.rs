//! Document loading and reference resolution.
//!
//! [`load`] reads the root document, walks it for `$ref` pointers into other
//! documents and loads those concurrently, recursively. Every cross-document
//! pointer is rewritten on the spot so its document part is the target's
//! identifier relative to the root. Once everything has joined, the root
//! invocation rewrites all pointers into canonical index paths and collects
//! the discriminator registry.

pub mod fetch;

mod discriminator;
mod parse;

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use futures_util::future::{BoxFuture, try_join_all};
use indexmap::IndexMap;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::{Map, Value};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

pub use discriminator::{Discriminator, DiscriminatorRegistry};

use self::fetch::{Fetch, FetchRequest, ReqwestFetch};
use self::parse::Format;
use crate::ROOT_ID;
use crate::error::{Error, Result};
use crate::hint::{ConstructKind, resolve_hint};
use crate::reference::{canonical_index, parse_ref};
use crate::walk::walk;

/// User agent sent with every remote document request.
const USER_AGENT_VALUE: &str = "oats";

/// Where the root document comes from.
pub enum Source {
    /// A local file or remote document.
    Url(Url),
    /// A byte stream, drained fully and sniffed for JSON or YAML.
    Stream(Box<dyn AsyncRead + Send + Unpin>),
    /// An already-parsed document.
    Value(Value),
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.debug_tuple("Url").field(&url.as_str()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Value(_) => f.write_str("Value(..)"),
        }
    }
}

impl From<Url> for Source {
    fn from(url: Url) -> Self {
        Self::Url(url)
    }
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// A parsed document tagged with the construct kind of its root.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Construct kind of the document root.
    pub hint: ConstructKind,
    /// The parsed document, references rewritten.
    pub schema: Value,
}

/// Loaded documents keyed by identifier (`"."` for the root).
pub type DocumentMap = IndexMap<String, Document>;

/// Result of a load: every reachable document plus their discriminators.
#[derive(Debug, Clone)]
pub struct Loaded {
    /// Every loaded document, the root under [`ROOT_ID`].
    pub documents: DocumentMap,
    /// Discriminators found in any of the documents.
    pub discriminators: DiscriminatorRegistry,
}

impl Loaded {
    /// The root document.
    pub fn root(&self) -> Option<&Document> {
        self.documents.get(ROOT_ID)
    }
}

/// Options for [`load`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Base for relative references when the root is a stream or a value.
    /// Without it such roots cannot reference relative files.
    pub root_url: Option<Url>,
    /// Construct kind of the root document; a full API description if unset.
    pub hint: Option<ConstructKind>,
    /// `Authorization` header value for remote documents.
    pub auth: Option<String>,
    /// Extra request headers; non-string values are sent JSON-encoded.
    pub http_headers: IndexMap<String, Value>,
    /// Request method for remote documents (`GET` if unset).
    pub http_method: Option<String>,
    /// Transport for remote documents.
    pub fetch: Arc<dyn Fetch>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            root_url: None,
            hint: None,
            auth: None,
            http_headers: IndexMap::new(),
            http_method: None,
            fetch: Arc::new(ReqwestFetch::default()),
        }
    }
}

/// Turn a command-line style locator into a URL.
///
/// `http(s)` URLs pass through, protocol-relative `//host/...` becomes
/// `https`, anything else is a local path (or `file:` URL) which must exist
/// and must not be a directory.
pub fn resolve_locator(locator: &str) -> Result<Url> {
    if let Some(rest) = locator.strip_prefix("//") {
        return parse_url(&format!("https://{rest}"));
    }
    if locator.starts_with("http://") || locator.starts_with("https://") {
        return parse_url(locator);
    }
    let path = if locator.starts_with("file:") {
        parse_url(locator)?
            .to_file_path()
            .map_err(|()| Error::InvalidInput(locator.to_string()))?
    } else if Path::new(locator).is_absolute() {
        Path::new(locator).to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|source| Error::Io {
                path: ".".to_string(),
                source,
            })?
            .join(locator)
    };
    if !path.exists() {
        return Err(Error::NotFound(locator.to_string()));
    }
    if path.is_dir() {
        return Err(Error::IsDirectory(path));
    }
    Url::from_file_path(&path).map_err(|()| Error::InvalidInput(locator.to_string()))
}

fn parse_url(text: &str) -> Result<Url> {
    Url::parse(text).map_err(|err| Error::InvalidInput(format!("{text}: {err}")))
}

/// Load `source` and every document it transitively references.
pub async fn load(source: Source, options: &LoadOptions) -> Result<Loaded> {
    let root = match &source {
        Source::Url(url) => Some(url.clone()),
        Source::Stream(_) | Source::Value(_) => options.root_url.clone(),
    };
    let loader = Loader::new(root, options)?;
    let hint = options.hint.unwrap_or_default();
    loader.state.lock().await.visited.insert(ROOT_ID.to_string());

    debug!(source = ?source, %hint, "Loading root document.");
    match source {
        Source::Url(url) => loader.load_url(url, hint, None).await?,
        Source::Stream(mut stream) => {
            let mut contents = String::new();
            stream
                .read_to_string(&mut contents)
                .await
                .map_err(|source| Error::Io {
                    path: "<stream>".to_string(),
                    source,
                })?;
            let contents = contents.trim();
            let schema = parse::parse(contents, Format::sniff(contents), ROOT_ID)?;
            loader
                .process(ROOT_ID.to_string(), loader.root.clone(), hint, schema)
                .await?;
        }
        Source::Value(schema) => {
            if !schema.is_object() {
                return Err(Error::InvalidInput(
                    "expected a document object".to_string(),
                ));
            }
            loader
                .process(ROOT_ID.to_string(), loader.root.clone(), hint, schema)
                .await?;
        }
    }

    let mut documents = loader.state.into_inner().documents;
    rewrite_local_refs(&mut documents);
    let discriminators = discriminator::collect(&documents);
    debug!(documents = documents.len(), "Loaded documents.");
    Ok(Loaded {
        documents,
        discriminators,
    })
}

#[derive(Default)]
struct LoadState {
    documents: DocumentMap,
    visited: HashSet<String>,
}

/// A document discovered through a `$ref`, waiting to be scheduled.
struct PendingLoad {
    id: String,
    url: Url,
    hint: ConstructKind,
}

struct Loader<'a> {
    /// Root URL; `None` for in-memory roots without a base.
    root: Option<Url>,
    options: &'a LoadOptions,
    request: FetchRequest,
    state: Mutex<LoadState>,
}

impl<'a> Loader<'a> {
    fn new(root: Option<Url>, options: &'a LoadOptions) -> Result<Self> {
        let method = match &options.http_method {
            Some(method) => Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .map_err(|_| Error::Config(format!("invalid HTTP method \"{method}\"")))?,
            None => Method::GET,
        };
        Ok(Self {
            root,
            options,
            request: FetchRequest {
                method,
                headers: request_headers(options),
            },
            state: Mutex::new(LoadState::default()),
        })
    }

    /// Identifier of `url`: `"."` for the root, a root-relative path for
    /// documents on the same origin or disk, the absolute URL otherwise.
    fn document_id(&self, url: &Url) -> String {
        let Some(root) = &self.root else {
            return url.to_string();
        };
        if url == root {
            return ROOT_ID.to_string();
        }
        let same_origin = root.scheme().starts_with("http")
            && url.scheme().starts_with("http")
            && root.origin() == url.origin();
        let same_disk = root.scheme() == "file" && url.scheme() == "file";
        if same_origin || same_disk {
            if let Some(relative) = root.make_relative(url) {
                return relative;
            }
        }
        url.to_string()
    }

    fn load_url(
        &self,
        url: Url,
        hint: ConstructKind,
        referrer: Option<String>,
    ) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let id = self.document_id(&url);
            debug!(%id, %url, %hint, "Loading document.");
            let schema = self.read_url(&url, &id, referrer.as_deref()).await?;
            self.process(id, Some(url), hint, schema).await
        })
    }

    async fn read_url(&self, url: &Url, id: &str, referrer: Option<&str>) -> Result<Value> {
        let by_extension = Format::from_path(url.path());
        match url.scheme() {
            "http" | "https" => {
                let response = self.options.fetch.fetch(url, &self.request).await?;
                if !response.is_success() {
                    return Err(Error::HttpStatus {
                        url: url.to_string(),
                        status: response.status,
                    });
                }
                let format = by_extension
                    .or_else(|| {
                        response
                            .header("content-type")
                            .and_then(Format::from_content_type)
                    })
                    .unwrap_or_else(|| Format::sniff(response.text()));
                parse::parse(response.text(), format, id)
            }
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| Error::InvalidInput(url.to_string()))?;
                let contents = match tokio::fs::read_to_string(&path).await {
                    Ok(contents) => contents,
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                        return Err(match referrer {
                            Some(document) => Error::UnresolvableRef {
                                reference: id.to_string(),
                                document: document.to_string(),
                            },
                            None => Error::NotFound(path.display().to_string()),
                        });
                    }
                    Err(source) => {
                        return Err(Error::Io {
                            path: path.display().to_string(),
                            source,
                        });
                    }
                };
                let format = by_extension.unwrap_or_else(|| Format::sniff(&contents));
                parse::parse(&contents, format, id)
            }
            scheme => Err(Error::UnsupportedScheme {
                scheme: scheme.to_string(),
                url: url.to_string(),
            }),
        }
    }

    /// Rewrite the document's cross-document pointers, store it, then load
    /// whatever it references that nobody has scheduled yet.
    async fn process(
        &self,
        id: String,
        base: Option<Url>,
        hint: ConstructKind,
        mut schema: Value,
    ) -> Result<()> {
        if hint == ConstructKind::OpenApi3 {
            if let Some(Value::Object(components)) = schema.get_mut("components") {
                components.shift_remove("examples");
            }
        }
        let pending = self.rewrite_remote_refs(&id, base.as_ref(), hint, &mut schema)?;

        let loads = {
            let mut state = self.state.lock().await;
            state.documents.insert(id.clone(), Document { hint, schema });
            let mut loads = Vec::new();
            for next in pending {
                if state.visited.insert(next.id.clone()) {
                    loads.push(next);
                }
            }
            loads
        };
        if loads.is_empty() {
            return Ok(());
        }

        try_join_all(
            loads
                .into_iter()
                .map(|next| self.load_url(next.url, next.hint, Some(id.clone()))),
        )
        .await?;
        Ok(())
    }

    /// Walk one document: drop pointers into vendor extensions, rewrite every
    /// cross-document pointer to `<target id>#<fragment>` and collect the
    /// targets.
    fn rewrite_remote_refs(
        &self,
        id: &str,
        base: Option<&Url>,
        hint: ConstructKind,
        schema: &mut Value,
    ) -> Result<Vec<PendingLoad>> {
        let mut pending = Vec::new();
        walk::<Error, _>(schema, |node, path| {
            prune_extension_refs(node);
            let Some(pointer) = node.get("$ref").and_then(Value::as_str) else {
                return Ok(());
            };
            let reference = parse_ref(pointer);
            if reference.is_local() {
                return Ok(());
            }
            if reference.touches_extension() {
                node.shift_remove("$ref");
                return Ok(());
            }
            let fragment = pointer
                .split_once('#')
                .map(|(_, fragment)| fragment.to_string())
                .unwrap_or_default();
            let mut hint_path = path.to_vec();
            hint_path.extend(reference.path.iter().cloned());
            let next_hint = resolve_hint(&hint_path, Some(hint));

            let url = self.resolve_ref(base, &reference.document, id)?;
            let next_id = self.document_id(&url);
            node.insert(
                "$ref".to_string(),
                Value::String(format!("{next_id}#{fragment}")),
            );
            pending.push(PendingLoad {
                id: next_id,
                url,
                hint: next_hint,
            });
            Ok(())
        })?;
        Ok(pending)
    }

    /// Resolve the document part of a pointer found in document `id`.
    fn resolve_ref(&self, base: Option<&Url>, document: &str, id: &str) -> Result<Url> {
        let url = match base {
            Some(base) => base.join(document).map_err(|_| Error::UnresolvableRef {
                reference: document.to_string(),
                document: id.to_string(),
            })?,
            None => {
                if let Some(rest) = document.strip_prefix("//") {
                    parse_url(&format!("https://{rest}"))?
                } else if Path::new(document).is_absolute() {
                    Url::from_file_path(document)
                        .map_err(|()| Error::VirtualRelativeRef(document.to_string()))?
                } else {
                    Url::parse(document)
                        .map_err(|_| Error::VirtualRelativeRef(document.to_string()))?
                }
            }
        };
        match url.scheme() {
            "http" | "https" | "file" => Ok(url),
            scheme => Err(Error::UnsupportedScheme {
                scheme: scheme.to_string(),
                url: url.to_string(),
            }),
        }
    }
}

/// Drop `allOf`/`anyOf`/`oneOf` entries that point into vendor extensions.
fn prune_extension_refs(node: &mut Map<String, Value>) {
    for key in ["allOf", "anyOf", "oneOf"] {
        if let Some(Value::Array(items)) = node.get_mut(key) {
            items.retain(|item| {
                !item
                    .get("$ref")
                    .and_then(Value::as_str)
                    .is_some_and(|pointer| parse_ref(pointer).touches_extension())
            });
        }
    }
}

/// Rewrite every remaining pointer into a canonical index path. Pointers
/// without a document part are local to the document they appear in.
fn rewrite_local_refs(documents: &mut DocumentMap) {
    for (id, document) in documents.iter_mut() {
        let _ = walk::<Infallible, _>(&mut document.schema, |node, _| {
            let Some(pointer) = node.get("$ref").and_then(Value::as_str) else {
                return Ok(());
            };
            if !pointer.contains('#') {
                return Ok(());
            }
            let reference = parse_ref(pointer);
            let target = if reference.is_local() {
                id.as_str()
            } else {
                reference.document.as_str()
            };
            let index = canonical_index(target, &reference.path);
            node.insert("$ref".to_string(), Value::String(index));
            Ok(())
        });
    }
    debug!(documents = documents.len(), "Rewrote references to index paths.");
}

/// Default and user-supplied request headers. Headers that cannot be encoded
/// are skipped with a warning.
fn request_headers(options: &LoadOptions) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    if let Some(auth) = &options.auth {
        match HeaderValue::from_str(auth) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(err) => warn!(error = %err, "Skipping invalid Authorization header."),
        }
    }
    for (name, value) in &options.http_headers {
        let text = match value {
            Value::String(s) => s.clone(),
            other => match serde_json::to_string(other) {
                Ok(text) => text,
                Err(err) => {
                    warn!(header = %name, error = %err, "Cannot encode HTTP header, skipping it.");
                    continue;
                }
            },
        };
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| err.to_string())
            .and_then(|name| {
                HeaderValue::from_str(&text)
                    .map(|value| (name, value))
                    .map_err(|err| err.to_string())
            });
        match header {
            Ok((name, value)) => {
                headers.insert(name, value);
            }
            Err(err) => warn!(header = %name, error = %err, "Cannot encode HTTP header, skipping it."),
        }
    }
    headers
}
