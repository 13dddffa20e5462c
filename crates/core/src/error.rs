//! Error kinds surfaced by loading and generation.
//!
//! Every error is fatal to a synthesis run: the loader aborts on the first one
//! and hands it back to the caller, which decides how to report it.

use std::path::PathBuf;

/// Errors produced while loading documents or generating types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document could not be parsed as YAML.
    #[error("YAML: failed to parse {id}: {message}")]
    Yaml {
        /// Identifier of the document.
        id: String,
        /// Parser message.
        message: String,
    },

    /// A document could not be parsed as JSON.
    #[error("JSON: failed to parse {id}: {message}")]
    Json {
        /// Identifier of the document.
        id: String,
        /// Parser message.
        message: String,
    },

    /// A `$ref` whose target document cannot be located.
    #[error("Can't resolve \"{reference}\" from {document}")]
    UnresolvableRef {
        /// The unresolved pointer or its document part.
        reference: String,
        /// Document the pointer appears in.
        document: String,
    },

    /// A reference to a scheme other than http(s) or file.
    #[error("Unsupported URL scheme \"{scheme}\" in {url}")]
    UnsupportedScheme {
        /// The offending scheme.
        scheme: String,
        /// The full URL.
        url: String,
    },

    /// The root input is neither a locator, a stream nor a parsed document.
    #[error("Invalid schema: {0}")]
    InvalidInput(String),

    /// A directory was given where a document file was expected.
    #[error("{} is a directory not a file", .0.display())]
    IsDirectory(PathBuf),

    /// A local path that does not exist.
    #[error("Could not locate {0}")]
    NotFound(String),

    /// A relative reference inside an in-memory root document.
    #[error(
        "Can't resolve \"{0}\" from dynamic JSON. Load this schema from a URL instead."
    )]
    VirtualRelativeRef(String),

    /// Reading a local document or stream failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the document, `<stream>` for streams.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request for a remote document failed.
    #[error("Failed to fetch {url}: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// A remote document answered with a non-success status.
    #[error("Failed to fetch {url}: HTTP {status}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// Invalid generator configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
