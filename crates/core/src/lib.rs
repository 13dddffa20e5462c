#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! OpenAPI to TypeScript type generation.
//!
//! Loading ([`load`]) discovers every document reachable from a root through
//! `$ref` pointers and rewrites those pointers into canonical index paths.
//! The transformers ([`transform`]) turn the loaded documents into TypeScript
//! type expressions, and [`generate`] assembles them into one declaration file.

mod error;
pub mod generate;
pub mod hint;
pub mod load;
pub mod reference;
pub mod transform;
pub mod ts;
pub mod walk;

pub use error::{Error, Result};
pub use generate::{GenerateOptions, generate, generate_from_documents};
pub use hint::{ConstructKind, resolve_hint};
pub use load::{
    Discriminator, DiscriminatorRegistry, Document, DocumentMap, LoadOptions, Loaded, Source,
    load, resolve_locator,
};
pub use load::fetch::{Fetch, FetchRequest, FetchResponse, ReqwestFetch};
pub use transform::{GlobalContext, TransformOptions};

/// Document identifier of the root document in a [`DocumentMap`].
pub const ROOT_ID: &str = ".";
