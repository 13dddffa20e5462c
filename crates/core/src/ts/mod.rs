//! TypeScript output model.
//!
//! - `types`: type nodes (TsType, TsProp, TsLiteral)
//! - `emit`: node to text via the `Emit` trait
//! - `utils`: key quoting, escaping and type constructors

mod emit;
mod types;
pub mod utils;

pub use emit::{Emit, doc_comment};
pub use types::{PropKey, TsLiteral, TsPrimitive, TsProp, TsType};
