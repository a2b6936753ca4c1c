//! Text/value codec framework for the TSPLIB95 file format.
//!
//! This is the leaf crate of the workspace. It defines the structured
//! [`CodecError`] type, the [`Value`] model, the [`BiSep`] separator,
//! the transformer hierarchy, and the [`Field`]/[`Schema`] registry that
//! the problem engine drives. Nothing here knows about whole documents
//! or edge weights; it is purely section text ⇄ value.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bisep;
pub mod container;
pub mod error;
pub mod field;
pub mod schema;
pub mod tours;
pub mod transform;
pub mod value;

pub use bisep::{BiSep, SplitRule};
pub use container::{ContainerConfig, ListTransform, MapTransform};
pub use error::{CodecError, ErrorKind};
pub use field::{DefaultValue, Field};
pub use schema::{FieldDecl, Schema, SchemaBuilder};
pub use tours::ToursTransform;
pub use transform::{FuncTransform, NumberTransform, Transform, UnionTransform};
pub use value::{MapKey, Value};
