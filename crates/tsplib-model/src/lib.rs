//! Problem engine for the TSPLIB95 file format.
//!
//! Ties the codec, matrix, and distance layers together: a [`Problem`]
//! is parsed from whole-document text against a [`Schema`]
//! (the standard one or a caller-derived dialect), renders back to
//! canonical text, and answers node, edge, and weight queries through
//! one resolved weight source.
//!
//! [`Schema`]: tsplib_core::Schema

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod problem;
pub mod standard;

mod split;

pub use error::ProblemError;
pub use problem::{EdgeData, Problem, SpecialFn};
pub use standard::standard_schema;
