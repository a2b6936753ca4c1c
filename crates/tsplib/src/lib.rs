//! tsplib: a TSPLIB95 parser, renderer, and edge weight engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all tsplib sub-crates. For most users, adding `tsplib` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tsplib::prelude::*;
//!
//! let text = "\
//! NAME: square4
//! TYPE: TSP
//! DIMENSION: 4
//! EDGE_WEIGHT_TYPE: EUC_2D
//! NODE_COORD_SECTION:
//! 1 0 0
//! 2 3 0
//! 3 3 4
//! 4 0 4
//! EOF";
//!
//! let problem = Problem::parse(text).unwrap();
//! assert_eq!(problem.dimension(), 4);
//! assert_eq!(problem.weight(1, 3).unwrap(), 5.0);
//! assert_eq!(
//!     problem.trace_tours(&[vec![1, 2, 3, 4]]).unwrap(),
//!     vec![3.0 + 4.0 + 3.0 + 4.0]
//! );
//! assert_eq!(problem.render().unwrap(), text);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`codec`] | `tsplib-core` | Values, transformers, fields, schemas |
//! | [`matrix`] | `tsplib-matrix` | Explicit weight matrix addressing |
//! | [`distance`] | `tsplib-distance` | Distance formulas and weight types |
//! | [`model`] | `tsplib-model` | Whole-document parse/render and queries |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Codec layer: values, transformers, fields, and schemas (`tsplib-core`).
///
/// Build custom fields from [`codec::Transform`] implementations and custom
/// dialects with [`codec::SchemaBuilder`].
pub use tsplib_core as codec;

/// Explicit weight matrix addressing (`tsplib-matrix`).
///
/// [`matrix::Matrix`] answers `value_at(i, j)` over any of the nine
/// `EDGE_WEIGHT_FORMAT` layouts.
pub use tsplib_matrix as matrix;

/// Distance formulas and the weight type table (`tsplib-distance`).
///
/// Pure functions plus the closed [`distance::WeightKind`] enum over
/// `EDGE_WEIGHT_TYPE` keywords.
pub use tsplib_distance as distance;

/// The problem engine (`tsplib-model`).
///
/// [`model::Problem`] is the main entry point: parse, render, and query
/// nodes, edges, and weights.
pub use tsplib_model as model;

/// Common imports for typical tsplib usage.
///
/// ```rust
/// use tsplib::prelude::*;
/// ```
pub mod prelude {
    // Codec layer
    pub use tsplib_core::{CodecError, Field, Schema, SchemaBuilder, Value};

    // Matrix addressing
    pub use tsplib_matrix::{Matrix, MatrixError, MatrixLayout};

    // Distances
    pub use tsplib_distance::{Coord, DistanceError, WeightKind};

    // Problem engine
    pub use tsplib_model::{
        standard_schema, EdgeData, Problem, ProblemError, SpecialFn,
    };
}
