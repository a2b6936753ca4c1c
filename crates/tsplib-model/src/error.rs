//! Error type for the problem engine.
//!
//! Parse/render failures from the codec layer, addressing failures from
//! the matrix layer, and formula failures from the distance layer all
//! surface through one [`ProblemError`], alongside the engine's own
//! failure modes (a missing special callback, an unknown field name, an
//! undefined node set).

use std::error::Error;
use std::fmt;
use tsplib_core::CodecError;
use tsplib_distance::DistanceError;
use tsplib_matrix::MatrixError;

/// Errors from problem construction, rendering, or weight queries.
#[derive(Clone, Debug, PartialEq)]
pub enum ProblemError {
    /// A section failed to parse or render.
    Codec(CodecError),
    /// An explicit weight matrix rejected a construction or a query.
    Matrix(MatrixError),
    /// A distance formula failed or a weight-type keyword is unknown.
    Distance(DistanceError),
    /// The problem declares `SPECIAL` weights but no callback was given.
    ///
    /// Raised at construction time, never deferred to the first query.
    MissingSpecial,
    /// A value was assigned under a name the schema does not declare.
    UnknownField {
        /// The offending declaration name.
        name: String,
    },
    /// The node set cannot be derived from any field of the problem.
    UndefinedNodes,
    /// A formula weight was queried for a node with no coordinates.
    MissingCoordinates {
        /// The offending node index.
        node: i64,
    },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec(e) => write!(f, "{e}"),
            Self::Matrix(e) => write!(f, "{e}"),
            Self::Distance(e) => write!(f, "{e}"),
            Self::MissingSpecial => {
                write!(f, "problem requires a special weight function but none was supplied")
            }
            Self::UnknownField { name } => write!(f, "schema declares no field named '{name}'"),
            Self::UndefinedNodes => write!(f, "undefined nodes"),
            Self::MissingCoordinates { node } => {
                write!(f, "node {node} has no coordinates")
            }
        }
    }
}

impl Error for ProblemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Codec(e) => Some(e),
            Self::Matrix(e) => Some(e),
            Self::Distance(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for ProblemError {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

impl From<MatrixError> for ProblemError {
    fn from(e: MatrixError) -> Self {
        Self::Matrix(e)
    }
}

impl From<DistanceError> for ProblemError {
    fn from(e: DistanceError) -> Self {
        Self::Distance(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_expose_their_source() {
        let err = ProblemError::from(CodecError::parsing("bad token"));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "bad token");

        assert!(ProblemError::MissingSpecial.source().is_none());
        assert!(ProblemError::MissingSpecial
            .to_string()
            .contains("special weight function"));
    }
}
