//! Compact addressing of explicit TSPLIB weight matrices.
//!
//! An explicit weight section is a flat number sequence; the declared
//! `EDGE_WEIGHT_FORMAT` decides which cells of the logical `N×N` matrix
//! those numbers populate and in what order. Half-matrix layouts store
//! one triangle of a symmetric matrix, with or without its diagonal, in
//! row-major or column-major order; the triangular number `T(k) = k(k+1)/2`
//! drives all of the offset arithmetic.
//!
//! A column-major enumeration of one triangle visits cells in the same
//! order as a row-major enumeration of the mirrored triangle, so the four
//! column variants reuse the row formulas with swapped coordinates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::error::Error;
use std::fmt;

/// Errors from matrix construction or cell queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// A queried cell lies outside `[min_index, min_index + size)`.
    ///
    /// This is a programming/query error, distinct from any parse error:
    /// out-of-range indices never wrap or clamp.
    OutOfBounds {
        /// Queried row index (before min-index shifting).
        i: i64,
        /// Queried column index (before min-index shifting).
        j: i64,
        /// Smallest valid index.
        min_index: i64,
        /// Logical matrix size.
        size: usize,
    },
    /// An `EDGE_WEIGHT_FORMAT` keyword names no known layout.
    UnknownLayout {
        /// The offending keyword.
        keyword: String,
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                i,
                j,
                min_index,
                size,
            } => write!(
                f,
                "({i}, {j}) is out of bounds for [{min_index}, {})",
                min_index + *size as i64
            ),
            Self::UnknownLayout { keyword } => {
                write!(f, "unknown edge weight format '{keyword}'")
            }
        }
    }
}

impl Error for MatrixError {}

/// Storage layout of an explicit weight section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixLayout {
    /// Every cell, row-major.
    Full,
    /// Upper triangle without the diagonal, row-major.
    UpperRow,
    /// Lower triangle without the diagonal, row-major.
    LowerRow,
    /// Upper triangle including the diagonal, row-major.
    UpperDiagRow,
    /// Lower triangle including the diagonal, row-major.
    LowerDiagRow,
    /// Upper triangle without the diagonal, column-major.
    UpperCol,
    /// Lower triangle without the diagonal, column-major.
    LowerCol,
    /// Upper triangle including the diagonal, column-major.
    UpperDiagCol,
    /// Lower triangle including the diagonal, column-major.
    LowerDiagCol,
}

impl MatrixLayout {
    /// Resolve an `EDGE_WEIGHT_FORMAT` keyword.
    pub fn from_keyword(keyword: &str) -> Result<Self, MatrixError> {
        match keyword {
            "FULL_MATRIX" => Ok(Self::Full),
            "UPPER_ROW" => Ok(Self::UpperRow),
            "LOWER_ROW" => Ok(Self::LowerRow),
            "UPPER_DIAG_ROW" => Ok(Self::UpperDiagRow),
            "LOWER_DIAG_ROW" => Ok(Self::LowerDiagRow),
            "UPPER_COL" => Ok(Self::UpperCol),
            "LOWER_COL" => Ok(Self::LowerCol),
            "UPPER_DIAG_COL" => Ok(Self::UpperDiagCol),
            "LOWER_DIAG_COL" => Ok(Self::LowerDiagCol),
            _ => Err(MatrixError::UnknownLayout {
                keyword: keyword.to_owned(),
            }),
        }
    }

    /// The `EDGE_WEIGHT_FORMAT` keyword for this layout.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Full => "FULL_MATRIX",
            Self::UpperRow => "UPPER_ROW",
            Self::LowerRow => "LOWER_ROW",
            Self::UpperDiagRow => "UPPER_DIAG_ROW",
            Self::LowerDiagRow => "LOWER_DIAG_ROW",
            Self::UpperCol => "UPPER_COL",
            Self::LowerCol => "LOWER_COL",
            Self::UpperDiagCol => "UPPER_DIAG_COL",
            Self::LowerDiagCol => "LOWER_DIAG_COL",
        }
    }

    /// Number of stored cells for a matrix of logical size `n`.
    pub fn cell_count(&self, n: usize) -> usize {
        match self {
            Self::Full => n * n,
            Self::UpperDiagRow | Self::LowerDiagRow | Self::UpperDiagCol | Self::LowerDiagCol => {
                tri(n)
            }
            Self::UpperRow | Self::LowerRow | Self::UpperCol | Self::LowerCol => {
                tri(n.saturating_sub(1))
            }
        }
    }
}

/// Triangular number `T(k) = k(k+1)/2`.
fn tri(k: usize) -> usize {
    k * (k + 1) / 2
}

/// Row-major offset into an upper triangle with diagonal of side `n`.
fn upper_diag_offset(n: usize, i: usize, j: usize) -> usize {
    let (i, j) = if i > j { (j, i) } else { (i, j) };
    tri(n) - tri(n - i) + (j - i)
}

/// Row-major offset into a lower triangle with diagonal.
fn lower_diag_offset(i: usize, j: usize) -> usize {
    let (i, j) = if i < j { (j, i) } else { (i, j) };
    tri(i) + j
}

/// Row-major offset into an upper triangle without diagonal, or `None`
/// for a diagonal cell.
fn upper_offset(n: usize, i: usize, j: usize) -> Option<usize> {
    if i == j {
        return None;
    }
    let (i, j) = if i > j { (j, i) } else { (i, j) };
    Some(upper_diag_offset(n - 1, i, j - 1))
}

/// Row-major offset into a lower triangle without diagonal, or `None`
/// for a diagonal cell.
fn lower_offset(i: usize, j: usize) -> Option<usize> {
    if i == j {
        return None;
    }
    let (i, j) = if i < j { (j, i) } else { (i, j) };
    Some(lower_diag_offset(i - 1, j))
}

/// A size- and offset-aware view over a flat weight sequence.
///
/// Indices are node indices: `value_at` shifts both coordinates by
/// `min_index` before bounds checking, so 1-based TSPLIB instances query
/// naturally. Half-matrix layouts answer symmetric reads; diagonal cells
/// of the no-diagonal layouts read as `0` without touching storage.
#[derive(Clone, Debug)]
pub struct Matrix {
    numbers: Vec<f64>,
    size: usize,
    min_index: i64,
    layout: MatrixLayout,
}

impl Matrix {
    /// Wrap a flat number sequence.
    ///
    /// The sequence length is not validated against `size` here; whether
    /// the declared dimension matches the section length is a separate,
    /// optional concern of the caller.
    pub fn new(numbers: Vec<f64>, size: usize, min_index: i64, layout: MatrixLayout) -> Self {
        Self {
            numbers,
            size,
            min_index,
            layout,
        }
    }

    /// Logical size `N` of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Smallest valid node index.
    pub fn min_index(&self) -> i64 {
        self.min_index
    }

    /// The storage layout.
    pub fn layout(&self) -> MatrixLayout {
        self.layout
    }

    /// The weight of edge `(i, j)`.
    pub fn value_at(&self, i: i64, j: i64) -> Result<f64, MatrixError> {
        let out_of_bounds = || MatrixError::OutOfBounds {
            i,
            j,
            min_index: self.min_index,
            size: self.size,
        };
        let shift = |v: i64| -> Result<usize, MatrixError> {
            let v = v - self.min_index;
            if v < 0 || v >= self.size as i64 {
                Err(out_of_bounds())
            } else {
                Ok(v as usize)
            }
        };
        let (i, j) = (shift(i)?, shift(j)?);
        let n = self.size;

        let offset = match self.layout {
            MatrixLayout::Full => Some(i * n + j),
            MatrixLayout::UpperDiagRow | MatrixLayout::LowerDiagCol => {
                Some(upper_diag_offset(n, i, j))
            }
            MatrixLayout::LowerDiagRow | MatrixLayout::UpperDiagCol => {
                Some(lower_diag_offset(i, j))
            }
            MatrixLayout::UpperRow | MatrixLayout::LowerCol => upper_offset(n, i, j),
            MatrixLayout::LowerRow | MatrixLayout::UpperCol => lower_offset(i, j),
        };
        match offset {
            None => Ok(0.0),
            Some(offset) => self.numbers.get(offset).copied().ok_or_else(out_of_bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix(count: usize, size: usize, layout: MatrixLayout) -> Matrix {
        let numbers = (1..=count).map(|v| v as f64).collect();
        Matrix::new(numbers, size, 0, layout)
    }

    fn check(m: &Matrix, cells: &[(i64, i64, f64)]) {
        for &(i, j, want) in cells {
            assert_eq!(m.value_at(i, j).unwrap(), want, "({i}, {j})");
        }
    }

    // 1 2 3
    // 4 5 6
    // 7 8 9
    #[test]
    fn full_matrix() {
        let m = matrix(9, 3, MatrixLayout::Full);
        check(
            &m,
            &[
                (0, 0, 1.0),
                (0, 2, 3.0),
                (1, 1, 5.0),
                (1, 2, 6.0),
                (2, 0, 7.0),
                (2, 2, 9.0),
            ],
        );
    }

    // 1 2 3
    //   4 5
    //     6
    #[test]
    fn upper_diag_row() {
        let m = matrix(6, 3, MatrixLayout::UpperDiagRow);
        check(
            &m,
            &[
                (0, 0, 1.0),
                (0, 2, 3.0),
                (1, 1, 4.0),
                (1, 2, 5.0),
                (2, 0, 3.0), // symmetric read
                (2, 2, 6.0),
            ],
        );
    }

    // 1
    // 2 3
    // 4 5 6
    #[test]
    fn lower_diag_row() {
        let m = matrix(6, 3, MatrixLayout::LowerDiagRow);
        check(
            &m,
            &[
                (0, 0, 1.0),
                (0, 2, 4.0),
                (1, 1, 3.0),
                (1, 2, 5.0),
                (2, 0, 4.0),
                (2, 2, 6.0),
            ],
        );
    }

    // _ 1 2 3
    //   _ 4 5
    //     _ 6
    //       _
    #[test]
    fn upper_row() {
        let m = matrix(6, 4, MatrixLayout::UpperRow);
        check(
            &m,
            &[
                (0, 0, 0.0),
                (0, 3, 3.0),
                (1, 1, 0.0),
                (1, 2, 4.0),
                (1, 3, 5.0),
                (3, 0, 3.0),
                (2, 3, 6.0),
                (3, 3, 0.0),
            ],
        );
    }

    // _
    // 1 _
    // 2 3 _
    // 4 5 6 _
    #[test]
    fn lower_row() {
        let m = matrix(6, 4, MatrixLayout::LowerRow);
        check(
            &m,
            &[
                (0, 0, 0.0),
                (0, 3, 4.0),
                (1, 1, 0.0),
                (1, 2, 3.0),
                (1, 3, 5.0),
                (3, 0, 4.0),
                (2, 3, 6.0),
                (3, 3, 0.0),
            ],
        );
    }

    // _ 1 2 4
    //   _ 3 5
    //     _ 6
    //       _
    #[test]
    fn upper_col() {
        let m = matrix(6, 4, MatrixLayout::UpperCol);
        check(
            &m,
            &[
                (0, 0, 0.0),
                (0, 3, 4.0),
                (1, 1, 0.0),
                (1, 2, 3.0),
                (1, 3, 5.0),
                (3, 0, 4.0),
                (2, 3, 6.0),
                (3, 3, 0.0),
            ],
        );
    }

    // _
    // 1 _
    // 2 4 _
    // 3 5 6 _
    #[test]
    fn lower_col() {
        let m = matrix(6, 4, MatrixLayout::LowerCol);
        check(
            &m,
            &[
                (0, 0, 0.0),
                (0, 3, 3.0),
                (1, 1, 0.0),
                (1, 2, 4.0),
                (1, 3, 5.0),
                (3, 0, 3.0),
                (2, 3, 6.0),
                (3, 3, 0.0),
            ],
        );
    }

    // 1 2 4
    //   3 5
    //     6
    #[test]
    fn upper_diag_col() {
        let m = matrix(6, 3, MatrixLayout::UpperDiagCol);
        check(
            &m,
            &[
                (0, 0, 1.0),
                (0, 2, 4.0),
                (1, 1, 3.0),
                (1, 2, 5.0),
                (2, 0, 4.0),
                (2, 2, 6.0),
            ],
        );
    }

    // 1
    // 2 4
    // 3 5 6
    #[test]
    fn lower_diag_col() {
        let m = matrix(6, 3, MatrixLayout::LowerDiagCol);
        check(
            &m,
            &[
                (0, 0, 1.0),
                (0, 2, 3.0),
                (1, 1, 4.0),
                (1, 2, 5.0),
                (2, 0, 3.0),
                (2, 2, 6.0),
            ],
        );
    }

    // ── Bounds and indexing ─────────────────────────────────────

    #[test]
    fn min_index_shifts_queries() {
        let m = Matrix::new(
            (1..=9).map(|v| v as f64).collect(),
            3,
            1,
            MatrixLayout::Full,
        );
        assert_eq!(m.value_at(1, 1).unwrap(), 1.0);
        assert_eq!(m.value_at(3, 3).unwrap(), 9.0);
        assert!(matches!(
            m.value_at(0, 1),
            Err(MatrixError::OutOfBounds { .. })
        ));
        assert!(matches!(
            m.value_at(1, 4),
            Err(MatrixError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn unknown_layout_keyword_is_an_error() {
        assert!(matches!(
            MatrixLayout::from_keyword("DIAGONAL_SOUP"),
            Err(MatrixError::UnknownLayout { .. })
        ));
        assert_eq!(
            MatrixLayout::from_keyword("LOWER_DIAG_ROW").unwrap(),
            MatrixLayout::LowerDiagRow
        );
    }

    #[test]
    fn cell_counts() {
        assert_eq!(MatrixLayout::Full.cell_count(4), 16);
        assert_eq!(MatrixLayout::UpperDiagRow.cell_count(4), 10);
        assert_eq!(MatrixLayout::UpperRow.cell_count(4), 6);
    }

    proptest! {
        // every half-matrix read is symmetric, and every in-bounds read
        // addresses a stored cell
        #[test]
        fn half_matrix_reads_are_symmetric(
            size in 1usize..12,
            seed_i in 0i64..12,
            seed_j in 0i64..12,
        ) {
            let i = seed_i % size as i64;
            let j = seed_j % size as i64;
            for layout in [
                MatrixLayout::UpperRow,
                MatrixLayout::LowerRow,
                MatrixLayout::UpperDiagRow,
                MatrixLayout::LowerDiagRow,
                MatrixLayout::UpperCol,
                MatrixLayout::LowerCol,
                MatrixLayout::UpperDiagCol,
                MatrixLayout::LowerDiagCol,
            ] {
                let count = layout.cell_count(size);
                let m = matrix(count, size, layout);
                prop_assert_eq!(m.value_at(i, j).unwrap(), m.value_at(j, i).unwrap());
            }
        }
    }
}
