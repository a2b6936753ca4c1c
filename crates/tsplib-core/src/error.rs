//! Structured error type for the codec layer.
//!
//! A [`CodecError`] carries an ordered list of context frames in front of
//! the innermost failure detail. Each layer that catches and re-raises an
//! error pushes one frame via [`CodecError::amend`], so a caller sees the
//! full path (field → transformer → scalar) without losing the original
//! cause. Frames are plain data and can be inspected by tests.

use std::error::Error;
use std::fmt;

/// Classification of a codec failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Text could not be turned into a value.
    Parsing,
    /// A value could not be turned into text.
    Rendering,
    /// A value is structurally invalid.
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsing => write!(f, "parsing"),
            Self::Rendering => write!(f, "rendering"),
            Self::Validation => write!(f, "validation"),
        }
    }
}

/// Error raised by separators, transformers, fields, and schemas.
///
/// Displays as `frame1: frame2: ...: detail`, outermost context first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecError {
    kind: ErrorKind,
    frames: Vec<String>,
    detail: String,
}

impl CodecError {
    /// Create a parsing error with the given innermost detail.
    pub fn parsing(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parsing, detail)
    }

    /// Create a rendering error with the given innermost detail.
    pub fn rendering(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Rendering, detail)
    }

    /// Create a validation error with the given innermost detail.
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, detail)
    }

    fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            frames: Vec::new(),
            detail: detail.into(),
        }
    }

    /// Push a contextual frame in front of the existing message.
    ///
    /// The newest frame always displays outermost.
    pub fn amend(mut self, frame: impl Into<String>) -> Self {
        self.frames.insert(0, frame.into());
        self
    }

    /// The failure classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Context frames, outermost first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// The innermost failure detail.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Returns `true` for [`ErrorKind::Parsing`] errors.
    pub fn is_parsing(&self) -> bool {
        self.kind == ErrorKind::Parsing
    }

    /// Returns `true` for [`ErrorKind::Rendering`] errors.
    pub fn is_rendering(&self) -> bool {
        self.kind == ErrorKind::Rendering
    }

    /// Returns `true` for [`ErrorKind::Validation`] errors.
    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            write!(f, "{frame}: ")?;
        }
        write!(f, "{}", self.detail)
    }
}

impl Error for CodecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_frames() {
        let err = CodecError::parsing("bad token");
        assert_eq!(err.to_string(), "bad token");
    }

    #[test]
    fn amend_prepends_context() {
        let err = CodecError::parsing("bad token")
            .amend("item 3")
            .amend("IntegerField(DIMENSION)");
        assert_eq!(err.to_string(), "IntegerField(DIMENSION): item 3: bad token");
        assert_eq!(err.frames(), ["IntegerField(DIMENSION)", "item 3"]);
        assert_eq!(err.detail(), "bad token");
    }

    #[test]
    fn amend_preserves_kind() {
        let err = CodecError::validation("mixed dimensionality").amend("NODE_COORD_SECTION");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.is_validation());
    }
}
