//! The transformer contract and leaf codecs.
//!
//! A [`Transform`] is a pure, stateless codec between section text and a
//! [`Value`]. Containers compose child transformers through `dyn Transform`
//! trait objects; the concrete shape of the parsed value is fixed by the
//! transformer, not the caller.

use crate::error::CodecError;
use crate::value::Value;

/// A pure text ⇄ value codec.
///
/// Implementations must be deterministic functions of their
/// construction-time configuration; `parse` and `render` never mutate.
pub trait Transform: Send + Sync {
    /// Parse section text into a value.
    fn parse(&self, text: &str) -> Result<Value, CodecError>;

    /// Render a value back into canonical section text.
    fn render(&self, value: &Value) -> Result<String, CodecError>;

    /// Check a parsed value for structural problems.
    ///
    /// The default accepts everything.
    fn validate(&self, _value: &Value) -> Result<(), CodecError> {
        Ok(())
    }
}

/// Render a scalar value in its canonical text form.
///
/// Floats always carry a decimal point so that a rendered document
/// parses back to the same value kinds.
pub(crate) fn render_scalar(value: &Value) -> Result<String, CodecError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(x) => {
            if x.is_finite() && x.fract() == 0.0 {
                Ok(format!("{x:.1}"))
            } else {
                Ok(format!("{x}"))
            }
        }
        other => Err(CodecError::rendering(format!(
            "cannot render a {} as a scalar",
            other.type_name()
        ))),
    }
}

/// The scalar parse functions a [`FuncTransform`] can wrap.
pub type ScalarFn = fn(&str) -> Result<Value, String>;

/// Wraps a single scalar-parsing function.
///
/// Any failure from the function is wrapped into a parsing error that
/// keeps the original message as the innermost detail.
pub struct FuncTransform {
    name: &'static str,
    func: ScalarFn,
}

impl FuncTransform {
    /// A transformer around an arbitrary scalar function.
    pub fn new(name: &'static str, func: ScalarFn) -> Self {
        Self { name, func }
    }

    /// Integer scalars.
    pub fn int() -> Self {
        Self::new("integer", |text| {
            text.trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| format!("invalid integer '{}': {e}", text.trim()))
        })
    }

    /// Floating-point scalars.
    pub fn float() -> Self {
        Self::new("float", |text| {
            text.trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| format!("invalid float '{}': {e}", text.trim()))
        })
    }

    /// Free-form text scalars (the identity parse).
    pub fn text() -> Self {
        Self::new("text", |text| Ok(Value::Text(text.to_owned())))
    }

    /// The name of the wrapped scalar kind.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Transform for FuncTransform {
    fn parse(&self, text: &str) -> Result<Value, CodecError> {
        (self.func)(text).map_err(CodecError::parsing)
    }

    fn render(&self, value: &Value) -> Result<String, CodecError> {
        render_scalar(value)
    }
}

/// Integer-first numeric scalars.
///
/// Tries integer parsing, then float parsing; fails only if both fail.
pub struct NumberTransform;

impl Transform for NumberTransform {
    fn parse(&self, text: &str) -> Result<Value, CodecError> {
        let trimmed = text.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Ok(Value::Int(i));
        }
        trimmed
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| CodecError::parsing(format!("invalid number '{trimmed}'")))
    }

    fn render(&self, value: &Value) -> Result<String, CodecError> {
        render_scalar(value)
    }
}

/// An ordered list of alternative transformers.
///
/// `parse` and `render` try each alternative in order and return the
/// first success; total failure aggregates every alternative's message.
pub struct UnionTransform {
    alternatives: Vec<Box<dyn Transform>>,
}

impl UnionTransform {
    /// Build a union over the given alternatives, tried in order.
    pub fn new(alternatives: Vec<Box<dyn Transform>>) -> Self {
        Self { alternatives }
    }
}

impl Transform for UnionTransform {
    fn parse(&self, text: &str) -> Result<Value, CodecError> {
        let mut failures = Vec::with_capacity(self.alternatives.len());
        for alt in &self.alternatives {
            match alt.parse(text) {
                Ok(value) => return Ok(value),
                Err(e) => failures.push(e.to_string()),
            }
        }
        Err(CodecError::parsing(format!(
            "no alternative could parse the text: {}",
            failures.join("; ")
        )))
    }

    fn render(&self, value: &Value) -> Result<String, CodecError> {
        let mut failures = Vec::with_capacity(self.alternatives.len());
        for alt in &self.alternatives {
            match alt.render(value) {
                Ok(text) => return Ok(text),
                Err(e) => failures.push(e.to_string()),
            }
        }
        Err(CodecError::rendering(format!(
            "no alternative could render the value: {}",
            failures.join("; ")
        )))
    }
}
