//! Dynamic value model shared by all transformers.
//!
//! TSPLIB sections hold scalars, lists, and index-keyed maps in arbitrary
//! nesting. [`Value`] is the common currency that lets the transformer
//! hierarchy stay object-safe: every codec parses into and renders out of
//! this one enum.

use indexmap::IndexMap;
use std::fmt;

/// A parsed TSPLIB value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Free-form text (name, comment, type keywords).
    Text(String),
    /// An integer scalar.
    Int(i64),
    /// A floating-point scalar.
    Float(f64),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// An insertion-ordered map keyed by node index or text.
    Map(IndexMap<MapKey, Value>),
}

/// The hashable subset of [`Value`] usable as a map key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// An integer key (node index).
    Int(i64),
    /// A text key.
    Text(String),
}

impl Value {
    /// An empty list value.
    pub fn empty_list() -> Self {
        Self::List(Vec::new())
    }

    /// An empty map value.
    pub fn empty_map() -> Self {
        Self::Map(IndexMap::new())
    }

    /// The integer payload, if this is an [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric payload widened to `f64` for [`Value::Int`] and [`Value::Float`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// The text payload, if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The list payload, if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The map payload, if this is a [`Value::Map`].
    pub fn as_map(&self) -> Option<&IndexMap<MapKey, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short human-readable name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl MapKey {
    /// The integer payload, if this is a [`MapKey::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// View the key as a [`Value`] for rendering.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(i) => Value::Int(*i),
            Self::Text(s) => Value::Text(s.clone()),
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<i64> for MapKey {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for MapKey {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}
