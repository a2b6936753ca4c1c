//! Fields: a keyword, a default, and a bound transformer.
//!
//! A [`Field`] adapts one [`Transform`] to one file-level keyword
//! (e.g. `DIMENSION`) and re-wraps codec failures with a context frame
//! naming the field, so errors read outward-in:
//! `IntegerField(DIMENSION): invalid integer '4x': ...`.
//!
//! The constructors reproduce the standard TSPLIB field catalog; custom
//! dialects can build their own fields from any transformer.

use crate::bisep::BiSep;
use crate::container::{ContainerConfig, ListTransform, MapTransform};
use crate::error::CodecError;
use crate::tours::ToursTransform;
use crate::transform::{FuncTransform, NumberTransform, Transform, UnionTransform};
use crate::value::Value;

/// A field's default: absent, a literal, or a per-request factory.
///
/// Container defaults are always factories so that no two requests can
/// observe a shared instance.
pub enum DefaultValue {
    /// No default; an unset field reads as absent.
    None,
    /// A literal scalar, cloned per request.
    Literal(Value),
    /// A zero-argument factory invoked fresh on every request.
    Factory(fn() -> Value),
}

impl DefaultValue {
    /// Materialize the default, if any.
    pub fn get(&self) -> Option<Value> {
        match self {
            Self::None => None,
            Self::Literal(value) => Some(value.clone()),
            Self::Factory(factory) => Some(factory()),
        }
    }
}

/// One keyword-addressed entry of a problem schema.
pub struct Field {
    keyword: String,
    label: &'static str,
    default: DefaultValue,
    transform: Box<dyn Transform>,
}

impl Field {
    /// Build a field from its parts.
    pub fn new(
        keyword: impl Into<String>,
        label: &'static str,
        default: DefaultValue,
        transform: Box<dyn Transform>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            label,
            default,
            transform,
        }
    }

    /// The unique file-level keyword.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The field kind name used in error context frames.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// A fresh default value, if the field has one.
    pub fn default_value(&self) -> Option<Value> {
        self.default.get()
    }

    /// Parse section text, adding a field-identifying context frame on
    /// failure.
    pub fn parse(&self, text: &str) -> Result<Value, CodecError> {
        self.transform
            .parse(text)
            .map_err(|e| e.amend(self.context()))
    }

    /// Render a value, adding a field-identifying context frame on
    /// failure.
    pub fn render(&self, value: &Value) -> Result<String, CodecError> {
        self.transform
            .render(value)
            .map_err(|e| e.amend(self.context()))
    }

    /// Validate a value against the field's structural rules.
    pub fn validate(&self, value: &Value) -> Result<(), CodecError> {
        self.transform
            .validate(value)
            .map_err(|e| e.amend(self.context()))
    }

    fn context(&self) -> String {
        format!("{}({})", self.label, self.keyword)
    }

    // ── Standard field catalog ──────────────────────────────────

    /// Free-form text, no default.
    pub fn string(keyword: impl Into<String>) -> Self {
        Self::new(
            keyword,
            "StringField",
            DefaultValue::None,
            Box::new(FuncTransform::text()),
        )
    }

    /// Integer scalar, defaulting to `0`.
    pub fn integer(keyword: impl Into<String>) -> Self {
        Self::new(
            keyword,
            "IntegerField",
            DefaultValue::Literal(Value::Int(0)),
            Box::new(FuncTransform::int()),
        )
    }

    /// Float scalar, defaulting to `0.0`.
    pub fn float(keyword: impl Into<String>) -> Self {
        Self::new(
            keyword,
            "FloatField",
            DefaultValue::Literal(Value::Float(0.0)),
            Box::new(FuncTransform::float()),
        )
    }

    /// Integer-or-float scalar, defaulting to `0`.
    pub fn number(keyword: impl Into<String>) -> Self {
        Self::new(
            keyword,
            "NumberField",
            DefaultValue::Literal(Value::Int(0)),
            Box::new(NumberTransform),
        )
    }

    /// Coordinates listed by integer node index, one node per line.
    ///
    /// `dimensions` optionally restricts the coordinate dimensionality;
    /// every coordinate must share one of the allowed dimensionalities.
    /// The check runs during validation, not parsing.
    pub fn indexed_coordinates(
        keyword: impl Into<String>,
        dimensions: Option<Vec<usize>>,
    ) -> Self {
        Self::new(
            keyword,
            "IndexedCoordinatesField",
            DefaultValue::Factory(Value::empty_map),
            Box::new(IndexedCoordinates {
                inner: coordinates_transform(),
                dimensions,
            }),
        )
    }

    /// Adjacency lists: each item is a node followed by its neighbours,
    /// every sub-list closed by `-1`.
    pub fn adjacency_list(keyword: impl Into<String>) -> Self {
        Self::new(
            keyword,
            "AdjacencyListField",
            DefaultValue::Factory(Value::empty_map),
            Box::new(adjacency_list_transform()),
        )
    }

    /// A `-1`-terminated list of node pairs, one edge per line.
    pub fn edge_list(keyword: impl Into<String>) -> Self {
        Self::new(
            keyword,
            "EdgeListField",
            DefaultValue::Factory(Value::empty_list),
            Box::new(edge_list_transform()),
        )
    }

    /// A newline-separated sequence of number rows (explicit weights).
    pub fn matrix(keyword: impl Into<String>) -> Self {
        let row = ListTransform::new(Box::new(NumberTransform), ContainerConfig::default());
        Self::new(
            keyword,
            "MatrixField",
            DefaultValue::Factory(Value::empty_list),
            Box::new(ListTransform::new(
                Box::new(row),
                ContainerConfig {
                    sep: BiSep::symmetric("\n"),
                    ..Default::default()
                },
            )),
        )
    }

    /// Edge data in either adjacency-list or edge-list form.
    pub fn edge_data(keyword: impl Into<String>) -> Self {
        Self::new(
            keyword,
            "EdgeDataField",
            DefaultValue::Factory(Value::empty_map),
            Box::new(UnionTransform::new(vec![
                Box::new(adjacency_list_transform()),
                Box::new(edge_list_transform()),
            ])),
        )
    }

    /// A `-1`-terminated list of depot nodes.
    pub fn depots(keyword: impl Into<String>) -> Self {
        Self::new(
            keyword,
            "DepotsField",
            DefaultValue::Factory(Value::empty_list),
            Box::new(ListTransform::new(
                Box::new(FuncTransform::int()),
                ContainerConfig {
                    terminal: Some("-1".into()),
                    ..Default::default()
                },
            )),
        )
    }

    /// A `-1`-terminated node → demand map, one node per line.
    pub fn demands(keyword: impl Into<String>) -> Self {
        Self::new(
            keyword,
            "DemandsField",
            DefaultValue::Factory(Value::empty_map),
            Box::new(MapTransform::new(
                Box::new(FuncTransform::int()),
                Box::new(FuncTransform::int()),
                BiSep::whitespace(),
                ContainerConfig {
                    sep: BiSep::symmetric("\n"),
                    terminal: Some("-1".into()),
                    ..Default::default()
                },
            )),
        )
    }

    /// The tour section (see [`ToursTransform`]).
    pub fn tours(keyword: impl Into<String>) -> Self {
        Self::new(
            keyword,
            "ToursField",
            DefaultValue::Factory(Value::empty_list),
            Box::new(ToursTransform::new()),
        )
    }
}

fn coordinates_transform() -> MapTransform {
    MapTransform::new(
        Box::new(FuncTransform::int()),
        Box::new(ListTransform::new(
            Box::new(NumberTransform),
            ContainerConfig::default(),
        )),
        BiSep::whitespace(),
        ContainerConfig {
            sep: BiSep::symmetric("\n"),
            ..Default::default()
        },
    )
}

fn adjacency_list_transform() -> MapTransform {
    MapTransform::new(
        Box::new(FuncTransform::int()),
        Box::new(ListTransform::new(
            Box::new(FuncTransform::int()),
            ContainerConfig::default(),
        )),
        BiSep::whitespace(),
        ContainerConfig {
            sep: BiSep::literal("-1", " -1\n"),
            terminal: Some("-1".into()),
            ..Default::default()
        },
    )
}

fn edge_list_transform() -> ListTransform {
    let edge = ListTransform::new(
        Box::new(FuncTransform::int()),
        ContainerConfig {
            size: Some(2),
            ..Default::default()
        },
    );
    ListTransform::new(
        Box::new(edge),
        ContainerConfig {
            sep: BiSep::symmetric("\n"),
            terminal: Some("-1".into()),
            ..Default::default()
        },
    )
}

/// Indexed coordinates with an optional dimensionality constraint.
struct IndexedCoordinates {
    inner: MapTransform,
    dimensions: Option<Vec<usize>>,
}

impl Transform for IndexedCoordinates {
    fn parse(&self, text: &str) -> Result<Value, CodecError> {
        self.inner.parse(text)
    }

    fn render(&self, value: &Value) -> Result<String, CodecError> {
        self.inner.render(value)
    }

    fn validate(&self, value: &Value) -> Result<(), CodecError> {
        self.inner.validate(value)?;
        let map = value.as_map().ok_or_else(|| {
            CodecError::validation(format!("expected a map, got a {}", value.type_name()))
        })?;
        let mut seen: Option<usize> = None;
        for coord in map.values() {
            let len = coord.as_list().map(<[Value]>::len).unwrap_or(0);
            match seen {
                None => seen = Some(len),
                Some(prev) if prev != len => {
                    return Err(CodecError::validation(
                        "all coordinates must have the same dimensionality".to_owned(),
                    ))
                }
                Some(_) => {}
            }
        }
        if let (Some(len), Some(allowed)) = (seen, &self.dimensions) {
            if !allowed.contains(&len) {
                return Err(CodecError::validation(format!(
                    "coordinates must have one of the dimensionalities {allowed:?}, found {len}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::MapKey;
    use proptest::prelude::*;

    #[test]
    fn parse_failure_names_the_field() {
        let field = Field::integer("DIMENSION");
        let err = field.parse("4x").unwrap_err();
        assert_eq!(err.frames(), ["IntegerField(DIMENSION)"]);
        assert!(err.detail().contains("4x"));
    }

    #[test]
    fn factory_defaults_are_fresh_per_request() {
        let field = Field::depots("DEPOT_SECTION");
        let mut first = field.default_value().unwrap();
        if let Value::List(items) = &mut first {
            items.push(Value::Int(99));
        }
        // a second request must not observe the first one's mutation
        assert_eq!(field.default_value().unwrap(), Value::empty_list());
        assert_eq!(Field::string("NAME").default_value(), None);
        assert_eq!(
            Field::integer("CAPACITY").default_value(),
            Some(Value::Int(0))
        );
    }

    #[test]
    fn adjacency_list_round_trips_canonical_text() {
        let field = Field::adjacency_list("EDGE_DATA_SECTION");
        let text = "0 1 2 3 -1\n1 0 2 3 -1\n2 0 1 3 -1\n3 0 1 2 -1\n-1";
        let value = field.parse(text).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(
            map[&MapKey::Int(2)],
            Value::List(vec![Value::Int(0), Value::Int(1), Value::Int(3)])
        );
        assert_eq!(field.render(&value).unwrap(), text);
    }

    #[test]
    fn edge_data_union_prefers_adjacency_lists() {
        let field = Field::edge_data("EDGE_DATA_SECTION");
        let adj = field.parse("1 2 3 -1\n4 5 -1\n-1").unwrap();
        let map = adj.as_map().unwrap();
        assert_eq!(
            map[&MapKey::Int(1)],
            Value::List(vec![Value::Int(2), Value::Int(3)])
        );
        // edge-list text is also readable as one adjacency entry; the
        // first alternative wins, exactly like the union contract says
        let edges = field.parse("1 2\n2 3\n-1").unwrap();
        assert!(edges.as_map().is_some());
    }

    #[test]
    fn edge_data_union_failure_mentions_both_alternatives() {
        let field = Field::edge_data("EDGE_DATA_SECTION");
        let err = field.parse("1 2 x\n-1").unwrap_err();
        assert_eq!(err.frames(), ["EdgeDataField(EDGE_DATA_SECTION)"]);
        assert!(err.detail().contains("no alternative"));
    }

    #[test]
    fn coordinates_validate_dimensionality() {
        let field = Field::indexed_coordinates("NODE_COORD_SECTION", Some(vec![2, 3]));
        let ok = field.parse("1 1.0 2.0\n2 3.0 4.0").unwrap();
        field.validate(&ok).unwrap();

        let mixed = field.parse("1 1.0 2.0\n2 3.0 4.0 5.0").unwrap();
        let err = field.validate(&mixed).unwrap_err();
        assert!(err.is_validation());

        let field1 = Field::indexed_coordinates("DISPLAY_DATA_SECTION", Some(vec![2]));
        let wrong = field1.parse("1 1.0 2.0 3.0\n2 4.0 5.0 6.0").unwrap();
        assert!(field1.validate(&wrong).is_err());
    }

    #[test]
    fn matrix_field_parses_rows() {
        let field = Field::matrix("EDGE_WEIGHT_SECTION");
        let value = field.parse("0 3 4\n3 0 5\n4 5 0").unwrap();
        let rows = value.as_list().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1],
            Value::List(vec![Value::Int(3), Value::Int(0), Value::Int(5)])
        );
    }

    #[test]
    fn demands_and_depots_round_trip() {
        let demands = Field::demands("DEMAND_SECTION");
        let text = "1 0\n2 19\n3 21\n-1";
        let value = demands.parse(text).unwrap();
        assert_eq!(demands.render(&value).unwrap(), text);

        let depots = Field::depots("DEPOT_SECTION");
        let value = depots.parse("1\n-1").unwrap();
        assert_eq!(value, Value::List(vec![Value::Int(1)]));
        assert_eq!(depots.render(&value).unwrap(), "1 -1");
    }

    proptest! {
        #[test]
        fn depot_values_round_trip(depot_ids in proptest::collection::vec(0i64..10_000, 0..40)) {
            let field = Field::depots("DEPOT_SECTION");
            let value = Value::List(depot_ids.iter().copied().map(Value::Int).collect());
            let rendered = field.render(&value).unwrap();
            prop_assert_eq!(field.parse(&rendered).unwrap(), value);
        }

        #[test]
        fn tour_values_round_trip(
            tours in proptest::collection::vec(
                proptest::collection::vec(0i64..10_000, 1..20),
                0..8,
            )
        ) {
            let field = Field::tours("TOUR_SECTION");
            let value = Value::List(
                tours
                    .iter()
                    .map(|t| Value::List(t.iter().copied().map(Value::Int).collect()))
                    .collect(),
            );
            let rendered = field.render(&value).unwrap();
            prop_assert_eq!(field.parse(&rendered).unwrap(), value);
        }
    }
}
