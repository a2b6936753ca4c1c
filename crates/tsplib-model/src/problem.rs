//! The problem engine: whole-document parse/render and weight queries.
//!
//! A [`Problem`] holds a schema, a sparse name→value map (only fields
//! that were parsed or explicitly set occupy a slot; everything else
//! reads as its field default), and a resolved weight source. The weight
//! source is fixed at construction and rebuilt only when a value or the
//! special callback is reassigned.
//!
//! Weight resolution order: explicit matrix, then special callback
//! (missing callback fails at construction), then the formula named by
//! the weight type, then uniform weight `1`.

use crate::error::ProblemError;
use crate::split::split_document;
use crate::standard::standard_schema;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tsplib_core::{Schema, Value};
use tsplib_distance::{Coord, WeightKind};
use tsplib_matrix::{Matrix, MatrixLayout};

/// A caller-supplied distance callback over two coordinates.
pub type SpecialFn = Arc<dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync>;

/// Parsed edge data, in whichever of its two shapes the section used.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeData {
    /// Node → neighbour lists.
    Adjacency(IndexMap<i64, Vec<i64>>),
    /// A plain list of node pairs.
    Edges(Vec<(i64, i64)>),
}

/// The resolved source of edge weights.
#[derive(Clone)]
enum WeightSource {
    Explicit(Matrix),
    Special(SpecialFn),
    Formula(WeightKind),
    Uniform,
}

/// One parsed (or hand-built) problem instance.
#[derive(Clone)]
pub struct Problem {
    schema: Arc<Schema>,
    values: IndexMap<String, Value>,
    special: Option<SpecialFn>,
    weights: WeightSource,
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("values", &self.values)
            .field("special", &self.special.is_some())
            .finish_non_exhaustive()
    }
}

impl Problem {
    /// Parse a document against the standard schema.
    pub fn parse(text: &str) -> Result<Self, ProblemError> {
        Self::parse_with(standard_schema(), text, None)
    }

    /// Parse a document that declares `SPECIAL` edge weights.
    pub fn parse_special(text: &str, special: SpecialFn) -> Result<Self, ProblemError> {
        Self::parse_with(standard_schema(), text, Some(special))
    }

    /// Parse a document against a custom schema.
    pub fn parse_with(
        schema: Arc<Schema>,
        text: &str,
        special: Option<SpecialFn>,
    ) -> Result<Self, ProblemError> {
        let sections = split_document(text, |head| schema.field_by_keyword(head).is_some());
        let mut values = IndexMap::new();
        for (keyword, body) in sections {
            // split_document only opens sections on known keywords
            if let (Some(field), Some(name)) = (
                schema.field_by_keyword(keyword),
                schema.name_for_keyword(keyword),
            ) {
                values.insert(name.to_owned(), field.parse(body.trim())?);
            }
        }
        Self::from_values(schema, values, special)
    }

    /// Build a problem directly from a name→value map.
    ///
    /// Values supplied here are authoritative: they occupy the same slots
    /// a parse would fill, so a caller layering values over a parse
    /// result should assign them afterwards with [`Problem::set_value`],
    /// which always wins over the parsed value.
    pub fn from_values(
        schema: Arc<Schema>,
        values: IndexMap<String, Value>,
        special: Option<SpecialFn>,
    ) -> Result<Self, ProblemError> {
        for name in values.keys() {
            if schema.field(name).is_none() {
                return Err(ProblemError::UnknownField { name: name.clone() });
            }
        }
        let mut problem = Self {
            schema,
            values,
            special,
            weights: WeightSource::Uniform,
        };
        problem.weights = problem.resolve_weights()?;
        Ok(problem)
    }

    /// The schema this problem was built against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The current value of a field: the set value, else the default.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.values
            .get(name)
            .cloned()
            .or_else(|| self.schema.field(name)?.default_value())
    }

    /// Whether a field was parsed or explicitly set (defaults excluded).
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Assign a field value, overwriting any parsed value under the same
    /// name, and re-resolve the weight source.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), ProblemError> {
        if self.schema.field(name).is_none() {
            return Err(ProblemError::UnknownField {
                name: name.to_owned(),
            });
        }
        self.values.insert(name.to_owned(), value);
        self.weights = self.resolve_weights()?;
        Ok(())
    }

    /// Replace the special distance callback and re-resolve the weight
    /// source.
    ///
    /// Has no effect on the weights of a problem with explicit edge
    /// weights; the matrix keeps precedence.
    pub fn set_special(&mut self, special: Option<SpecialFn>) -> Result<(), ProblemError> {
        self.special = special;
        self.weights = self.resolve_weights()?;
        Ok(())
    }

    /// Validate every set value against its field's structural rules.
    pub fn validate(&self) -> Result<(), ProblemError> {
        for (name, value) in &self.values {
            if let Some(field) = self.schema.field(name) {
                field.validate(value)?;
            }
        }
        Ok(())
    }

    /// Render the problem back to document text.
    ///
    /// Every set field renders as `KEYWORD: text` (single-line values) or
    /// `KEYWORD:` followed by the body (multi-line values), in schema
    /// declaration order, closed by a final `EOF` line.
    pub fn render(&self) -> Result<String, ProblemError> {
        let mut lines = Vec::with_capacity(self.values.len() + 1);
        for (name, field) in self.schema.fields_by_name() {
            if let Some(value) = self.values.get(name) {
                let text = field.render(value)?;
                if text.contains('\n') {
                    lines.push(format!("{}:\n{}", field.keyword(), text));
                } else {
                    lines.push(format!("{}: {}", field.keyword(), text));
                }
            }
        }
        lines.push("EOF".to_owned());
        Ok(lines.join("\n"))
    }

    // ── Typed accessors ─────────────────────────────────────────

    /// `NAME`.
    pub fn name(&self) -> Option<String> {
        self.text_value("name")
    }

    /// `COMMENT`.
    pub fn comment(&self) -> Option<String> {
        self.text_value("comment")
    }

    /// `TYPE` (e.g. `TSP`, `ATSP`, `CVRP`, `TOUR`).
    pub fn problem_type(&self) -> Option<String> {
        self.text_value("type")
    }

    /// `DIMENSION`, defaulting to `0`.
    pub fn dimension(&self) -> i64 {
        self.value("dimension").and_then(|v| v.as_int()).unwrap_or(0)
    }

    /// `CAPACITY`, defaulting to `0`.
    pub fn capacity(&self) -> i64 {
        self.value("capacity").and_then(|v| v.as_int()).unwrap_or(0)
    }

    /// `NODE_COORD_TYPE`.
    pub fn node_coord_type(&self) -> Option<String> {
        self.text_value("node_coord_type")
    }

    /// `EDGE_WEIGHT_TYPE`.
    pub fn edge_weight_type(&self) -> Option<String> {
        self.text_value("edge_weight_type")
    }

    /// `EDGE_WEIGHT_FORMAT`.
    pub fn edge_weight_format(&self) -> Option<String> {
        self.text_value("edge_weight_format")
    }

    /// `EDGE_DATA_FORMAT`.
    pub fn edge_data_format(&self) -> Option<String> {
        self.text_value("edge_data_format")
    }

    /// `DISPLAY_DATA_TYPE`.
    pub fn display_data_type(&self) -> Option<String> {
        self.text_value("display_data_type")
    }

    /// `NODE_COORD_SECTION` as node → coordinate.
    pub fn node_coords(&self) -> IndexMap<i64, Coord> {
        self.coord_map("node_coords")
    }

    /// `DISPLAY_DATA_SECTION` as node → coordinate.
    pub fn display_data(&self) -> IndexMap<i64, Coord> {
        self.coord_map("display_data")
    }

    /// `EDGE_DATA_SECTION` in whichever shape the section used.
    pub fn edge_data(&self) -> EdgeData {
        match self.value("edge_data") {
            Some(Value::List(items)) => EdgeData::Edges(
                items
                    .iter()
                    .filter_map(|pair| {
                        let pair = pair.as_list()?;
                        Some((pair.first()?.as_int()?, pair.get(1)?.as_int()?))
                    })
                    .collect(),
            ),
            Some(Value::Map(map)) => EdgeData::Adjacency(
                map.iter()
                    .filter_map(|(k, v)| {
                        let ends = v.as_list()?.iter().filter_map(Value::as_int).collect();
                        Some((k.as_int()?, ends))
                    })
                    .collect(),
            ),
            _ => EdgeData::Adjacency(IndexMap::new()),
        }
    }

    /// `EDGE_WEIGHT_SECTION`, flattened row by row.
    pub fn edge_weights(&self) -> Vec<f64> {
        match self.value("edge_weights") {
            Some(Value::List(rows)) => rows
                .iter()
                .filter_map(Value::as_list)
                .flatten()
                .filter_map(Value::as_f64)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// `FIXED_EDGES_SECTION` as node pairs.
    pub fn fixed_edges(&self) -> Vec<(i64, i64)> {
        match self.value("fixed_edges") {
            Some(Value::List(items)) => items
                .iter()
                .filter_map(|pair| {
                    let pair = pair.as_list()?;
                    Some((pair.first()?.as_int()?, pair.get(1)?.as_int()?))
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// `DEPOT_SECTION` as a node list.
    pub fn depots(&self) -> Vec<i64> {
        match self.value("depots") {
            Some(Value::List(items)) => items.iter().filter_map(Value::as_int).collect(),
            _ => Vec::new(),
        }
    }

    /// `DEMAND_SECTION` as node → demand.
    pub fn demands(&self) -> IndexMap<i64, i64> {
        match self.value("demands") {
            Some(Value::Map(map)) => map
                .iter()
                .filter_map(|(k, v)| Some((k.as_int()?, v.as_int()?)))
                .collect(),
            _ => IndexMap::new(),
        }
    }

    /// `TOUR_SECTION` as a list of tours.
    pub fn tours(&self) -> Vec<Vec<i64>> {
        match self.value("tours") {
            Some(Value::List(tours)) => tours
                .iter()
                .filter_map(|tour| {
                    Some(tour.as_list()?.iter().filter_map(Value::as_int).collect())
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    // ── Predicates ──────────────────────────────────────────────

    /// Whether the problem supplies its edge weights explicitly.
    pub fn is_explicit(&self) -> bool {
        self.edge_weight_type().as_deref() == Some("EXPLICIT")
    }

    /// Whether the explicit weights use the full-matrix layout.
    pub fn is_full_matrix(&self) -> bool {
        self.edge_weight_format().as_deref() == Some("FULL_MATRIX")
    }

    /// Whether the problem has weighted edges at all.
    pub fn is_weighted(&self) -> bool {
        self.edge_weight_format().is_some_and(|s| !s.is_empty())
            || self.edge_weight_type().is_some_and(|s| !s.is_empty())
    }

    /// Whether the problem requires a caller-supplied distance callback.
    pub fn is_special(&self) -> bool {
        self.edge_weight_type().as_deref() == Some("SPECIAL")
    }

    /// Whether the problem describes a complete graph (no edge data).
    pub fn is_complete(&self) -> bool {
        !self.edge_data_format().is_some_and(|s| !s.is_empty())
    }

    /// Whether the problem can be treated as symmetric.
    pub fn is_symmetric(&self) -> bool {
        !self.is_full_matrix() && !self.is_special()
    }

    /// Whether the problem carries enough data to be drawn.
    pub fn is_depictable(&self) -> bool {
        if !self.display_data().is_empty() {
            return true;
        }
        if self.display_data_type().as_deref() == Some("NO_DISPLAY") {
            return false;
        }
        !self.node_coords().is_empty()
    }

    // ── Graph queries ───────────────────────────────────────────

    /// The node set: coordinates, else display data, else edge data,
    /// else `0..dimension`.
    pub fn nodes(&self) -> Result<Vec<i64>, ProblemError> {
        let coords = self.node_coords();
        if !coords.is_empty() {
            return Ok(coords.keys().copied().collect());
        }
        let display = self.display_data();
        if !display.is_empty() {
            return Ok(display.keys().copied().collect());
        }
        if self.is_set("edge_data") {
            let mut nodes = BTreeSet::new();
            match self.edge_data() {
                EdgeData::Edges(pairs) => {
                    for (a, b) in pairs {
                        nodes.insert(a);
                        nodes.insert(b);
                    }
                }
                EdgeData::Adjacency(adj) => {
                    for (a, ends) in adj {
                        nodes.insert(a);
                        nodes.extend(ends);
                    }
                }
            }
            if !nodes.is_empty() {
                return Ok(nodes.into_iter().collect());
            }
        }
        if self.schema.field("dimension").is_some() {
            return Ok((0..self.dimension()).collect());
        }
        Err(ProblemError::UndefinedNodes)
    }

    /// The edge set: edge data when present, else the complete product
    /// of the node set.
    pub fn edges(&self) -> Result<Vec<(i64, i64)>, ProblemError> {
        if self.is_set("edge_data") {
            return Ok(match self.edge_data() {
                EdgeData::Edges(pairs) => pairs,
                EdgeData::Adjacency(adj) => adj
                    .iter()
                    .flat_map(|(&a, ends)| ends.iter().map(move |&b| (a, b)))
                    .collect(),
            });
        }
        let nodes = self.nodes()?;
        Ok(nodes
            .iter()
            .flat_map(|&a| nodes.iter().map(move |&b| (a, b)))
            .collect())
    }

    /// The coordinate of a node, if it has one.
    pub fn coord(&self, node: i64) -> Option<Coord> {
        self.node_coords().get(&node).cloned()
    }

    /// The display position of a node: display data, falling back to its
    /// coordinate; `None` for undepictable problems.
    pub fn display(&self, node: i64) -> Option<Coord> {
        if !self.is_depictable() {
            return None;
        }
        self.display_data()
            .get(&node)
            .cloned()
            .or_else(|| self.coord(node))
    }

    /// The demand of a node, if one was declared.
    pub fn demand(&self, node: i64) -> Option<i64> {
        self.demands().get(&node).copied()
    }

    /// Whether a node is a depot.
    pub fn is_depot(&self, node: i64) -> bool {
        self.depots().contains(&node)
    }

    // ── Weights ─────────────────────────────────────────────────

    /// The weight of edge `(i, j)` under the resolved weight source.
    pub fn weight(&self, i: i64, j: i64) -> Result<f64, ProblemError> {
        match &self.weights {
            WeightSource::Explicit(matrix) => Ok(matrix.value_at(i, j)?),
            WeightSource::Special(func) => {
                let (a, b) = (self.coord_of(i)?, self.coord_of(j)?);
                Ok(func(&a, &b))
            }
            WeightSource::Formula(kind) => {
                let (a, b) = (self.coord_of(i)?, self.coord_of(j)?);
                Ok(kind.distance(&a, &b)?)
            }
            WeightSource::Uniform => Ok(1.0),
        }
    }

    /// Total weight of each tour, wrapping the last node back to the
    /// first.
    pub fn trace_tours(&self, tours: &[Vec<i64>]) -> Result<Vec<f64>, ProblemError> {
        let mut totals = Vec::with_capacity(tours.len());
        for tour in tours {
            let mut total = 0.0;
            for (k, &a) in tour.iter().enumerate() {
                let b = tour[(k + 1) % tour.len()];
                total += self.weight(a, b)?;
            }
            totals.push(total);
        }
        Ok(totals)
    }

    // ── Internals ───────────────────────────────────────────────

    fn resolve_weights(&self) -> Result<WeightSource, ProblemError> {
        if self.is_explicit() {
            let layout =
                MatrixLayout::from_keyword(&self.edge_weight_format().unwrap_or_default())?;
            let min_index = self.nodes()?.into_iter().min().unwrap_or(0);
            let size = self.dimension().max(0) as usize;
            let matrix = Matrix::new(self.edge_weights(), size, min_index, layout);
            return Ok(WeightSource::Explicit(matrix));
        }
        if self.is_special() {
            return self
                .special
                .clone()
                .map(WeightSource::Special)
                .ok_or(ProblemError::MissingSpecial);
        }
        if self.is_weighted() {
            let kind = WeightKind::from_keyword(&self.edge_weight_type().unwrap_or_default())?;
            return Ok(WeightSource::Formula(kind));
        }
        Ok(WeightSource::Uniform)
    }

    fn coord_of(&self, node: i64) -> Result<Coord, ProblemError> {
        self.coord(node)
            .ok_or(ProblemError::MissingCoordinates { node })
    }

    fn text_value(&self, name: &str) -> Option<String> {
        self.value(name).and_then(|v| match v {
            Value::Text(s) => Some(s),
            _ => None,
        })
    }

    fn coord_map(&self, name: &str) -> IndexMap<i64, Coord> {
        match self.value(name) {
            Some(Value::Map(map)) => map
                .iter()
                .filter_map(|(k, v)| {
                    let coord = v.as_list()?.iter().filter_map(Value::as_f64).collect();
                    Some((k.as_int()?, coord))
                })
                .collect(),
            _ => IndexMap::new(),
        }
    }
}
