//! Declarative field schemas with inheritance-style derivation.
//!
//! A [`Schema`] is four coupled, insertion-ordered maps over the same
//! field set: name→field, keyword→field, keyword→name, name→keyword.
//! It is built once by a [`SchemaBuilder`] from an ordered list of
//! declarations — most general first — and is immutable afterwards.
//!
//! Derivation replaces class inheritance: [`Schema::extend`] seeds a new
//! builder with an existing schema's declarations, after which a derived
//! schema may override a field or hide it entirely with
//! [`FieldDecl::Absent`].

use crate::field::Field;
use indexmap::IndexMap;
use std::sync::Arc;

/// One declaration slot: a field, or an explicit removal marker.
pub enum FieldDecl {
    /// Declare (or override) a field under this name.
    Field(Arc<Field>),
    /// Remove the name (and its keyword) declared by an earlier level.
    Absent,
}

/// Accumulates field declarations, most-general level first.
#[derive(Default)]
pub struct SchemaBuilder {
    entries: Vec<(String, FieldDecl)>,
}

impl SchemaBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field under `name`.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.entries
            .push((name.into(), FieldDecl::Field(Arc::new(field))));
        self
    }

    /// Declare `name` as absent, hiding any earlier declaration.
    pub fn absent(mut self, name: impl Into<String>) -> Self {
        self.entries.push((name.into(), FieldDecl::Absent));
        self
    }

    /// Resolve the declarations into an immutable [`Schema`].
    pub fn build(self) -> Schema {
        let mut fields_by_name: IndexMap<String, Arc<Field>> = IndexMap::new();
        for (name, decl) in self.entries {
            match decl {
                FieldDecl::Field(field) => {
                    // a re-declared name keeps its original position but
                    // takes the new field (and the new field's keyword)
                    fields_by_name.insert(name, field);
                }
                FieldDecl::Absent => {
                    fields_by_name.shift_remove(&name);
                }
            }
        }

        let mut fields_by_keyword = IndexMap::with_capacity(fields_by_name.len());
        let mut names_by_keyword = IndexMap::with_capacity(fields_by_name.len());
        let mut keywords_by_name = IndexMap::with_capacity(fields_by_name.len());
        for (name, field) in &fields_by_name {
            let keyword = field.keyword().to_owned();
            fields_by_keyword.insert(keyword.clone(), Arc::clone(field));
            names_by_keyword.insert(keyword.clone(), name.clone());
            keywords_by_name.insert(name.clone(), keyword);
        }

        Schema {
            fields_by_name,
            fields_by_keyword,
            names_by_keyword,
            keywords_by_name,
        }
    }
}

/// An immutable field registry for one problem dialect.
pub struct Schema {
    fields_by_name: IndexMap<String, Arc<Field>>,
    fields_by_keyword: IndexMap<String, Arc<Field>>,
    names_by_keyword: IndexMap<String, String>,
    keywords_by_name: IndexMap<String, String>,
}

impl Schema {
    /// Start building a schema from scratch.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Start a builder seeded with this schema's declarations.
    ///
    /// The derived schema sees this schema's fields first, in their
    /// declaration order, and may override or hide them.
    pub fn extend(&self) -> SchemaBuilder {
        SchemaBuilder {
            entries: self
                .fields_by_name
                .iter()
                .map(|(name, field)| (name.clone(), FieldDecl::Field(Arc::clone(field))))
                .collect(),
        }
    }

    /// All fields keyed by declaration name, in declaration order.
    pub fn fields_by_name(&self) -> &IndexMap<String, Arc<Field>> {
        &self.fields_by_name
    }

    /// All fields keyed by file keyword, in declaration order.
    pub fn fields_by_keyword(&self) -> &IndexMap<String, Arc<Field>> {
        &self.fields_by_keyword
    }

    /// Declaration name for a file keyword.
    pub fn name_for_keyword(&self, keyword: &str) -> Option<&str> {
        self.names_by_keyword.get(keyword).map(String::as_str)
    }

    /// File keyword for a declaration name.
    pub fn keyword_for_name(&self, name: &str) -> Option<&str> {
        self.keywords_by_name.get(name).map(String::as_str)
    }

    /// Look up a field by declaration name.
    pub fn field(&self, name: &str) -> Option<&Arc<Field>> {
        self.fields_by_name.get(name)
    }

    /// Look up a field by file keyword.
    pub fn field_by_keyword(&self, keyword: &str) -> Option<&Arc<Field>> {
        self.fields_by_keyword.get(keyword)
    }

    /// All known file keywords, in declaration order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.fields_by_keyword.keys().map(String::as_str)
    }

    /// Number of fields in the schema.
    pub fn len(&self) -> usize {
        self.fields_by_name.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields_by_name.is_empty()
    }
}
