// Copyright 2025 Cowboy AI, LLC.

//! Column mappings: the rules turning CSV columns into RDF properties

use crate::entity::ResourceId;
use crate::errors::DomainResult;
use crate::identifiers;
use crate::model::{CsvColumn, Table};
use oxrdf::{Literal, NamedNode};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt;

/// Characters of a property name that cannot appear verbatim in an IRI path
const PROPERTY_NAME: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// The property a column mapping produces triples for
///
/// Users either pick an IRI or type a bare name; names are resolved against
/// the namespace of the CSV mapping before they are compared with IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetProperty {
    /// An explicit property IRI
    Iri(NamedNode),
    /// A bare property name, relative to the mapping namespace
    Name(String),
}

impl TargetProperty {
    /// Create a bare-name target property
    pub fn name(name: impl Into<String>) -> Self {
        TargetProperty::Name(name.into())
    }

    /// Resolve into an IRI using the namespace of the owning CSV mapping
    ///
    /// Names are percent-encoded, so `Station ID` resolves to
    /// `{namespace}Station%20ID`. Only an invalid namespace fails.
    pub fn resolve(&self, namespace: &str) -> DomainResult<NamedNode> {
        match self {
            TargetProperty::Iri(iri) => Ok(iri.clone()),
            TargetProperty::Name(name) => {
                let name = utf8_percent_encode(name, PROPERTY_NAME);
                Ok(NamedNode::new(format!("{namespace}{name}"))?)
            }
        }
    }

    /// Label used when minting identifiers from this property
    pub fn label(&self) -> String {
        match self {
            TargetProperty::Iri(iri) => identifiers::local_name(iri),
            TargetProperty::Name(name) => name.clone(),
        }
    }
}

impl From<NamedNode> for TargetProperty {
    fn from(iri: NamedNode) -> Self {
        TargetProperty::Iri(iri)
    }
}

impl fmt::Display for TargetProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetProperty::Iri(iri) => write!(f, "{iri}"),
            TargetProperty::Name(name) => write!(f, "\"{name}\""),
        }
    }
}

/// Maps one source column to a literal (or IRI-templated) value
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralMapping {
    /// Column providing the value
    pub source_column: NamedNode,
    /// Datatype of produced literals
    pub datatype: Option<NamedNode>,
    /// Language tag of produced literals
    pub language: Option<String>,
    /// Value used when the cell is empty
    pub default_value: Option<Literal>,
}

/// A pair of columns joining a row to a row of the referenced table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierMapping {
    /// Column of the mapping's own source
    pub source_column: NamedNode,
    /// Column of the referenced table's source
    pub referenced_column: NamedNode,
}

/// Maps identifier columns to a link pointing at rows of another table
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMapping {
    /// Table whose rows are referenced
    pub referenced_table: ResourceId<Table>,
    /// Source ↔ referenced identifier column pairs
    pub identifier_mappings: Vec<IdentifierMapping>,
}

/// The two shapes of column mapping
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnMappingKind {
    /// Value of a single column
    Literal(LiteralMapping),
    /// Link to a row of another table
    Reference(ReferenceMapping),
}

/// A column mapping owned by exactly one table
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    /// Mapping identifier
    pub id: ResourceId<ColumnMapping>,
    /// Owning table
    pub table: ResourceId<Table>,
    /// Property produced by this mapping
    pub target_property: TargetProperty,
    /// Literal or reference specifics
    pub kind: ColumnMappingKind,
}

impl ColumnMapping {
    /// Default literal mapping of a column: the column name becomes the property name
    pub fn from_column(table: &ResourceId<Table>, column: &CsvColumn) -> Self {
        Self {
            id: identifiers::column_mapping(table, &column.name),
            table: table.clone(),
            target_property: TargetProperty::name(column.name.clone()),
            kind: ColumnMappingKind::Literal(LiteralMapping {
                source_column: column.id.clone(),
                datatype: None,
                language: None,
                default_value: None,
            }),
        }
    }

    /// Create a literal mapping
    pub fn literal(
        table: &ResourceId<Table>,
        column: &CsvColumn,
        target_property: TargetProperty,
        datatype: Option<NamedNode>,
        language: Option<String>,
        default_value: Option<Literal>,
    ) -> Self {
        Self {
            id: identifiers::column_mapping(table, &column.name),
            table: table.clone(),
            target_property,
            kind: ColumnMappingKind::Literal(LiteralMapping {
                source_column: column.id.clone(),
                datatype,
                language,
                default_value,
            }),
        }
    }

    /// Create a reference mapping
    pub fn reference(
        table: &ResourceId<Table>,
        target_property: TargetProperty,
        referenced_table: ResourceId<Table>,
        identifier_mappings: Vec<IdentifierMapping>,
    ) -> Self {
        Self {
            id: identifiers::column_mapping(table, &target_property.label()),
            table: table.clone(),
            target_property,
            kind: ColumnMappingKind::Reference(ReferenceMapping {
                referenced_table,
                identifier_mappings,
            }),
        }
    }

    /// Whether this mapping reads the given source column
    pub fn uses_column(&self, column: &NamedNode) -> bool {
        match &self.kind {
            ColumnMappingKind::Literal(literal) => &literal.source_column == column,
            ColumnMappingKind::Reference(reference) => reference
                .identifier_mappings
                .iter()
                .any(|pair| &pair.source_column == column),
        }
    }
}
