// Copyright 2025 Cowboy AI, LLC.

//! The CSV mapping of a project

use crate::entity::ResourceId;
use crate::errors::DomainResult;
use crate::identifiers;
use crate::model::{CsvSource, Project, Table, TargetProperty};
use indexmap::IndexSet;
use oxrdf::NamedNode;

/// Namespace, sources and tables of one project
#[derive(Debug, Clone, PartialEq)]
pub struct CsvMapping {
    /// Mapping identifier
    pub id: ResourceId<CsvMapping>,
    /// Owning project
    pub project: ResourceId<Project>,
    /// Prefix bare property names are resolved against
    pub namespace: String,
    /// Uploaded sources
    pub sources: IndexSet<ResourceId<CsvSource>>,
    /// Tables built on the sources
    pub tables: IndexSet<ResourceId<Table>>,
}

impl CsvMapping {
    /// Create the mapping of a project; the namespace defaults to `{project}/`
    pub fn new(project: &ResourceId<Project>) -> Self {
        Self {
            id: identifiers::csv_mapping(project),
            project: project.clone(),
            namespace: format!("{project}/"),
            sources: IndexSet::new(),
            tables: IndexSet::new(),
        }
    }

    /// Override the namespace prefix
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Resolve a target property against this mapping's namespace
    pub fn resolve(&self, property: &TargetProperty) -> DomainResult<NamedNode> {
        property.resolve(&self.namespace)
    }

    /// Link a source; returns `false` if it was already linked
    pub fn add_source(&mut self, source: ResourceId<CsvSource>) -> bool {
        self.sources.insert(source)
    }

    /// Retract a source link, keeping the order of the others
    pub fn remove_source(&mut self, source: &ResourceId<CsvSource>) -> bool {
        self.sources.shift_remove(source)
    }

    /// Link a table; returns `false` if it was already linked
    pub fn add_table(&mut self, table: ResourceId<Table>) -> bool {
        self.tables.insert(table)
    }

    /// Retract a table link, keeping the order of the others
    pub fn remove_table(&mut self, table: &ResourceId<Table>) -> bool {
        self.tables.shift_remove(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace_is_project_prefix() {
        let project = ResourceId::<Project>::new("http://example.com/cube-project/ubd").unwrap();
        let mapping = CsvMapping::new(&project);

        assert_eq!(mapping.id.as_str(), "http://example.com/cube-project/ubd/csv-mapping");
        assert_eq!(
            mapping.resolve(&TargetProperty::name("year")).unwrap().as_str(),
            "http://example.com/cube-project/ubd/year"
        );
    }

    #[test]
    fn test_table_links_keep_order() {
        let project = ResourceId::<Project>::new("http://example.com/p").unwrap();
        let mut mapping = CsvMapping::new(&project);
        let a: ResourceId<Table> = mapping.id.child("table-a");
        let b: ResourceId<Table> = mapping.id.child("table-b");
        let c: ResourceId<Table> = mapping.id.child("table-c");

        assert!(mapping.add_table(a.clone()));
        assert!(mapping.add_table(b.clone()));
        assert!(mapping.add_table(c.clone()));
        assert!(!mapping.add_table(a.clone()));
        assert!(mapping.remove_table(&b));

        assert_eq!(mapping.tables.iter().cloned().collect::<Vec<_>>(), vec![a, c]);
    }
}
