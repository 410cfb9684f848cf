// Copyright 2025 Cowboy AI, LLC.

//! The closed set of resources a graph store holds

use crate::entity::StoredResource;
use crate::model::{
    ColumnMapping, CsvMapping, CsvSource, Dataset, DimensionMetadataCollection, Job, Project,
    Table,
};
use oxrdf::NamedNode;

macro_rules! stored_resources {
    ($($variant:ident),+ $(,)?) => {
        /// A typed resource as persisted in the graph store
        #[derive(Debug, Clone, PartialEq)]
        pub enum Resource {
            $(
                #[doc = concat!("A `", stringify!($variant), "` node")]
                $variant($variant),
            )+
        }

        impl Resource {
            /// IRI of the resource's node
            pub fn iri(&self) -> &NamedNode {
                match self {
                    $(Resource::$variant(inner) => inner.id.as_named_node(),)+
                }
            }

            /// Entity type name of the resource
            pub fn entity_type(&self) -> &'static str {
                match self {
                    $(Resource::$variant(_) => <$variant as StoredResource>::ENTITY_TYPE,)+
                }
            }
        }

        $(
            impl StoredResource for $variant {
                const ENTITY_TYPE: &'static str = stringify!($variant);

                fn id(&self) -> &crate::entity::ResourceId<Self> {
                    &self.id
                }

                fn into_resource(self) -> Resource {
                    Resource::$variant(self)
                }

                fn from_resource(resource: Resource) -> Option<Self> {
                    match resource {
                        Resource::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }

            impl From<$variant> for Resource {
                fn from(inner: $variant) -> Self {
                    Resource::$variant(inner)
                }
            }
        )+
    };
}

stored_resources!(
    Project,
    Dataset,
    CsvMapping,
    CsvSource,
    Table,
    ColumnMapping,
    DimensionMetadataCollection,
    Job,
);
