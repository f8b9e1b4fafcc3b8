//! Category tree: the in-memory catalog, its builder, and the expected-hierarchy template.

pub mod builder;
pub mod node;
pub mod template;

pub use builder::{find_record_file, CatalogBuilder, MixedCategoryPolicy};
pub use node::{Catalog, CategoryNode, LeafEntry, LeafRecords};
pub use template::{HierarchyTemplate, TemplateNode};
