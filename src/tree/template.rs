//! Expected category hierarchy, as configured or seeded on first run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One level of the expected hierarchy.
///
/// In configuration files a table is a [`TemplateNode::Branch`] and an array of names is
/// the last interior level, [`TemplateNode::Leaves`]:
///
/// ```toml
/// [catalog.template.Alimentos]
/// Lacteos = ["Enteros", "Descremados"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateNode {
    Leaves(Vec<String>),
    Branch(BTreeMap<String, TemplateNode>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HierarchyTemplate {
    pub categories: BTreeMap<String, TemplateNode>,
}

impl HierarchyTemplate {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Hierarchy created when the catalog directory is missing or empty.
    pub fn seed() -> Self {
        fn leaves(names: &[&str]) -> TemplateNode {
            TemplateNode::Leaves(names.iter().map(|n| n.to_string()).collect())
        }
        fn branch(entries: Vec<(&str, TemplateNode)>) -> TemplateNode {
            TemplateNode::Branch(
                entries
                    .into_iter()
                    .map(|(name, node)| (name.to_string(), node))
                    .collect(),
            )
        }

        let mut categories = BTreeMap::new();
        categories.insert(
            "Alimentos".to_string(),
            branch(vec![
                ("Lacteos", leaves(&["Enteros", "Descremados"])),
                ("Cereales", leaves(&["Avena", "Maiz"])),
            ]),
        );
        categories.insert(
            "Bebidas".to_string(),
            branch(vec![
                ("Jugos", leaves(&["Naturales", "Artificiales"])),
                ("Gaseosas", leaves(&["Regular", "Zero"])),
            ]),
        );
        HierarchyTemplate { categories }
    }

    /// Number of leaf categories the template describes.
    pub fn leaf_count(&self) -> usize {
        fn count(nodes: &BTreeMap<String, TemplateNode>) -> usize {
            nodes
                .values()
                .map(|node| match node {
                    TemplateNode::Leaves(names) => names.len(),
                    TemplateNode::Branch(next) => count(next),
                })
                .sum()
        }
        count(&self.categories)
    }
}
