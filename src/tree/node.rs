//! Category node types and the built catalog.

use crate::error::ApiError;
use crate::types::{fold_name, Item};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Records held by a leaf category, with the file they were read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafRecords {
    pub path: PathBuf,
    pub items: Vec<Item>,
}

/// Category tree node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CategoryNode {
    /// Subcategories by name.
    Interior(BTreeMap<String, CategoryNode>),
    Leaf(LeafRecords),
}

impl CategoryNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, CategoryNode::Leaf(_))
    }

    /// Child categories; empty for a leaf.
    pub fn children(&self) -> Option<&BTreeMap<String, CategoryNode>> {
        match self {
            CategoryNode::Interior(children) => Some(children),
            CategoryNode::Leaf(_) => None,
        }
    }
}

/// A leaf together with the category names leading to it.
#[derive(Debug, Clone)]
pub struct LeafEntry<'a> {
    pub segments: Vec<&'a str>,
    pub records: &'a LeafRecords,
}

impl LeafEntry<'_> {
    /// "Alimentos -> Lacteos -> Enteros"
    pub fn display_path(&self) -> String {
        self.segments.join(" -> ")
    }
}

/// In-memory mirror of the category hierarchy under a base directory.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub base_path: PathBuf,
    pub record_file: String,
    pub categories: BTreeMap<String, CategoryNode>,
    /// Problems met while building that did not stop the build.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every leaf in depth-first, name-sorted order.
    pub fn leaves(&self) -> Vec<LeafEntry<'_>> {
        let mut out = Vec::new();
        let mut segments = Vec::new();
        collect_leaves(&self.categories, &mut segments, &mut out);
        out
    }

    /// Resolve a category path such as `Alimentos/Lacteos/Enteros` to its leaf.
    ///
    /// Segments may be separated by `/` or `->`; names compare ignoring case.
    pub fn resolve(&self, category: &str) -> Result<&LeafRecords, ApiError> {
        let segments = split_category_path(category);
        if segments.is_empty() {
            return Err(ApiError::CategoryNotFound(category.to_string()));
        }

        let mut children = &self.categories;
        let mut walked: Vec<&str> = Vec::new();
        for (idx, segment) in segments.iter().enumerate() {
            let (name, node) = lookup(children, segment)
                .ok_or_else(|| ApiError::CategoryNotFound(category.to_string()))?;
            walked.push(name);
            match node {
                CategoryNode::Leaf(records) if idx + 1 == segments.len() => return Ok(records),
                CategoryNode::Leaf(_) => {
                    return Err(ApiError::CategoryNotFound(category.to_string()))
                }
                CategoryNode::Interior(next) => children = next,
            }
        }
        Err(ApiError::NotALeaf(walked.join("/")))
    }
}

fn collect_leaves<'a>(
    children: &'a BTreeMap<String, CategoryNode>,
    segments: &mut Vec<&'a str>,
    out: &mut Vec<LeafEntry<'a>>,
) {
    for (name, node) in children {
        segments.push(name.as_str());
        match node {
            CategoryNode::Leaf(records) => out.push(LeafEntry {
                segments: segments.clone(),
                records,
            }),
            CategoryNode::Interior(next) => collect_leaves(next, segments, out),
        }
        segments.pop();
    }
}

fn lookup<'a>(
    children: &'a BTreeMap<String, CategoryNode>,
    segment: &str,
) -> Option<(&'a str, &'a CategoryNode)> {
    if let Some((name, node)) = children.get_key_value(segment) {
        return Some((name.as_str(), node));
    }
    let wanted = fold_name(segment);
    children
        .iter()
        .find(|(name, _)| fold_name(name) == wanted)
        .map(|(name, node)| (name.as_str(), node))
}

fn split_category_path(category: &str) -> Vec<&str> {
    category
        .split("->")
        .flat_map(|part| part.split(['/', '\\']))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
