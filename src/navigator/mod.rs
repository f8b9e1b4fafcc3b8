//! Catalog Navigator
//!
//! Level-by-level traversal of a built [`Catalog`]. At each interior node the operator
//! picks a child by number or `0` to go back; picking a leaf ends navigation with that
//! leaf's record file, and `0` at the top level ends it with no selection.
//!
//! The navigator keeps the borrowed child maps of every level it descended through, so
//! going back pops a frame instead of walking down from the root again.

pub mod input;

use crate::error::ApiError;
use crate::tree::{Catalog, CategoryNode};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

pub use input::{MenuInput, Screen, ScriptedInput};

/// How a navigation session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A leaf was chosen; holds its record file path.
    Selected(PathBuf),
    /// The operator backed out of the top level.
    Exited,
    /// Navigation reached a category with no children; holds the category path.
    Empty(String),
}

impl NavigationOutcome {
    pub fn selected(&self) -> Option<&PathBuf> {
        match self {
            NavigationOutcome::Selected(path) => Some(path),
            _ => None,
        }
    }
}

/// Result of feeding one answer to the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Descended(String),
    Ascended,
    /// The answer was not a listed option; state is unchanged.
    Rejected(String),
    Finished(NavigationOutcome),
}

type Children = BTreeMap<String, CategoryNode>;

pub struct Navigator<'a> {
    root: &'a Children,
    frames: Vec<(&'a str, &'a Children)>,
}

impl<'a> Navigator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            root: &catalog.categories,
            frames: Vec::new(),
        }
    }

    fn current(&self) -> &'a Children {
        self.frames
            .last()
            .map(|(_, children)| *children)
            .unwrap_or(self.root)
    }

    /// Names of the categories descended into, outermost first.
    pub fn path(&self) -> Vec<&'a str> {
        self.frames.iter().map(|(name, _)| *name).collect()
    }

    pub fn heading(&self) -> String {
        if self.frames.is_empty() {
            "Categories".to_string()
        } else {
            self.path().join(" -> ")
        }
    }

    /// Children of the current level, in the order they are numbered.
    pub fn options(&self) -> Vec<String> {
        self.current().keys().cloned().collect()
    }

    /// Apply one raw answer.
    pub fn select(&mut self, answer: &str) -> Step {
        let answer = answer.trim();
        let choice: usize = match answer.parse() {
            Ok(choice) => choice,
            Err(_) => return Step::Rejected(format!("'{}' is not a number", answer)),
        };

        if choice == 0 {
            return match self.frames.pop() {
                Some((name, _)) => {
                    debug!(left = name, "Navigated back");
                    Step::Ascended
                }
                None => Step::Finished(NavigationOutcome::Exited),
            };
        }

        let current = self.current();
        let Some((name, node)) = current.iter().nth(choice - 1) else {
            return Step::Rejected(format!(
                "option {} is out of range (0-{})",
                choice,
                current.len()
            ));
        };
        match node {
            CategoryNode::Leaf(records) => {
                debug!(path = %records.path.display(), "Leaf selected");
                Step::Finished(NavigationOutcome::Selected(records.path.clone()))
            }
            CategoryNode::Interior(children) => {
                self.frames.push((name.as_str(), children));
                Step::Descended(name.clone())
            }
        }
    }

    /// Drive the navigator with `input` until it selects a leaf or exits.
    pub fn run(mut self, input: &mut dyn MenuInput) -> Result<NavigationOutcome, ApiError> {
        loop {
            let options = self.options();
            if options.is_empty() {
                return Ok(NavigationOutcome::Empty(self.path().join("/")));
            }
            let answer = input.choose(&self.heading(), &options)?;
            match self.select(&answer) {
                Step::Rejected(message) => input.reject(&message),
                Step::Finished(outcome) => return Ok(outcome),
                Step::Descended(_) | Step::Ascended => {}
            }
        }
    }
}
