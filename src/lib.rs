//! Gondola: supermarket inventory over nested category directories
//!
//! Each leaf category is a directory holding one CSV record file of items. The crate
//! verifies and repairs that layout, mirrors it as an in-memory category tree, lets an
//! operator navigate it, and edits items through whole-file read-modify-write cycles.

pub mod config;
pub mod error;
pub mod items;
pub mod logging;
pub mod navigator;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod validation;
pub mod verify;
