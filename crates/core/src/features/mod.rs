//! Read-only consumers of the index.

pub mod hierarchy;
pub mod keywords;
pub mod navigation;

pub use hierarchy::{build_forest, dependency_forest};
