//! Lightweight extraction passes over HDL source text.
//!
//! None of these build a syntax tree: tag lines come from the external tool,
//! container ends and instantiation sites are recovered lexically.

pub mod instances;
pub mod ranges;
pub mod tagline;

pub use instances::{InstanceSite, find_instances, strip_block_comments};
pub use ranges::{enclosing_container, resolve_container_ranges};
pub use tagline::{TagLineError, parse_tag_line};
