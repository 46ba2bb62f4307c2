pub mod hierarchy;
pub mod index;
pub mod language;
pub mod navigation;
pub mod symbol;

pub use hierarchy::*;
pub use index::*;
pub use language::*;
pub use navigation::*;
pub use symbol::*;
