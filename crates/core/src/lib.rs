pub mod config;
pub mod ctags;
pub mod error;
pub mod logging;
pub mod parser;
pub mod project;
pub mod store;
pub mod util;

pub mod facade;
pub mod features;
pub mod runtime;

pub use config::IndexConfig;
pub use error::{HdlscopeError, Result};
pub use facade::EngineHandle;
pub use runtime::{HdlscopeEngine, HdlscopeEngineBuilder};
