pub mod error;
pub mod hierarchy;
pub mod index;
pub mod lifecycle;
pub mod models;
pub mod navigation;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use hierarchy::HierarchyService;
pub use index::IndexService;
pub use lifecycle::{EngineLifecycle, EngineWatchHandle};
pub use models::*;
pub use navigation::NavigationService;

/// Composite trait representing the full hdlscope engine API.
/// Clients depend on this single trait instead of the individual services.
pub trait HdlscopeEngine:
    IndexService + HierarchyService + NavigationService + EngineLifecycle
{
}

impl<T> HdlscopeEngine for T where
    T: IndexService + HierarchyService + NavigationService + EngineLifecycle
{
}
