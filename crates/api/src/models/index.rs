use serde::{Deserialize, Serialize};

/// Lifecycle of the index store.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndexState {
    Empty,
    Indexing,
    Ready,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub file_count: usize,
    pub symbol_count: usize,
    pub module_count: usize,
    pub reference_count: usize,
}
