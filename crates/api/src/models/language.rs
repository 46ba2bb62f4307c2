use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Hardware description languages understood by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Verilog,
    SystemVerilog,
    Vhdl,
}

impl Language {
    /// Extensions indexed by default.
    pub const EXTENSIONS: [&'static str; 6] = ["v", "sv", "vh", "svh", "vhd", "vhdl"];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "v" | "vh" => Some(Self::Verilog),
            "sv" | "svh" => Some(Self::SystemVerilog),
            "vhd" | "vhdl" => Some(Self::Vhdl),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verilog => "verilog",
            Self::SystemVerilog => "systemverilog",
            Self::Vhdl => "vhdl",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
