mod index;
mod query;
mod tree;
mod watch;

use clap::{Args, Parser, Subcommand};
use hdlscope_core::{EngineHandle, HdlscopeEngine, IndexConfig};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "hdlscope",
    version,
    about = "Symbol index and module hierarchy for Verilog, SystemVerilog and VHDL",
    long_about = "hdlscope indexes HDL sources with ctags, records where every module and entity \
                  is instantiated and answers navigation queries over the result."
)]
pub struct Cli {
    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct ProjectArgs {
    /// Project root directory
    #[arg(short, long, value_name = "PROJECT_PATH", default_value = ".")]
    pub project: PathBuf,

    /// ctags binary to use instead of the configured or discovered one
    #[arg(long, value_name = "CTAGS")]
    pub ctags: Option<PathBuf>,
}

/// A 1-based cursor inside a source file.
#[derive(Args, Clone)]
pub struct CursorArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    #[arg(value_name = "LINE")]
    pub line: usize,
    #[arg(value_name = "COLUMN")]
    pub col: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index a project and print statistics
    Index {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Print the module instantiation hierarchy
    Tree {
        #[command(flatten)]
        project: ProjectArgs,
        /// Print the forest as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every place a module or entity is instantiated
    Refs {
        #[command(flatten)]
        project: ProjectArgs,
        #[arg(value_name = "MODULE")]
        module: String,
    },
    /// List the symbols declared in a file
    Symbols {
        #[command(flatten)]
        project: ProjectArgs,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Jump to the declaration of the identifier at a position
    Definition {
        #[command(flatten)]
        project: ProjectArgs,
        #[command(flatten)]
        cursor: CursorArgs,
    },
    /// Show hover information for the declaration at a position
    Hover {
        #[command(flatten)]
        project: ProjectArgs,
        #[command(flatten)]
        cursor: CursorArgs,
    },
    /// Show which files instantiate the modules of a file
    Lens {
        #[command(flatten)]
        project: ProjectArgs,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Complete the word before a position
    Complete {
        #[command(flatten)]
        project: ProjectArgs,
        #[command(flatten)]
        cursor: CursorArgs,
    },
    /// Print an instantiation template for a module declared in a file
    Instantiate {
        #[command(flatten)]
        project: ProjectArgs,
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Module to use when the file declares several
        #[arg(short, long)]
        module: Option<String>,
    },
    /// Index the project, then keep it up to date until Ctrl+C
    Watch {
        #[command(flatten)]
        project: ProjectArgs,
    },
}

/// Loads `.hdlscope.json` from the project root and applies CLI overrides.
pub fn open_engine(args: &ProjectArgs) -> EngineHandle {
    let mut config = IndexConfig::load(&args.project).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid project configuration: {}", e);
        IndexConfig::default()
    });
    if let Some(ctags) = &args.ctags {
        config.ctags_path = Some(ctags.clone());
    }
    let engine = HdlscopeEngine::builder(args.project.clone())
        .with_config(config)
        .build();
    EngineHandle::from_engine(Arc::new(engine))
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = hdlscope_core::logging::init_logging("cli", cli.verbose);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Index { project } => rt.block_on(index::run(project)),
        Commands::Tree { project, json } => rt.block_on(tree::run(project, json)),
        Commands::Refs { project, module } => rt.block_on(query::refs(project, module)),
        Commands::Symbols { project, file } => rt.block_on(query::symbols(project, file)),
        Commands::Definition { project, cursor } => {
            rt.block_on(query::definition(project, cursor))
        }
        Commands::Hover { project, cursor } => rt.block_on(query::hover(project, cursor)),
        Commands::Lens { project, file } => rt.block_on(query::lens(project, file)),
        Commands::Complete { project, cursor } => rt.block_on(query::complete(project, cursor)),
        Commands::Instantiate {
            project,
            file,
            module,
        } => rt.block_on(query::instantiate(project, file, module)),
        Commands::Watch { project } => rt.block_on(watch::run(project)),
    }
}
