use crate::{ProjectArgs, open_engine};
use hdlscope_api::{EngineLifecycle, IndexService, IndexStats};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Files")]
    files: usize,
    #[tabled(rename = "Symbols")]
    symbols: usize,
    #[tabled(rename = "Modules")]
    modules: usize,
    #[tabled(rename = "Instantiations")]
    references: usize,
}

impl From<IndexStats> for StatsRow {
    fn from(stats: IndexStats) -> Self {
        Self {
            files: stats.file_count,
            symbols: stats.symbol_count,
            modules: stats.module_count,
            references: stats.reference_count,
        }
    }
}

pub async fn run(project: ProjectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine(&project);
    info!("Indexing project at: {}...", project.project.display());
    engine.rebuild().await?;

    let stats = engine.get_stats().await?;
    info!("Indexing complete!");
    println!("{}", Table::new([StatsRow::from(stats)]).with(Style::psql()));
    Ok(())
}
