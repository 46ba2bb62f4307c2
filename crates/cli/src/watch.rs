use crate::{ProjectArgs, open_engine};
use hdlscope_api::EngineLifecycle;
use tracing::info;

pub async fn run(project: ProjectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine(&project);

    info!("Initializing: Indexing project at: {}...", project.project.display());
    engine.rebuild().await?;
    info!("Initial indexing complete.");

    let handle = engine.start_watch().await?;
    info!("File watcher started. Ready for changes.");
    println!("Watching {} (Ctrl+C to stop)", project.project.display());

    tokio::signal::ctrl_c().await?;
    handle.stop();
    info!("Watcher stopped.");
    Ok(())
}
