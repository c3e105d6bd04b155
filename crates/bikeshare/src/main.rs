mod bootstrap;

use std::io;

use anyhow::Result;
use bikeshare_core::settings::Settings;
use bikeshare_runtime::data_manager::DataManager;
use bikeshare_runtime::orchestrator::CycleOrchestrator;
use bikeshare_ui::app::App;
use bikeshare_ui::console::Console;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("bikeshare v{} starting", env!("CARGO_PKG_VERSION"));

    let data_dir = settings
        .data_dir
        .clone()
        .unwrap_or_else(bootstrap::discover_data_dir);
    let data = DataManager::new(data_dir);
    tracing::info!(
        data_dir = %data.data_dir().display(),
        cities = data.available_cities().len(),
        page_size = settings.page_size,
        "configuration resolved"
    );

    let app = App::new(CycleOrchestrator::new(data), settings.page_size());

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    app.run(&mut console)?;

    Ok(())
}
