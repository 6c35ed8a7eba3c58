// Pick/ban lobby client entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Open the session store
// 4. Load the resonator catalog
// 5. Build the lobby service client
// 6. Create mpsc channels
// 7. Spawn app logic task (restores any saved session)
// 8. Run the TUI until the user quits
// 9. Wait briefly for the app's exit cleanup

use std::sync::Arc;
use std::time::Duration;

use pickban_client::api::{HttpLobbyApi, LobbyApi};
use pickban_client::app;
use pickban_client::catalog;
use pickban_client::config;
use pickban_client::session::SessionStore;
use pickban_client::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Pick/ban client starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: service={}, poll every {}ms",
        config.api.base_url, config.polling.interval_ms
    );

    let store_path = SessionStore::default_path(&config)?;
    let store = SessionStore::open_at(&store_path).context("failed to open session store")?;
    info!("Session store opened at {}", store_path.display());

    let catalog = catalog::load_catalog(std::path::Path::new(&config.data_paths.catalog))
        .context("failed to load resonator catalog")?;
    info!("Loaded {} resonators", catalog.len());

    let api: Arc<dyn LobbyApi> =
        Arc::new(HttpLobbyApi::from_config(&config).context("failed to build HTTP client")?);

    let (event_tx, event_rx) = mpsc::channel(64);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let player_name = config.player.name.clone();
    let app_state = app::AppState::new(config, api, store, catalog, event_tx);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, event_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    info!("Application ready");

    // Blocks until the user quits.
    if let Err(e) = tui::run(ui_rx, cmd_tx, player_name).await {
        error!("TUI error: {}", e);
    }

    // The app sends its leave/delete on the way out; give it a moment.
    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Pick/ban client shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("pickban.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pickban_client=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
