use tracing_subscriber::EnvFilter;

use litebike_arena::config::ArenaConfig;
use litebike_host::build_session;
use litebike_host::config::{HostConfig, LogFormat};
use litebike_host::error::HostError;
use litebike_host::session::run_session;

#[tokio::main]
async fn main() {
    let config = match HostConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Pretty);
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        },
    };
    init_tracing(config.log_format);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "LiteBike host failed");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn run(config: HostConfig) -> Result<(), HostError> {
    tracing::info!(
        high_score_file = %config.high_score_file,
        max_matches = config.max_matches,
        seed = ?config.seed,
        "LiteBike host starting"
    );
    let arena = ArenaConfig::load();
    tracing::info!(
        width = arena.width,
        height = arena.height,
        grid_size = arena.grid_size,
        tick_rate = arena.tick_rate,
        "Arena ready"
    );

    let session = build_session(arena, config)?;
    let session = run_session(session, tokio::signal::ctrl_c()).await;
    if let Some(best) = session.table().entries().first() {
        tracing::info!(name = %best.name, score = best.score, "Top score");
    }
    Ok(())
}
