use engine::{LoopConfig, Scene};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::{ConfigError, SessionConfig};
use super::gameplay::{self, MapError};

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Map(#[from] MapError),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== CyberRip Startup ===");

    let session = SessionConfig::load_from_env()?;
    let seed = session.world.seed.unwrap_or_else(rand::random);
    info!(seed, from_config = session.world.seed.is_some(), "map_seed");

    let config = loop_config(&session);
    let scene = gameplay::build_scene(session, seed)?;
    Ok(AppWiring { config, scene })
}

fn loop_config(session: &SessionConfig) -> LoopConfig {
    let window = &session.window;
    LoopConfig {
        window_title: window.title.clone(),
        window_width: window.width,
        window_height: window.height,
        target_tps: window.target_tps,
        max_render_fps: window.max_render_fps,
        ..LoopConfig::default()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
