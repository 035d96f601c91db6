use std::sync::Arc;

use engine::Scene;
use tracing::{info, warn};

mod chunker;
mod dialog;
mod director;
mod eulogy;
mod funeral;
mod interaction;
mod map_gen;
mod movement;
mod scene_impl;
mod staging;
mod world;

use eulogy::{EulogyDispatcher, EulogyGenerator, GeminiClient, OfflineEulogy};
use scene_impl::CeremonyScene;

pub(crate) use world::MapError;

use super::config::SessionConfig;

/// Builds the funeral home scene: generates the map from `seed` and wires
/// the eulogy service described by the config.
pub(crate) fn build_scene(config: SessionConfig, seed: u64) -> Result<Box<dyn Scene>, MapError> {
    let map = map_gen::generate_map(seed)?;
    info!(
        seed,
        npcs = map.npcs().len(),
        interactables = map.interactables().len(),
        "map_generated"
    );
    let generator: Arc<dyn EulogyGenerator> = match GeminiClient::from_config(&config.eulogy) {
        Ok(client) => Arc::new(client),
        Err(error) => {
            warn!(error = %error, "eulogy_client_unavailable");
            Arc::new(OfflineEulogy)
        }
    };
    let dispatcher = EulogyDispatcher::new(generator);
    Ok(Box::new(CeremonyScene::new(config, map, dispatcher)))
}

#[cfg(test)]
mod tests;
