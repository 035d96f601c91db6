use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub(crate) const CONFIG_ENV_VAR: &str = "CYBERRIP_CONFIG";

/// Pixels per tick. Must stay below the 24px hitbox width so one tick can
/// never carry the hitbox across a wall.
pub(crate) const MAX_PLAYER_SPEED: f32 = 24.0;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path} at {json_path}: {message}")]
    Parse {
        path: PathBuf,
        json_path: String,
        message: String,
    },
    #[error("invalid config value at {json_path}: {message}")]
    Invalid { json_path: &'static str, message: String },
}

/// Everything a play session can be tuned with. Every field has a default, so
/// an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    pub(crate) window: WindowConfig,
    pub(crate) world: WorldConfig,
    pub(crate) ceremony: CeremonyTimings,
    pub(crate) eulogy: EulogyConfig,
    pub(crate) notification_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            world: WorldConfig::default(),
            ceremony: CeremonyTimings::default(),
            eulogy: EulogyConfig::default(),
            notification_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) target_tps: u32,
    pub(crate) max_render_fps: Option<u32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "CyberRip - The 8-Bit Funeral Home".to_string(),
            width: 1280,
            height: 720,
            target_tps: 60,
            max_render_fps: Some(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WorldConfig {
    /// Fixed map seed; a fresh random layout is generated when absent.
    pub(crate) seed: Option<u64>,
    pub(crate) player_speed: f32,
    pub(crate) interaction_radius: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            player_speed: 4.0,
            interaction_radius: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CeremonyTimings {
    pub(crate) arrival_ms: u64,
    pub(crate) procession_ms: u64,
    pub(crate) bearers_return_ms: u64,
    pub(crate) preaching_start_delay_ms: u64,
    pub(crate) speech_ms_per_char: u64,
    pub(crate) speech_min_ms: u64,
    pub(crate) speech_max_ms: u64,
    pub(crate) speech_gap_ms: u64,
    pub(crate) pre_amen_ms: u64,
    pub(crate) amen_ms: u64,
    pub(crate) burial_ms: u64,
    pub(crate) bearers_leave_ms: u64,
    pub(crate) hearse_leave_ms: u64,
}

impl Default for CeremonyTimings {
    fn default() -> Self {
        Self {
            arrival_ms: 4000,
            procession_ms: 12000,
            bearers_return_ms: 6000,
            preaching_start_delay_ms: 1000,
            speech_ms_per_char: 60,
            speech_min_ms: 2500,
            speech_max_ms: 5000,
            speech_gap_ms: 1000,
            pre_amen_ms: 3500,
            amen_ms: 3000,
            burial_ms: 4000,
            bearers_leave_ms: 6000,
            hearse_leave_ms: 4000,
        }
    }
}

impl CeremonyTimings {
    /// How long a speech chunk stays on screen before the gap.
    pub(crate) fn read_duration(&self, chunk: &str) -> Duration {
        let chars = chunk.chars().count() as u64;
        let ms = chars
            .saturating_mul(self.speech_ms_per_char)
            .clamp(self.speech_min_ms, self.speech_max_ms);
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct EulogyConfig {
    /// Name of the environment variable holding the API key.
    pub(crate) api_key_env: String,
    pub(crate) model: String,
    pub(crate) endpoint: String,
    pub(crate) timeout_ms: u64,
}

impl Default for EulogyConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_ms: 20_000,
        }
    }
}

impl SessionConfig {
    /// Reads the file named by `CYBERRIP_CONFIG`, or returns the defaults when
    /// the variable is unset.
    pub(crate) fn load_from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from_path(Path::new(&path)),
            None => {
                info!(env_var = CONFIG_ENV_VAR, "config_defaults");
                Ok(Self::default())
            }
        }
    }

    pub(crate) fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&raw).map_err(|(json_path, message)| ConfigError::Parse {
            path: path.to_path_buf(),
            json_path,
            message,
        })?;
        config.validate()?;
        info!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    fn parse(raw: &str) -> Result<Self, (String, String)> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        serde_path_to_error::deserialize::<_, SessionConfig>(&mut deserializer).map_err(|error| {
            let json_path = error.path().to_string();
            (json_path, error.into_inner().to_string())
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.world.player_speed.is_finite() || self.world.player_speed <= 0.0 {
            return Err(ConfigError::Invalid {
                json_path: "world.player_speed",
                message: format!("must be positive, got {}", self.world.player_speed),
            });
        }
        if self.world.player_speed >= MAX_PLAYER_SPEED {
            return Err(ConfigError::Invalid {
                json_path: "world.player_speed",
                message: format!(
                    "must be below {MAX_PLAYER_SPEED}, got {}",
                    self.world.player_speed
                ),
            });
        }
        if !self.world.interaction_radius.is_finite() || self.world.interaction_radius <= 0.0 {
            return Err(ConfigError::Invalid {
                json_path: "world.interaction_radius",
                message: format!("must be positive, got {}", self.world.interaction_radius),
            });
        }
        if self.ceremony.speech_min_ms > self.ceremony.speech_max_ms {
            return Err(ConfigError::Invalid {
                json_path: "ceremony.speech_min_ms",
                message: format!(
                    "must not exceed speech_max_ms ({} > {})",
                    self.ceremony.speech_min_ms, self.ceremony.speech_max_ms
                ),
            });
        }
        Ok(())
    }

    pub(crate) fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}
