//! Eulogy generation: a remote text model behind a trait, run on worker
//! threads and collected once per tick.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::funeral::{FuneralRequest, PendingRequest};
use crate::app::config::EulogyConfig;

const EMPTY_FALLBACK: &str = "Rest in Peace. Words fail us, literally.";
const ERROR_FALLBACK: &str = "The spirits are silent today (API Error). Rest in peace anyway.";

#[derive(Debug, Error)]
pub(crate) enum EulogyError {
    #[error("no API key in environment variable {env_var}")]
    MissingApiKey { env_var: String },
    #[error("eulogy request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("eulogy service answered with HTTP {0}")]
    Status(StatusCode),
    #[error("eulogy service returned no text")]
    EmptyResponse,
}

pub(crate) trait EulogyGenerator: Send + Sync {
    fn generate(&self, deceased_name: &str, cause_of_death: &str) -> Result<String, EulogyError>;
}

/// Runs `generator` and maps every failure onto a fixed fallback text, so a
/// submission always ends with a eulogy.
pub(crate) fn eulogy_or_fallback(
    generator: &dyn EulogyGenerator,
    deceased_name: &str,
    cause_of_death: &str,
) -> String {
    match generator.generate(deceased_name, cause_of_death) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) | Err(EulogyError::EmptyResponse) => {
            warn!(reason = "empty_response", "eulogy_fallback");
            EMPTY_FALLBACK.to_string()
        }
        Err(EulogyError::MissingApiKey { env_var }) => {
            warn!(reason = "missing_api_key", env_var = %env_var, "eulogy_fallback");
            offline_eulogy(deceased_name, cause_of_death)
        }
        Err(error) => {
            warn!(reason = "service_error", error = %error, "eulogy_fallback");
            ERROR_FALLBACK.to_string()
        }
    }
}

fn offline_eulogy(deceased_name: &str, cause_of_death: &str) -> String {
    format!(
        "Here lies {deceased_name}. They died of {cause_of_death}. \
         (API Key missing - running in offline mode)"
    )
}

fn build_prompt(deceased_name: &str, cause_of_death: &str) -> String {
    format!(
        "Write a witty, cynical, and slightly dark humorous eulogy for \"{deceased_name}\" \
         who died from \"{cause_of_death}\".\n\
         The tone should be like a 8-bit RPG NPC or a bored funeral director.\n\
         Target length: 75 words.\n\
         Break it into distinct sentences. Do not be overly offensive, just satirical.\n\
         If the cause is abstract (e.g. \"My motivation\"), personify it."
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Gemini `generateContent` over a blocking HTTP client.
pub(crate) struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    api_key_env: String,
    url: String,
}

impl GeminiClient {
    pub(crate) fn from_config(config: &EulogyConfig) -> Result<Self, EulogyError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        info!(
            model = %config.model,
            api_key_present = api_key.is_some(),
            timeout_ms = config.timeout_ms,
            "eulogy_client_ready"
        );
        Ok(Self {
            http,
            api_key,
            api_key_env: config.api_key_env.clone(),
            url: format!(
                "{}/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
        })
    }
}

impl EulogyGenerator for GeminiClient {
    fn generate(&self, deceased_name: &str, cause_of_death: &str) -> Result<String, EulogyError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(EulogyError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            });
        };
        let prompt = build_prompt(deceased_name, cause_of_death);
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: &prompt }],
            }],
        };
        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(EulogyError::Status(status));
        }
        let text = response.json::<GenerateResponse>()?.text();
        if text.trim().is_empty() {
            return Err(EulogyError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Stand-in used when no HTTP client could be built.
pub(crate) struct OfflineEulogy;

impl EulogyGenerator for OfflineEulogy {
    fn generate(&self, _: &str, _: &str) -> Result<String, EulogyError> {
        Err(EulogyError::MissingApiKey {
            env_var: "(offline)".to_string(),
        })
    }
}

#[derive(Debug)]
pub(crate) struct ResolvedEulogy {
    pub(crate) request: FuneralRequest,
    pub(crate) wait: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Execution {
    Threaded,
    #[cfg(test)]
    Inline,
}

/// Hands eulogy jobs to named worker threads and collects finished ones over
/// a channel. Results are only observed through `poll`, so the scene sees
/// them at a tick boundary.
pub(crate) struct EulogyDispatcher {
    generator: Arc<dyn EulogyGenerator>,
    sender: Sender<FuneralRequest>,
    receiver: Receiver<FuneralRequest>,
    in_flight: usize,
    execution: Execution,
}

impl EulogyDispatcher {
    pub(crate) fn new(generator: Arc<dyn EulogyGenerator>) -> Self {
        Self::with_execution(generator, Execution::Threaded)
    }

    /// Generates on the submitting thread; the result still arrives via
    /// `poll`.
    #[cfg(test)]
    pub(crate) fn inline(generator: Arc<dyn EulogyGenerator>) -> Self {
        Self::with_execution(generator, Execution::Inline)
    }

    fn with_execution(generator: Arc<dyn EulogyGenerator>, execution: Execution) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            generator,
            sender,
            receiver,
            in_flight: 0,
            execution,
        }
    }

    pub(crate) fn submit(&mut self, request: PendingRequest) {
        info!(
            id = %request.id,
            deceased = %request.deceased_name,
            "eulogy_requested"
        );
        self.in_flight += 1;
        match self.execution {
            Execution::Threaded => self.spawn_worker(request),
            #[cfg(test)]
            Execution::Inline => {
                let resolved = resolve(self.generator.as_ref(), request);
                let _ = self.sender.send(resolved);
            }
        }
    }

    fn spawn_worker(&self, request: PendingRequest) {
        let generator = Arc::clone(&self.generator);
        let sender = self.sender.clone();
        let name = format!("eulogy-{}", request.id);
        let fallback = request.clone();
        let spawned = thread::Builder::new().name(name).spawn(move || {
            let resolved = resolve(generator.as_ref(), request);
            // The scene may have been torn down; nobody is listening then.
            let _ = sender.send(resolved);
        });
        if let Err(error) = spawned {
            warn!(error = %error, id = %fallback.id, "eulogy_worker_spawn_failed");
            let _ = self.sender.send(fallback.resolve(ERROR_FALLBACK.to_string()));
        }
    }

    /// Drains every eulogy finished since the last call.
    pub(crate) fn poll(&mut self) -> Vec<ResolvedEulogy> {
        let mut resolved = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(request) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    let wait = SystemTime::now()
                        .duration_since(request.submitted_at)
                        .unwrap_or_default();
                    info!(
                        id = %request.id,
                        wait_ms = wait.as_millis() as u64,
                        "eulogy_resolved"
                    );
                    resolved.push(ResolvedEulogy { request, wait });
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        resolved
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight
    }
}

fn resolve(generator: &dyn EulogyGenerator, request: PendingRequest) -> FuneralRequest {
    let eulogy = eulogy_or_fallback(generator, &request.deceased_name, &request.cause_of_death);
    request.resolve(eulogy)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Returns a canned eulogy, or a canned failure.
    pub(crate) struct CannedEulogy(pub(crate) Result<&'static str, fn() -> EulogyError>);

    impl EulogyGenerator for CannedEulogy {
        fn generate(&self, _: &str, _: &str) -> Result<String, EulogyError> {
            match &self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(make_error) => Err(make_error()),
            }
        }
    }
}
