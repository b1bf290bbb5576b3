use core::fmt::Debug;

use log::{error, info, warn};

use super::EpisodeCatalog;

/// Location of the episode catalog relative to the page.
pub const EPISODES_URL: &str = "data/episodes.json";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchAttempt {
    /// Cache-defeating request.
    Primary,
    /// Plain request issued once the primary attempt failed.
    Fallback,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FetchRequest {
    pub url: String,
    pub attempt: FetchAttempt,
}

#[derive(Debug, Eq, PartialEq)]
pub enum LoadStep {
    Fetch(FetchRequest),
    Loaded(EpisodeCatalog),
    GaveUp,
    /// Response arrived while no request was outstanding.
    Ignored,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LoadPhase {
    Idle,
    Primary,
    Fallback,
    Finished,
    Failed,
}

/// Drives the one-shot catalog load: primary fetch, then a single fallback.
#[derive(Debug, Clone)]
pub struct EpisodeLoader {
    url: String,
    phase: LoadPhase,
}

impl EpisodeLoader {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            phase: LoadPhase::Idle,
        }
    }

    /// First request, tagged with `cache_token` so stale copies are bypassed.
    pub fn begin(&mut self, cache_token: &str) -> FetchRequest {
        self.phase = LoadPhase::Primary;
        FetchRequest {
            url: format!("{}?t={}", self.url, cache_token),
            attempt: FetchAttempt::Primary,
        }
    }

    pub fn on_response<E: Debug>(&mut self, response: Result<String, E>) -> LoadStep {
        let attempt = match self.phase {
            LoadPhase::Primary => FetchAttempt::Primary,
            LoadPhase::Fallback => FetchAttempt::Fallback,
            LoadPhase::Idle | LoadPhase::Finished | LoadPhase::Failed => {
                return LoadStep::Ignored;
            }
        };

        let outcome = match response {
            Ok(body) => EpisodeCatalog::from_json(&body).map_err(|err| format!("{err:?}")),
            Err(err) => Err(format!("{err:?}")),
        };

        match (outcome, attempt) {
            (Ok(catalog), _) => {
                info!(
                    "episodes: loaded {} fragments via {:?} request",
                    catalog.len(),
                    attempt
                );
                self.phase = LoadPhase::Finished;
                LoadStep::Loaded(catalog)
            }
            (Err(reason), FetchAttempt::Primary) => {
                warn!("episodes: primary load failed, retrying without cache token: {reason}");
                self.phase = LoadPhase::Fallback;
                LoadStep::Fetch(FetchRequest {
                    url: self.url.clone(),
                    attempt: FetchAttempt::Fallback,
                })
            }
            (Err(reason), FetchAttempt::Fallback) => {
                error!("episodes: failed to load {}: {reason}", self.url);
                self.phase = LoadPhase::Failed;
                LoadStep::GaveUp
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, LoadPhase::Finished | LoadPhase::Failed)
    }
}

impl Default for EpisodeLoader {
    fn default() -> Self {
        Self::new(EPISODES_URL)
    }
}
