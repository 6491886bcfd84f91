use super::{
    CancelToken,
    query::{search_query, youtube_uri},
    score::{MatchCandidate, best_match},
};
use crate::{config::WebConfig, domain::Track};
use anyhow::Result;
use tracing::{debug, info, warn};

/// A search backend returning raw result titles for a query.
pub trait SearchProvider: Send {
    fn name(&self) -> &str;
    fn search(&self, query: &str, cancel: &CancelToken) -> Result<Vec<MatchCandidate>>;
}

/// Finds a web uri for a track through a primary provider. Once the
/// primary fails, every later lookup goes through the fallbacks instead.
pub struct WebResolver {
    primary: Box<dyn SearchProvider>,
    fallbacks: Vec<Box<dyn SearchProvider>>,
    fallback: bool,
}

impl WebResolver {
    pub fn new(primary: impl SearchProvider + 'static) -> Self {
        WebResolver {
            primary: Box::new(primary),
            fallbacks: Vec::new(),
            fallback: false,
        }
    }

    pub fn with_fallback(mut self, provider: impl SearchProvider + 'static) -> Self {
        self.fallbacks.push(Box::new(provider));
        self
    }

    pub fn configure(mut self, config: &WebConfig) -> Self {
        self.fallback = config.fallback_only;
        self
    }

    pub fn set_fallback_only(&mut self, fallback: bool) {
        self.fallback = fallback
    }

    pub fn in_fallback(&self) -> bool {
        self.fallback
    }

    /// Watch uri of the best match, `None` when nothing matched, the track
    /// is already a web track, or the lookup was cancelled.
    pub fn resolve(&mut self, track: &Track, cancel: &CancelToken) -> Option<String> {
        if track.is_http() {
            debug!(track = %track.title, "Already a web track");
            return None;
        }

        let query = search_query(track);

        if !self.fallback {
            if cancel.is_cancelled() {
                return None;
            }

            match self.primary.search(&query, cancel) {
                Ok(candidates) => return Self::pick(track, &candidates, cancel),
                Err(e) => {
                    warn!(provider = self.primary.name(), "Search failed: {e:#}");
                    info!("Switching to fallback search providers");
                    self.fallback = true;
                }
            }
        }

        for provider in &self.fallbacks {
            if cancel.is_cancelled() {
                return None;
            }

            match provider.search(&query, cancel) {
                Ok(candidates) => {
                    if let Some(uri) = Self::pick(track, &candidates, cancel) {
                        return Some(uri);
                    }
                }
                Err(e) => warn!(provider = provider.name(), "Search failed: {e:#}"),
            }
        }

        None
    }

    fn pick(track: &Track, candidates: &[MatchCandidate], cancel: &CancelToken) -> Option<String> {
        if cancel.is_cancelled() {
            return None;
        }

        let (best, score) = best_match(
            candidates,
            &track.title,
            track.primary_artist(),
            &track.album,
        )?;
        debug!(track = %track.title, id = %best.id, score, "Best match");

        Some(youtube_uri(&best.id))
    }
}
