use once_cell::sync::OnceCell;

use crate::config::AppConfig;
use crate::matcher::{CaptionMatcher, MatchError};

/// Shared application state
///
/// The caption matcher (CLIP pair + caption embedding matrix) is expensive to
/// construct, so it is loaded lazily by the first request that needs it and
/// reused for the process lifetime. `OnceCell::get_or_try_init` guarantees no
/// request ever observes a partially constructed matcher; a failed load
/// leaves the cell empty so the next request retries.
pub struct AppState {
    /// Server configuration
    pub config: AppConfig,

    /// Lazily loaded matcher (shared across requests)
    matcher: OnceCell<CaptionMatcher>,
}

impl AppState {
    /// Create new server state; the matcher stays unloaded until first use.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            matcher: OnceCell::new(),
        }
    }

    /// Get the matcher, loading it on first call.
    ///
    /// Loading blocks the calling thread; call from a blocking worker.
    pub fn matcher(&self) -> Result<&CaptionMatcher, MatchError> {
        self.matcher.get_or_try_init(|| {
            tracing::info!("loading caption matcher on first request");
            CaptionMatcher::load(&self.config.embed)
        })
    }

    /// Whether the matcher has been loaded yet.
    pub fn matcher_loaded(&self) -> bool {
        self.matcher.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::EmbedConfig;

    fn stub_state() -> AppState {
        let config = AppConfig {
            embed: EmbedConfig::stub(),
            ..Default::default()
        };
        AppState::new(config)
    }

    #[test]
    fn matcher_is_unloaded_until_first_use() {
        let state = stub_state();
        assert!(!state.matcher_loaded());

        state.matcher().unwrap();
        assert!(state.matcher_loaded());
    }

    #[test]
    fn matcher_is_loaded_once() {
        let state = stub_state();
        let first = state.matcher().unwrap() as *const CaptionMatcher;
        let second = state.matcher().unwrap() as *const CaptionMatcher;
        assert_eq!(first, second);
    }
}
