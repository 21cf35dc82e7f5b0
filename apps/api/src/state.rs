use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::resources::youtube::VideoSearch;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// YouTube search. `DisabledVideoSearch` when no `YOUTUBE_API_KEY` is set.
    pub videos: Arc<dyn VideoSearch>,
}
