use std::sync::Arc;

use crate::application::ports::{LlmClient, TranscriptionEngine};
use crate::application::services::InterpretationService;
use crate::presentation::config::Settings;

pub struct AppState<S, L>
where
    S: TranscriptionEngine,
    L: LlmClient,
{
    pub interpretation_service: Arc<InterpretationService<S, L>>,
    pub settings: Settings,
}

impl<S, L> Clone for AppState<S, L>
where
    S: TranscriptionEngine,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            interpretation_service: Arc::clone(&self.interpretation_service),
            settings: self.settings.clone(),
        }
    }
}
