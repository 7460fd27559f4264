use std::sync::Arc;

use crate::tts::SpeechSynthesizer;

#[derive(Clone)]
pub struct AppState {
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    pub fn new(synthesizer: impl SpeechSynthesizer + 'static) -> Self {
        Self {
            synthesizer: Arc::new(synthesizer),
        }
    }
}
