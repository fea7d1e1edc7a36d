use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, render::SafeRenderer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub renderer: Arc<SafeRenderer>,
}

impl AppState {
    /// Builds the shared renderer from the Markdown options in `config`.
    pub fn new(config: Config) -> Self {
        let renderer = Arc::new(SafeRenderer::with_defaults(config.markdown.clone()));
        Self { config, renderer }
    }
}

impl FromRef<AppState> for Arc<SafeRenderer> {
    fn from_ref(state: &AppState) -> Self {
        state.renderer.clone()
    }
}
