// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    generation::CompletionClient,
    store::{AttemptStore, UserStore},
};

#[derive(Clone)]
pub struct AppState {
    pub attempts: Arc<dyn AttemptStore>,
    pub users: Arc<dyn UserStore>,
    pub completions: Arc<dyn CompletionClient>,
    pub config: Config,
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn AttemptStore> {
    fn from_ref(state: &AppState) -> Self {
        state.attempts.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for Arc<dyn CompletionClient> {
    fn from_ref(state: &AppState) -> Self {
        state.completions.clone()
    }
}
