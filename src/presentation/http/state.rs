// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use crate::infrastructure::security::cookie::SessionCookieSigner;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub cookies: Arc<SessionCookieSigner>,
}
