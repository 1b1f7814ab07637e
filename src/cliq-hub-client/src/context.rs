// src/context.rs
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::core::api::{Endpoints, HttpClient, ReqwestClient};
use crate::core::state::session::state::SessionStore;
use crate::core::state::templates::state::TemplateStore;
use crate::core::storage::{FileStore, KeyValueStore};
use crate::debug_log;
use crate::error::{ContextError, RouteError};
use crate::routes::router::RouteTable;

/// Everything a front end needs, built once and passed around explicitly.
pub struct ClientContext {
    pub config: ClientConfig,
    pub session: SessionStore,
    pub templates: TemplateStore,
    pub routes: RouteTable,
}

impl ClientContext {
    pub fn new(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, RouteError> {
        let endpoints = Endpoints::from_config(&config);
        let session = SessionStore::new(http.clone(), storage, endpoints.clone());
        let templates = TemplateStore::new(http, session.clone(), endpoints);
        let routes = RouteTable::new()?;

        debug_log!("Client context ready for {}", config.api_base_url);

        Ok(Self {
            config,
            session,
            templates,
            routes,
        })
    }

    /// Production wiring: `reqwest` for HTTP, a JSON file at
    /// `config.storage_path` for persistence.
    pub fn from_config(config: ClientConfig) -> Result<Self, ContextError> {
        let http = Arc::new(ReqwestClient::new(&config)?);
        let storage = Arc::new(FileStore::new(config.storage_path.clone()));
        Ok(Self::new(config, http, storage)?)
    }
}
