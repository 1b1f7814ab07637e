// src/core/state/templates/state.rs
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde_json::Value;
use tracing::{error, instrument};

use crate::core::api::{ApiRequest, Endpoints, HttpClient};
use crate::core::state::session::state::SessionStore;
use crate::core::state::templates::types::{
    GenerateRequest, GeneratedTemplate, TemplateCollectionState, TemplateDetail, TemplateSummary,
};
use crate::core::types::TemplateID;
use crate::debug_log;
use crate::error::ClientError;

/// Template listing plus the template currently being viewed.
///
/// Nothing here is persisted. Every fetch replaces its slot wholesale when
/// it completes, so overlapping fetches settle on whichever answer arrived
/// last.
#[derive(Clone)]
pub struct TemplateStore {
    inner: Arc<TemplateInner>,
}

struct TemplateInner {
    state: RwLock<TemplateCollectionState>,
    session: SessionStore,
    http: Arc<dyn HttpClient>,
    endpoints: Endpoints,
}

impl TemplateStore {
    pub fn new(http: Arc<dyn HttpClient>, session: SessionStore, endpoints: Endpoints) -> Self {
        Self {
            inner: Arc::new(TemplateInner {
                state: RwLock::new(TemplateCollectionState::default()),
                session,
                http,
                endpoints,
            }),
        }
    }

    pub fn templates(&self) -> Vec<TemplateSummary> {
        self.read(|s| s.templates.clone())
    }

    pub fn current_template(&self) -> Option<TemplateDetail> {
        self.read(|s| s.current_template.clone())
    }

    pub fn snapshot(&self) -> TemplateCollectionState {
        self.read(TemplateCollectionState::clone)
    }

    pub async fn fetch_templates(&self) {
        let _ = self.try_fetch_templates().await;
    }

    /// Returns how many templates the hub listed.
    #[instrument(name = "templates_fetch_all", skip(self))]
    pub async fn try_fetch_templates(&self) -> Result<usize, ClientError> {
        let result = async {
            let body = self
                .inner
                .http
                .send(ApiRequest::get(self.inner.endpoints.templates()))
                .await?;
            decode_listing(body)
        }
        .await;

        let templates = result.map_err(|err| {
            error!(kind = %err.kind(), "Fetching templates failed: {err}");
            err
        })?;

        let count = templates.len();
        self.write(|s| s.templates = templates);

        debug_log!("Loaded {count} templates");
        Ok(count)
    }

    pub async fn fetch_template(&self, id: impl Into<TemplateID>) {
        let _ = self.try_fetch_template(id).await;
    }

    #[instrument(name = "templates_fetch_one", skip(self, id))]
    pub async fn try_fetch_template(
        &self,
        id: impl Into<TemplateID>,
    ) -> Result<TemplateDetail, ClientError> {
        let id = id.into();
        let result = self
            .inner
            .http
            .send(ApiRequest::get(self.inner.endpoints.template(&id)))
            .await;

        let detail = TemplateDetail(result.map_err(|err| {
            error!(template = %id, kind = %err.kind(), "Fetching template failed: {err}");
            err
        })?);

        self.write(|s| s.current_template = Some(detail.clone()));

        debug_log!("Loaded template {id}");
        Ok(detail)
    }

    pub async fn create_template<T>(&self, template: &T) -> bool
    where
        T: Serialize + Sync + ?Sized,
    {
        self.try_create_template(template).await.is_ok()
    }

    /// Uploads with whatever token the session holds right now, even an
    /// empty one. The listing is left stale until the next fetch.
    #[instrument(name = "templates_create", skip_all)]
    pub async fn try_create_template<T>(&self, template: &T) -> Result<Value, ClientError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let token = self.inner.session.token();

        let result = async {
            let request =
                ApiRequest::post(self.inner.endpoints.templates(), template)?.with_bearer(&token);
            self.inner.http.send(request).await
        }
        .await;

        result
            .map(|created| {
                debug_log!("Template uploaded");
                created
            })
            .map_err(|err| {
                error!(kind = %err.kind(), "Creating template failed: {err}");
                err
            })
    }

    pub async fn generate_template(&self, request: &GenerateRequest) -> Option<GeneratedTemplate> {
        self.try_generate_template(request).await.ok()
    }

    /// Asks the hub to draft a template from an example command line.
    #[instrument(name = "templates_generate", skip_all)]
    pub async fn try_generate_template(
        &self,
        request: &GenerateRequest,
    ) -> Result<GeneratedTemplate, ClientError> {
        let result = async {
            let api_request = ApiRequest::post(self.inner.endpoints.generate(), request)?;
            let body = self.inner.http.send(api_request).await?;
            Ok::<_, ClientError>(serde_json::from_value::<GeneratedTemplate>(body)?)
        }
        .await;

        result.map_err(|err| {
            error!(kind = %err.kind(), "Generating template failed: {err}");
            err
        })
    }

    fn read<R>(&self, f: impl FnOnce(&TemplateCollectionState) -> R) -> R {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut TemplateCollectionState)) {
        let mut guard = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

fn decode_listing(body: Value) -> Result<Vec<TemplateSummary>, ClientError> {
    match body {
        Value::Array(items) => Ok(items.into_iter().map(TemplateSummary).collect()),
        other => Err(ClientError::Decode(format!(
            "expected a template array, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
