// src/lib.rs
//! Client-side session and template stores for the cliq template hub.
//!
//! [`ClientContext`] wires a [`SessionStore`] and a [`TemplateStore`] to an
//! [`HttpClient`] and a [`KeyValueStore`], plus the static [`RouteTable`].
//! Store actions never panic on I/O: the plain variants report `bool` /
//! leave state untouched, the `try_*` variants return a [`ClientError`].

mod logger;
pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod routes;
pub mod types;

pub use config::ClientConfig;
pub use context::ClientContext;
pub use crate::core::api::{ApiRequest, Endpoints, HttpClient, HttpMethod, ReqwestClient};
pub use crate::core::state::session::state::SessionStore;
pub use crate::core::state::session::types::{Session, SessionUser};
pub use crate::core::state::templates::state::TemplateStore;
pub use crate::core::state::templates::types::{
    GenerateRequest, GeneratedTemplate, NewTemplate, TemplateCollectionState, TemplateDetail,
    TemplateSummary, YamlEncoding,
};
pub use crate::core::storage::{FileStore, KeyValueStore, MemoryStore};
pub use crate::core::types::{TemplateID, UserID};
pub use error::{
    ClientError, ConfigError, ContextError, FailureKind, RouteError, StorageError,
};
pub use routes::router::{Navigation, RouteAccess, RouteMatch, RouteTable};
pub use routes::views::{ViewId, ViewModule};
