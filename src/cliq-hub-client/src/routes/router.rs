// src/routes/router.rs
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use matchit::Router;
use url::form_urlencoded;

use crate::core::state::session::state::SessionStore;
use crate::debug_log;
use crate::error::RouteError;
use crate::routes::views::{self, ViewId, ViewModule};
use crate::types::ViewLoader;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const TEMPLATE_DETAIL_PATH: &str = "/templates/{id}";
pub const UPLOAD_PATH: &str = "/upload";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteLoading {
    Eager,
    Lazy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Only enforced by [`RouteTable::navigate`]; `resolve` ignores it.
    Authenticated,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDefinition {
    pub name: &'static str,
    /// matchit syntax, `{param}` for path params.
    pub path: &'static str,
    pub view: ViewId,
    pub loading: RouteLoading,
    pub access: RouteAccess,
    pub loader: ViewLoader,
}

impl RouteDefinition {
    /// The path written with `:param` placeholders.
    pub fn display_path(&self) -> String {
        self.path.replace('{', ":").replace('}', "")
    }
}

pub const ROUTES: &[RouteDefinition] = &[
    RouteDefinition {
        name: "home",
        path: HOME_PATH,
        view: ViewId::Home,
        loading: RouteLoading::Eager,
        access: RouteAccess::Public,
        loader: views::load_home,
    },
    RouteDefinition {
        name: "login",
        path: LOGIN_PATH,
        view: ViewId::Login,
        loading: RouteLoading::Lazy,
        access: RouteAccess::Public,
        loader: views::load_login,
    },
    RouteDefinition {
        name: "register",
        path: REGISTER_PATH,
        view: ViewId::Register,
        loading: RouteLoading::Lazy,
        access: RouteAccess::Public,
        loader: views::load_register,
    },
    RouteDefinition {
        name: "template-detail",
        path: TEMPLATE_DETAIL_PATH,
        view: ViewId::TemplateDetail,
        loading: RouteLoading::Lazy,
        access: RouteAccess::Public,
        loader: views::load_template_detail,
    },
    RouteDefinition {
        name: "upload",
        path: UPLOAD_PATH,
        view: ViewId::Upload,
        loading: RouteLoading::Lazy,
        access: RouteAccess::Authenticated,
        loader: views::load_upload,
    },
];

struct RouteSlot {
    definition: RouteDefinition,
    module: OnceLock<ViewModule>,
    loads: AtomicUsize,
}

impl RouteSlot {
    fn module(&self) -> &ViewModule {
        self.module.get_or_init(|| {
            self.loads.fetch_add(1, Ordering::Relaxed);
            debug_log!("Loading view module for {}", self.definition.name);
            (self.definition.loader)()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub name: &'static str,
    pub view: ViewId,
    pub access: RouteAccess,
    pub module: &'a ViewModule,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<'a> {
    Render(RouteMatch<'a>),
    /// The route needs a session and there is none.
    Redirect { to: &'static str, from: String },
}

/// Path to view table. View modules load on first visit and stay cached
/// for the life of the table.
pub struct RouteTable {
    router: Router<usize>,
    slots: Vec<RouteSlot>,
}

impl RouteTable {
    pub fn new() -> Result<Self, RouteError> {
        Self::from_definitions(ROUTES)
    }

    pub fn from_definitions(definitions: &[RouteDefinition]) -> Result<Self, RouteError> {
        let mut router = Router::new();
        let mut slots = Vec::with_capacity(definitions.len());

        for (index, definition) in definitions.iter().enumerate() {
            debug_log!("Registering route {}: {}", definition.name, definition.path);
            router
                .insert(definition.path, index)
                .map_err(|e| RouteError::InvalidPattern {
                    pattern: definition.path.to_string(),
                    message: e.to_string(),
                })?;

            slots.push(RouteSlot {
                definition: *definition,
                module: OnceLock::new(),
                loads: AtomicUsize::new(0),
            });
        }

        let table = Self { router, slots };
        for slot in &table.slots {
            if slot.definition.loading == RouteLoading::Eager {
                slot.module();
            }
        }

        Ok(table)
    }

    /// Matches a location (path plus optional query and fragment). Performs
    /// no access check.
    pub fn resolve(&self, location: &str) -> Result<RouteMatch<'_>, RouteError> {
        let (path, query) = split_location(location);

        let matched = self
            .router
            .at(&path)
            .map_err(|_| RouteError::NotFound(path.clone()))?;
        let slot = &self.slots[*matched.value];

        let params = matched
            .params
            .iter()
            .map(|(key, value)| {
                let decoded = urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string());
                (key.to_string(), decoded)
            })
            .collect();

        Ok(RouteMatch {
            name: slot.definition.name,
            view: slot.definition.view,
            access: slot.definition.access,
            module: slot.module(),
            params,
            query: parse_query_string(query),
        })
    }

    /// `resolve` plus the session check for [`RouteAccess::Authenticated`]
    /// routes. Lazy modules of guarded routes are not loaded on redirect.
    pub fn navigate(
        &self,
        location: &str,
        session: &SessionStore,
    ) -> Result<Navigation<'_>, RouteError> {
        let (path, _) = split_location(location);
        let matched = self
            .router
            .at(&path)
            .map_err(|_| RouteError::NotFound(path.clone()))?;
        let slot = &self.slots[*matched.value];

        if slot.definition.access == RouteAccess::Authenticated && !session.is_authenticated() {
            debug_log!("Redirecting {} to {LOGIN_PATH}: no session", slot.definition.name);
            return Ok(Navigation::Redirect {
                to: LOGIN_PATH,
                from: path,
            });
        }

        self.resolve(location).map(Navigation::Render)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.slot(name).is_some_and(|slot| slot.module.get().is_some())
    }

    /// How many times the named route's loader ran. At most one.
    pub fn load_count(&self, name: &str) -> usize {
        self.slot(name)
            .map(|slot| slot.loads.load(Ordering::Relaxed))
            .unwrap_or_default()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.slots.iter().map(|slot| &slot.definition)
    }

    fn slot(&self, name: &str) -> Option<&RouteSlot> {
        self.slots.iter().find(|slot| slot.definition.name == name)
    }
}

fn split_location(location: &str) -> (String, &str) {
    let without_fragment = location.split('#').next().unwrap_or_default();
    let (path, query) = without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""));

    let trimmed = path.trim_end_matches('/');
    let path = if trimmed.is_empty() {
        HOME_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    (path, query)
}

pub fn parse_query_string(query: &str) -> BTreeMap<String, String> {
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}
