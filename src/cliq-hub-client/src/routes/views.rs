// src/routes/views.rs
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Home,
    Login,
    Register,
    TemplateDetail,
    Upload,
}

impl ViewId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "HomeView",
            Self::Login => "LoginView",
            Self::Register => "RegisterView",
            Self::TemplateDetail => "TemplateDetailView",
            Self::Upload => "UploadView",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the router hands to the view layer once a route resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModule {
    pub view: ViewId,
    pub title: &'static str,
    /// Path params the view reads, in route order.
    pub params: &'static [&'static str],
}

pub fn load_home() -> ViewModule {
    ViewModule {
        view: ViewId::Home,
        title: "Templates",
        params: &[],
    }
}

pub fn load_login() -> ViewModule {
    ViewModule {
        view: ViewId::Login,
        title: "Sign in",
        params: &[],
    }
}

pub fn load_register() -> ViewModule {
    ViewModule {
        view: ViewId::Register,
        title: "Create account",
        params: &[],
    }
}

pub fn load_template_detail() -> ViewModule {
    ViewModule {
        view: ViewId::TemplateDetail,
        title: "Template",
        params: &["id"],
    }
}

pub fn load_upload() -> ViewModule {
    ViewModule {
        view: ViewId::Upload,
        title: "Upload template",
        params: &[],
    }
}
