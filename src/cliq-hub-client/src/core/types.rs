// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserID(pub u64);

impl fmt::Display for UserID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path segment naming a template on the hub. Kept as text since the
/// client never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateID(pub String);

impl TemplateID {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form, safe to splice into a URL path.
    pub fn to_path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl fmt::Display for TemplateID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for TemplateID {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for TemplateID {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TemplateID {
    fn from(id: String) -> Self {
        Self(id)
    }
}
