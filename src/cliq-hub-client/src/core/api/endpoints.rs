// src/core/api/endpoints.rs
use crate::config::ClientConfig;
use crate::core::types::TemplateID;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const GENERATE_PATH: &str = "/generate";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    auth_base: String,
    templates_base: String,
}

impl Endpoints {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            auth_base: config.auth_base(),
            templates_base: config.templates_base(),
        }
    }

    pub fn login(&self) -> String {
        format!("{}{LOGIN_PATH}", self.auth_base)
    }

    pub fn register(&self) -> String {
        format!("{}{REGISTER_PATH}", self.auth_base)
    }

    pub fn templates(&self) -> String {
        self.templates_base.clone()
    }

    pub fn template(&self, id: &TemplateID) -> String {
        format!("{}/{}", self.templates_base, id.to_path_segment())
    }

    pub fn generate(&self) -> String {
        format!("{}{GENERATE_PATH}", self.templates_base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_paths() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.login(), "http://localhost:8080/v1/auth/login");
        assert_eq!(endpoints.register(), "http://localhost:8080/v1/auth/register");
        assert_eq!(endpoints.templates(), "http://localhost:8080/v1/templates");
        assert_eq!(
            endpoints.template(&TemplateID::from(42u64)),
            "http://localhost:8080/v1/templates/42"
        );
        assert_eq!(
            endpoints.generate(),
            "http://localhost:8080/v1/templates/generate"
        );
    }
}
