// src/core/state/templates/types.rs
use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::types::TemplateID;
use crate::error::ClientError;

/// One entry of the hub's template listing. The client does not validate
/// its shape; the accessors simply give up on anything unexpected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSummary(pub Value);

/// A single template as returned by `GET /templates/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateDetail(pub Value);

macro_rules! payload_accessors {
    ($name:ident) => {
        impl $name {
            pub fn raw(&self) -> &Value {
                &self.0
            }

            /// The hub serializes its primary key as `ID`; `id` is accepted too.
            pub fn id(&self) -> Option<TemplateID> {
                ["ID", "id"]
                    .iter()
                    .find_map(|field| self.0.get(field))
                    .and_then(|id| match id {
                        Value::Number(n) => n.as_u64().map(TemplateID::from),
                        Value::String(s) => Some(TemplateID::from(s.as_str())),
                        _ => None,
                    })
            }

            pub fn title(&self) -> Option<&str> {
                self.0.get("title").and_then(Value::as_str)
            }

            pub fn description(&self) -> Option<&str> {
                self.0.get("description").and_then(Value::as_str)
            }
        }
    };
}

payload_accessors!(TemplateSummary);
payload_accessors!(TemplateDetail);

impl TemplateDetail {
    /// YAML body of the template.
    pub fn content(&self) -> Option<&str> {
        self.0.get("content").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateCollectionState {
    pub templates: Vec<TemplateSummary>,
    pub current_template: Option<TemplateDetail>,
}

/// Upload payload accepted by `POST /templates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTemplate {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YamlEncoding {
    #[default]
    Plain,
    Base64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub command_example: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<YamlEncoding>,
}

impl GenerateRequest {
    pub fn new(command_example: impl Into<String>) -> Self {
        Self {
            command_example: command_example.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTemplate {
    pub yaml: String,
    #[serde(default)]
    pub encoding: YamlEncoding,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

impl GeneratedTemplate {
    /// The YAML document, decoded if the hub sent it as base64.
    pub fn yaml_text(&self) -> Result<String, ClientError> {
        match self.encoding {
            YamlEncoding::Plain => Ok(self.yaml.clone()),
            YamlEncoding::Base64 => {
                let bytes = STANDARD
                    .decode(self.yaml.trim())
                    .map_err(|e| ClientError::Decode(format!("generated yaml is not base64: {e}")))?;
                String::from_utf8(bytes)
                    .map_err(|e| ClientError::Decode(format!("generated yaml is not utf-8: {e}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_tolerate_any_shape() {
        let summary = TemplateSummary(json!({"ID": 3, "title": "ffmpeg", "downloads": 9}));
        assert_eq!(summary.id(), Some(TemplateID::from(3u64)));
        assert_eq!(summary.title(), Some("ffmpeg"));
        assert_eq!(summary.description(), None);

        let odd = TemplateSummary(json!(["not", "an", "object"]));
        assert_eq!(odd.id(), None);
        assert_eq!(odd.title(), None);
    }

    #[test]
    fn base64_yaml_is_decoded() {
        let generated = GeneratedTemplate {
            yaml: STANDARD.encode("name: demo\n"),
            encoding: YamlEncoding::Base64,
            meta: BTreeMap::new(),
        };
        assert_eq!(generated.yaml_text().unwrap(), "name: demo\n");

        let broken = GeneratedTemplate {
            yaml: "%%%".to_string(),
            ..generated
        };
        assert!(matches!(broken.yaml_text(), Err(ClientError::Decode(_))));
    }

    #[test]
    fn generate_request_omits_blank_fields() {
        let body = serde_json::to_value(GenerateRequest::new("ffmpeg -i in.mp4 out.gif")).unwrap();
        assert_eq!(body, json!({"command_example": "ffmpeg -i in.mp4 out.gif"}));
    }
}
