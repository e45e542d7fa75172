//! Documentation Module - API documentation generation

use std::collections::HashMap;
use serde::{Serialize, Deserialize};

/// API endpoint documentation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndpointDoc {
    pub path: String,
    pub method: String,
    pub summary: String,
    pub description: String,
    pub parameters: Vec<ParameterDoc>,
    pub responses: Vec<ResponseDoc>,
    pub tags: Vec<String>,
    pub deprecated: bool,
}

/// Parameter documentation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterDoc {
    pub name: String,
    pub location: ParameterLocation,
    pub description: String,
    pub required: bool,
    pub param_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ParameterLocation {
    Path,
    Query,
}

/// Response documentation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResponseDoc {
    pub status_code: u16,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Documentation generator
pub struct DocGenerator {
    endpoints: Vec<EndpointDoc>,
    info: ApiInfo,
}

impl DocGenerator {
    pub fn new(info: ApiInfo) -> Self {
        Self {
            endpoints: vec![],
            info,
        }
    }

    pub fn add_endpoint(&mut self, endpoint: EndpointDoc) {
        self.endpoints.push(endpoint);
    }

    /// Generate OpenAPI spec
    pub fn to_openapi(&self) -> serde_json::Value {
        let mut paths: HashMap<String, serde_json::Value> = HashMap::new();

        for endpoint in &self.endpoints {
            let operation = serde_json::json!({
                "summary": endpoint.summary,
                "description": endpoint.description,
                "tags": endpoint.tags,
                "deprecated": endpoint.deprecated,
                "parameters": endpoint.parameters.iter().map(|p| {
                    serde_json::json!({
                        "name": p.name,
                        "in": match p.location {
                            ParameterLocation::Path => "path",
                            ParameterLocation::Query => "query",
                        },
                        "description": p.description,
                        "required": p.required,
                        "schema": { "type": p.param_type },
                    })
                }).collect::<Vec<_>>(),
                "responses": endpoint.responses.iter().map(|r| {
                    (r.status_code.to_string(), serde_json::json!({
                        "description": r.description,
                    }))
                }).collect::<HashMap<_, _>>(),
            });

            let path_item = paths.entry(endpoint.path.clone())
                .or_insert_with(|| serde_json::json!({}));
            if let Some(obj) = path_item.as_object_mut() {
                obj.insert(endpoint.method.to_lowercase(), operation);
            }
        }

        serde_json::json!({
            "openapi": "3.0.0",
            "info": {
                "title": self.info.title,
                "version": self.info.version,
                "description": self.info.description,
            },
            "paths": paths,
        })
    }

    /// Generate Markdown documentation
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("# {}\n\n", self.info.title));
        md.push_str(&format!("{}\n\n", self.info.description));
        md.push_str(&format!("**Version:** {}\n\n", self.info.version));

        md.push_str("## Endpoints\n\n");
        for endpoint in &self.endpoints {
            md.push_str(&format!("### {} {}\n\n", endpoint.method, endpoint.path));
            md.push_str(&format!("{}\n\n", endpoint.description));

            if !endpoint.parameters.is_empty() {
                md.push_str("**Parameters:**\n\n");
                md.push_str("| Name | Type | Required | Description |\n");
                md.push_str("|------|------|----------|-------------|\n");
                for param in &endpoint.parameters {
                    md.push_str(&format!("| {} | {} | {} | {} |\n",
                        param.name, param.param_type,
                        if param.required { "Yes" } else { "No" },
                        param.description
                    ));
                }
                md.push('\n');
            }

            md.push_str("**Responses:**\n\n");
            for response in &endpoint.responses {
                md.push_str(&format!("- **{}**: {}\n", response.status_code, response.description));
            }
            md.push_str("\n---\n\n");
        }

        md
    }
}
