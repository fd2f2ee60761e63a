use serde::{Deserialize, Serialize};

/// `/health` 响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// `/ocr/languages` 响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSupport {
    #[serde(default)]
    pub supported_languages: Vec<String>,
    #[serde(default)]
    pub current_language: Option<String>,
    #[serde(default)]
    pub supported_file_formats: Vec<String>,
}
