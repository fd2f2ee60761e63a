//! 文档记录模型

use crate::error::{AppError, AppResult, Failure};
use serde::{Deserialize, Serialize};

/// 服务端存储的文档
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(alias = "id", alias = "_id")]
    pub document_id: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    /// MIME 类型
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default, rename = "file_size")]
    pub file_size_bytes: Option<u64>,
    /// 仅在 `include_base64=true` 时返回
    #[serde(default)]
    pub base64_data: Option<String>,
}

/// 文档查询结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub success: bool,
    pub document: Option<StoredDocument>,
    pub error: Option<Failure>,
}

impl DocumentRecord {
    pub fn found(document: StoredDocument) -> Self {
        Self {
            success: true,
            document: Some(document),
            error: None,
        }
    }

    pub fn failed(failure: Failure) -> Self {
        Self {
            success: false,
            document: None,
            error: Some(failure),
        }
    }

    /// 成功且带有原图数据时返回该文档
    pub fn with_payload(&self) -> Option<&StoredDocument> {
        if !self.success {
            return None;
        }
        self.document
            .as_ref()
            .filter(|doc| doc.base64_data.as_deref().is_some_and(|data| !data.is_empty()))
    }
}

impl From<AppError> for DocumentRecord {
    fn from(err: AppError) -> Self {
        DocumentRecord::failed(err.into())
    }
}

/// `/documents/{id}` 的原始响应
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DocumentResponse {
    success: Option<bool>,
    #[serde(default)]
    document: Option<StoredDocument>,
    #[serde(default)]
    error: Option<String>,
}

impl DocumentResponse {
    pub(crate) fn into_document(self, endpoint: &str) -> AppResult<StoredDocument> {
        match self.success {
            None => Err(AppError::malformed(endpoint, "缺少 success 字段")),
            Some(false) => Err(AppError::Rejected {
                endpoint: endpoint.to_string(),
                message: self.error.unwrap_or_else(|| "未知错误".to_string()),
            }),
            Some(true) => self
                .document
                .ok_or_else(|| AppError::malformed(endpoint, "缺少 document 字段")),
        }
    }
}

/// `/patients/{id}/documents` 的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDocuments {
    pub patient_id: String,
    #[serde(default)]
    pub documents: Vec<StoredDocument>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub storage_type: Option<String>,
}
