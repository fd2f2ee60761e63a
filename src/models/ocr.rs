//! OCR 识别结果模型
//!
//! `/ocr/upload` 与 `/ocr/base64` 共用同一响应结构

use crate::error::{AppError, AppResult, Failure};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 单个文本块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailBlock {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// 服务端原样返回的边界框（通常为坐标数组）
    #[serde(default, rename = "bbox")]
    pub bounding_box: Option<Value>,
}

/// 单个 webhook 的投递结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub config_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookDelivery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<WebhookResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ProcessingSummary {
    #[serde(default)]
    method: Option<String>,
}

/// 识别接口的原始响应
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OcrResponse {
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    document_id: Option<String>,
    #[serde(default)]
    patient_id: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    extracted_text: Option<String>,
    #[serde(default)]
    text_count: Option<u64>,
    #[serde(default)]
    confidence_score: Option<f64>,
    #[serde(default)]
    processing_time: Option<f64>,
    #[serde(default)]
    processing_summary: Option<ProcessingSummary>,
    #[serde(default)]
    results: Option<Vec<DetailBlock>>,
    #[serde(default)]
    webhook_delivery: Option<WebhookDelivery>,
}

/// 一次成功的识别
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Submission {
    pub document_id: Option<String>,
    pub patient_id: Option<String>,
    pub filename: Option<String>,
    pub extracted_text: Option<String>,
    pub text_count: Option<u64>,
    pub confidence_score: Option<f64>,
    pub processing_time: Option<f64>,
    pub processing_method: Option<String>,
    pub detail_blocks: Vec<DetailBlock>,
    pub webhook_delivery: Option<WebhookDelivery>,
}

/// 提交结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionResult {
    Success(Submission),
    Failure(Failure),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success(_))
    }

    pub fn submission(&self) -> Option<&Submission> {
        match self {
            SubmissionResult::Success(s) => Some(s),
            SubmissionResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            SubmissionResult::Success(_) => None,
            SubmissionResult::Failure(f) => Some(f),
        }
    }

    /// 成功且服务端分配了文档ID时返回该ID
    pub fn document_id(&self) -> Option<&str> {
        self.submission().and_then(|s| s.document_id.as_deref())
    }
}

impl From<AppError> for SubmissionResult {
    fn from(err: AppError) -> Self {
        SubmissionResult::Failure(err.into())
    }
}

impl OcrResponse {
    /// 在边界处校验并转换为 [`Submission`]
    pub(crate) fn into_submission(self, endpoint: &str) -> AppResult<Submission> {
        let success = self
            .success
            .ok_or_else(|| AppError::malformed(endpoint, "缺少 success 字段"))?;

        if !success {
            return Err(AppError::Rejected {
                endpoint: endpoint.to_string(),
                message: self.error.unwrap_or_else(|| "未知错误".to_string()),
            });
        }

        Ok(Submission {
            document_id: self.document_id.filter(|id| !id.is_empty()),
            patient_id: self.patient_id,
            filename: self.filename,
            extracted_text: self.extracted_text,
            text_count: self.text_count,
            confidence_score: self.confidence_score,
            processing_time: self.processing_time,
            processing_method: self.processing_summary.and_then(|s| s.method),
            detail_blocks: self.results.unwrap_or_default(),
            webhook_delivery: self.webhook_delivery,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn parse(value: Value) -> AppResult<Submission> {
        serde_json::from_value::<OcrResponse>(value)
            .unwrap()
            .into_submission("/ocr/upload")
    }

    #[test]
    fn test_full_response_converts() {
        let submission = parse(json!({
            "success": true,
            "document_id": "doc-1",
            "filename": "brain.png",
            "extracted_text": "T2 FLAIR",
            "text_count": 1,
            "confidence_score": 0.93,
            "processing_summary": { "method": "paddleocr" },
            "results": [{ "text": "T2 FLAIR", "confidence": 0.93, "bbox": [[0, 0], [10, 0]] }],
            "webhook_delivery": {
                "status": "delivered",
                "results": [{ "success": true, "config_name": "ehr", "url": "http://ehr/hook" }]
            }
        }))
        .unwrap();

        assert_eq!(submission.document_id.as_deref(), Some("doc-1"));
        assert_eq!(submission.processing_method.as_deref(), Some("paddleocr"));
        assert_eq!(submission.detail_blocks.len(), 1);
        assert_eq!(
            submission.detail_blocks[0].bounding_box,
            Some(json!([[0, 0], [10, 0]]))
        );
        assert_eq!(submission.webhook_delivery.unwrap().results.len(), 1);
    }

    #[test]
    fn test_missing_success_is_malformed() {
        let err = parse(json!({ "document_id": "doc-1" })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_success_false_is_rejected() {
        let err = parse(json!({ "success": false, "error": "unsupported file" })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert!(err.to_string().contains("unsupported file"));
    }

    #[test]
    fn test_empty_document_id_is_dropped() {
        let submission = parse(json!({ "success": true, "document_id": "" })).unwrap();
        assert_eq!(submission.document_id, None);
    }
}
