//! OCR API 客户端
//!
//! 封装所有与 OCR 服务相关的调用逻辑

use crate::clients::session::Session;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{FilePart, HttpResponse, HttpTransport, ReqwestTransport};
use crate::models::document::DocumentResponse;
use crate::models::ocr::OcrResponse;
use crate::models::{
    file_extension, mime_from_filename, DocumentRecord, HealthStatus, LanguageSupport,
    PatientDocuments, StoredDocument, Submission, SubmissionResult,
};
use crate::services::{DirectoryWriter, ImageWriter};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::LazyLock;
use tracing::{debug, error, info, warn};

const UPLOAD_PATH: &str = "/ocr/upload";
const BASE64_PATH: &str = "/ocr/base64";

static DATA_URI_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/[a-z]+;base64,").expect("data uri 正则无效")
});

/// 去掉开头的 `data:image/<type>;base64,`（最多一次）
pub fn strip_data_uri_prefix(data: &str) -> &str {
    match DATA_URI_PREFIX.find(data) {
        Some(m) => &data[m.end()..],
        None => data,
    }
}

/// OCR 客户端
///
/// - 持有会话（服务地址 + 最近文档ID）
/// - 每个公共操作都在内部消化错误，返回结构化结果
/// - 每次调用只请求一次，不重试
pub struct OcrClient<T = ReqwestTransport, W = DirectoryWriter> {
    session: Session,
    transport: T,
    writer: W,
}

impl OcrClient {
    /// 根据配置创建客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self::with_parts(
            &config.api_base_url,
            ReqwestTransport::new()?,
            DirectoryWriter::with_dir(&config.output_dir),
        ))
    }
}

impl<T: HttpTransport, W: ImageWriter> OcrClient<T, W> {
    /// 使用自定义传输层与保存能力创建客户端
    pub fn with_parts(base_url: impl Into<String>, transport: T, writer: W) -> Self {
        Self {
            session: Session::new(base_url),
            transport,
            writer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_document_id(&self) -> Option<&str> {
        self.session.current_document_id()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// 上传图片文件进行识别
    ///
    /// # 参数
    /// - `payload`: 图片原始字节
    /// - `filename`: 文件名（用于表单与 MIME 推断）
    ///
    /// # 返回
    /// 成功且返回文档ID时会更新会话
    pub async fn submit_binary(&mut self, payload: &[u8], filename: &str) -> SubmissionResult {
        info!("🔍 正在识别图像: {}", filename);

        let file = FilePart {
            field: "file".to_string(),
            filename: filename.to_string(),
            mime_type: mime_from_filename(filename).to_string(),
            bytes: payload.to_vec(),
        };

        let url = self.session.endpoint(UPLOAD_PATH);
        let result = match self.transport.post_multipart(&url, file).await {
            Ok(response) => Self::decode::<OcrResponse>(UPLOAD_PATH, response)
                .and_then(|r| r.into_submission(UPLOAD_PATH)),
            Err(e) => Err(e),
        };

        self.finish_submission(result, "图像识别")
    }

    /// 识别 base64 编码的图片
    ///
    /// 与 [`Self::submit_binary`] 一样，成功时更新会话
    pub async fn submit_base64(&mut self, data: &str) -> SubmissionResult {
        info!("🔍 正在识别 base64 图像 ({} 字符)", data.len());

        let body = json!({ "image": strip_data_uri_prefix(data) });

        let url = self.session.endpoint(BASE64_PATH);
        let result = match self.transport.post_json(&url, &body).await {
            Ok(response) => Self::decode::<OcrResponse>(BASE64_PATH, response)
                .and_then(|r| r.into_submission(BASE64_PATH)),
            Err(e) => Err(e),
        };

        self.finish_submission(result, "base64 图像识别")
    }

    /// 查询文档（包含原图 base64）
    ///
    /// 未指定 `document_id`（或为空串）时使用会话中的文档ID，
    /// 二者都没有则直接失败，不发请求
    pub async fn fetch_document(&self, document_id: Option<&str>) -> DocumentRecord {
        let explicit = document_id.filter(|id| !id.is_empty());
        let Some(id) = explicit.or(self.session.current_document_id()) else {
            let err = AppError::MissingPrerequisite {
                operation: "fetch_document",
                missing: "没有可用的文档ID".to_string(),
            };
            error!("❌ 获取文档失败: {}", err);
            return err.into();
        };

        info!("📄 正在获取文档: {}", id);

        match self.request_document(id).await {
            Ok(document) => {
                info!("✅ 文档获取完成: {}", document.document_id);
                DocumentRecord::found(document)
            }
            Err(e) => {
                error!("❌ 获取文档失败: {}", e);
                e.into()
            }
        }
    }

    /// 把文档中的原图保存到本地
    ///
    /// 文件名为 `{stem}.{ext}`，扩展名由 `file_type` 推断。
    /// 文档无效或缺少原图数据时返回 `false`，不产生任何写入
    pub fn persist_locally(&self, document: &DocumentRecord, stem: &str) -> bool {
        let Some(doc) = document.with_payload() else {
            error!("❌ 文档无效或缺少 base64 数据，无法保存原图");
            return false;
        };
        let encoded = doc.base64_data.as_deref().unwrap_or_default();

        let bytes = match STANDARD.decode(encoded) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("❌ 原图 base64 解码失败 (文档 {}): {}", doc.document_id, e);
                return false;
            }
        };

        let mime_type = doc.file_type.as_deref().unwrap_or("image/png");
        let filename = format!("{}.{}", stem, file_extension(mime_type));

        match self.writer.write(&filename, &bytes) {
            Ok(path) => {
                info!("✅ 原图已保存: {}", path.display());
                true
            }
            Err(e) => {
                error!("❌ 保存原图失败: {}", e);
                false
            }
        }
    }

    /// 服务健康检查
    pub async fn health_check(&self) -> AppResult<HealthStatus> {
        let response = self.transport.get(&self.session.endpoint("/health")).await?;
        Self::decode("/health", response)
    }

    /// 查询服务支持的语言与文件格式
    pub async fn supported_languages(&self) -> AppResult<LanguageSupport> {
        let response = self
            .transport
            .get(&self.session.endpoint("/ocr/languages"))
            .await?;
        Self::decode("/ocr/languages", response)
    }

    /// 查询患者的历史文档（不含原图数据）
    pub async fn list_patient_documents(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> AppResult<PatientDocuments> {
        if patient_id.is_empty() {
            return Err(AppError::MissingPrerequisite {
                operation: "list_patient_documents",
                missing: "患者ID为空".to_string(),
            });
        }

        let path = format!("/patients/{}/documents", patient_id);
        let limit = limit.to_string();
        let url = self
            .session
            .url(&["patients", patient_id, "documents"], &[("limit", limit.as_str())])?;
        let response = self.transport.get(&url).await?;
        Self::decode(&path, response)
    }

    async fn request_document(&self, id: &str) -> AppResult<StoredDocument> {
        let path = format!("/documents/{}", id);
        let url = self
            .session
            .url(&["documents", id], &[("include_base64", "true")])?;
        let response = self.transport.get(&url).await?;
        Self::decode::<DocumentResponse>(&path, response)?.into_document(&path)
    }

    /// 统一处理提交结果：成功则推进会话，失败只记录日志
    fn finish_submission(
        &mut self,
        result: AppResult<Submission>,
        what: &str,
    ) -> SubmissionResult {
        match result {
            Ok(submission) => {
                match submission.document_id.as_deref() {
                    Some(id) => {
                        self.session.record_submission(id);
                        info!("✅ {}完成，文档ID: {}", what, id);
                    }
                    None => warn!("⚠️ {}完成，但服务端未返回文档ID", what),
                }
                SubmissionResult::Success(submission)
            }
            Err(e) => {
                error!("❌ {}失败: {}", what, e);
                e.into()
            }
        }
    }

    /// 检查状态码并解析响应体
    fn decode<R: DeserializeOwned>(endpoint: &str, response: HttpResponse) -> AppResult<R> {
        if !response.is_success() {
            return Err(AppError::Status {
                endpoint: endpoint.to_string(),
                status: response.status,
                body: Some(response.body).filter(|b| !b.is_empty()),
            });
        }

        debug!("解析响应 {}: {} 字节", endpoint, response.body.len());

        serde_json::from_str(&response.body)
            .map_err(|e| AppError::malformed(endpoint, format!("JSON 解析失败: {}", e)))
    }
}
