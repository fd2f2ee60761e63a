//! OCR 处理流程 - 流程层
//!
//! 核心职责：定义"一张图片"的完整处理流程
//!
//! 流程顺序：
//! 1. 上传识别
//! 2. 获取文档（仅当识别成功且返回了文档ID）
//! 3. 渲染报告
//! 4. 保存原图（仅当调用方要求且文档获取成功）
//!
//! 任一步骤失败即停止后续步骤，但仍返回结构化结果

use tracing::{error, info};

use crate::clients::OcrClient;
use crate::error::{ErrorKind, Failure};
use crate::infrastructure::HttpTransport;
use crate::models::SubmissionResult;
use crate::services::{format_for_display, ImageWriter};
use crate::workflow::result::{WorkflowOutcome, WorkflowResult, WorkflowStep};

/// 默认的原图保存文件名
pub const DEFAULT_DOWNLOAD_STEM: &str = "ocr_original_image";

impl<T: HttpTransport, W: ImageWriter> OcrClient<T, W> {
    /// 运行完整流程，原图以 [`DEFAULT_DOWNLOAD_STEM`] 命名
    pub async fn run_workflow(
        &mut self,
        payload: &[u8],
        filename: &str,
        also_persist_locally: bool,
    ) -> WorkflowResult {
        self.run_workflow_with_stem(payload, filename, also_persist_locally, DEFAULT_DOWNLOAD_STEM)
            .await
    }

    /// 运行完整流程，原图以 `stem` 命名
    pub async fn run_workflow_with_stem(
        &mut self,
        payload: &[u8],
        filename: &str,
        also_persist_locally: bool,
        stem: &str,
    ) -> WorkflowResult {
        info!("🚀 开始处理图像: {}", filename);

        // ========== 步骤 1: 上传识别 ==========
        let submitted = self.submit_binary(payload, filename).await;
        let submission = match &submitted {
            SubmissionResult::Success(submission) => submission.clone(),
            SubmissionResult::Failure(failure) => {
                return fail(WorkflowStep::Submit, failure.clone());
            }
        };

        // ========== 步骤 2: 获取文档 ==========
        let document = match submission.document_id.as_deref() {
            Some(id) => {
                let record = self.fetch_document(Some(id)).await;
                if !record.success {
                    let failure = record.error.unwrap_or_else(|| {
                        Failure::new(ErrorKind::MalformedResponse, "文档不可用")
                    });
                    return fail(WorkflowStep::Fetch, failure);
                }
                Some(record)
            }
            None => {
                info!("服务端未返回文档ID，跳过文档获取");
                None
            }
        };

        // ========== 步骤 3: 展示结果 ==========
        let report = format_for_display(&submitted, document.as_ref());
        info!("\n{}", report);

        // ========== 步骤 4: 保存原图 ==========
        let image_saved = match (&document, also_persist_locally) {
            (Some(record), true) if record.success => self.persist_locally(record, stem),
            _ => false,
        };

        info!("✅ 处理流程完成: {}", filename);

        WorkflowResult::Success(WorkflowOutcome {
            submission,
            document,
            report,
            image_saved,
        })
    }
}

fn fail(step: WorkflowStep, failure: Failure) -> WorkflowResult {
    error!("❌ 处理流程在「{}」步骤失败: {}", step, failure);
    WorkflowResult::Failure {
        step,
        error: Failure {
            message: format!("{}失败: {}", step, failure.message),
            ..failure
        },
    }
}
