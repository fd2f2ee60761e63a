use crate::clients::OcrClient;
use crate::config::Config;
use crate::infrastructure::{HttpTransport, ReqwestTransport};
use crate::services::{format_for_display, DirectoryWriter, ImageWriter};
use crate::sources::{ImageInput, ImageSource};
use crate::utils::logging::{log_startup, print_final_stats, truncate_text};
use crate::workflow::WorkflowResult;
use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App<T = ReqwestTransport, W = DirectoryWriter> {
    config: Config,
    client: OcrClient<T, W>,
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = OcrClient::new(&config)?;
        let app = Self::with_client(config, client);
        app.probe_health().await;

        Ok(app)
    }
}

impl<T: HttpTransport, W: ImageWriter> App<T, W> {
    /// 使用已构建的客户端创建应用
    pub fn with_client(config: Config, client: OcrClient<T, W>) -> Self {
        Self { config, client }
    }

    pub fn client(&self) -> &OcrClient<T, W> {
        &self.client
    }

    /// 服务不可用时只告警，具体失败交给每次处理去报告
    async fn probe_health(&self) {
        match self.client.health_check().await {
            Ok(health) if health.is_healthy() => {
                info!(
                    "✓ OCR 服务可用: {} {}",
                    health.service.as_deref().unwrap_or("N/A"),
                    health.version.as_deref().unwrap_or("")
                );
            }
            Ok(health) => warn!("⚠️ OCR 服务状态异常: {}", health.status),
            Err(e) => warn!("⚠️ OCR 服务健康检查失败: {}", e),
        }
    }

    /// 订阅图片来源并逐张处理
    pub async fn run<S: ImageSource>(&mut self, source: S) -> Result<ProcessingStats> {
        let mut events = source.spawn();
        let mut stats = ProcessingStats::default();

        while let Some(input) = events.recv().await {
            stats.total += 1;
            if self.process(&input).await {
                stats.success += 1;
            } else {
                stats.failed += 1;
            }
        }

        if stats.total == 0 {
            warn!("⚠️ 没有找到待处理的图片，程序结束");
        }

        print_final_stats(stats.success, stats.failed, stats.total);

        Ok(stats)
    }

    /// 处理单张图片，返回是否成功
    async fn process(&mut self, input: &ImageInput) -> bool {
        let Some(secs) = self.config.workflow_timeout_secs else {
            return self.dispatch(input).await;
        };

        match tokio::time::timeout(Duration::from_secs(secs), self.dispatch(input)).await {
            Ok(success) => success,
            Err(_) => {
                // 超时后未完成的请求直接丢弃
                error!("❌ 处理超时 ({} 秒): {}", secs, input.label());
                false
            }
        }
    }

    async fn dispatch(&mut self, input: &ImageInput) -> bool {
        match input {
            ImageInput::Binary { filename, bytes } => self.process_binary(filename, bytes).await,
            ImageInput::Base64 { label, data } => self.process_base64(label, data).await,
        }
    }

    /// 上传 → 获取文档 → 展示 → 保存
    async fn process_binary(&mut self, filename: &str, bytes: &[u8]) -> bool {
        let stem = download_stem(&self.config.download_stem, filename);
        let result = self
            .client
            .run_workflow_with_stem(bytes, filename, self.config.save_image, &stem)
            .await;

        match result {
            WorkflowResult::Success(outcome) => {
                log_extracted(filename, outcome.submission.extracted_text.as_deref());
                true
            }
            WorkflowResult::Failure { step, error } => {
                error!("❌ {} 处理失败 ({}): {}", filename, step, error);
                false
            }
        }
    }

    /// base64 识别后直接展示结果
    async fn process_base64(&mut self, label: &str, data: &str) -> bool {
        let result = self.client.submit_base64(data).await;
        info!("\n{}", format_for_display(&result, None));

        match result.failure() {
            None => {
                let text = result.submission().and_then(|s| s.extracted_text.as_deref());
                log_extracted(label, text);
                true
            }
            Some(failure) => {
                error!("❌ {} 处理失败: {}", label, failure);
                false
            }
        }
    }
}

fn log_extracted(label: &str, text: Option<&str>) {
    if let Some(text) = text {
        info!("📝 {}: {}", label, truncate_text(text, 80));
    }
}

/// 原图保存名：`{前缀}_{输入文件名去扩展名}`
fn download_stem(prefix: &str, filename: &str) -> String {
    match Path::new(filename).file_stem() {
        Some(stem) => format!("{}_{}", prefix, stem.to_string_lossy()),
        None => prefix.to_string(),
    }
}
