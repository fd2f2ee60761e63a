//! HTTP 传输层 - 基础设施层
//!
//! 持有唯一的 reqwest::Client，只暴露"发请求"的能力

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 原始 HTTP 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 上传文件描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// 表单字段名
    pub field: String,
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// HTTP 传输能力
///
/// 职责：
/// - 只负责把请求发出去并拿回状态码与响应体
/// - 不解析业务字段，不判断状态码
/// - 连接失败等网络错误统一转换为 [`AppError::Transport`]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_multipart(&self, url: &str, file: FilePart) -> AppResult<HttpResponse>;

    async fn post_json(&self, url: &str, body: &JsonValue) -> AppResult<HttpResponse>;

    async fn get(&self, url: &str) -> AppResult<HttpResponse>;
}

/// 基于 reqwest 的传输实现
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 创建新的传输实现
    pub fn new() -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("无法创建 HTTP 客户端: {}", e)))?;
        Ok(Self { client })
    }

    /// 使用已有的 reqwest::Client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn read(url: &str, response: reqwest::Response) -> AppResult<HttpResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::transport(url, e))?;

        debug!("响应 {} -> status {}, {} 字节", url, status, body.len());

        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_multipart(&self, url: &str, file: FilePart) -> AppResult<HttpResponse> {
        debug!("POST multipart {} ({}, {} 字节)", url, file.filename, file.bytes.len());

        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.mime_type)
            .map_err(|e| AppError::transport(url, e))?;
        let form = Form::new().part(file.field, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::transport(url, e))?;

        Self::read(url, response).await
    }

    async fn post_json(&self, url: &str, body: &JsonValue) -> AppResult<HttpResponse> {
        debug!("POST json {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::transport(url, e))?;

        Self::read(url, response).await
    }

    async fn get(&self, url: &str) -> AppResult<HttpResponse> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::transport(url, e))?;

        Self::read(url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let transport = ReqwestTransport::new().unwrap();
        // 端口 9 (discard) 在测试环境中通常无人监听
        let err = transport
            .get("http://127.0.0.1:9/health")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Transport);
    }
}
