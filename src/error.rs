use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 网络请求失败（连接、DNS、读取响应体等）
    #[error("网络请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 服务端返回非 2xx 状态码
    #[error("HTTP 错误 ({endpoint}): status {status}")]
    Status {
        endpoint: String,
        status: u16,
        body: Option<String>,
    },

    /// 操作缺少必要的前置数据
    #[error("缺少前置条件 ({operation}): {missing}")]
    MissingPrerequisite {
        operation: &'static str,
        missing: String,
    },

    /// 响应结构与约定不符
    #[error("响应格式错误 ({endpoint}): {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// 服务端返回 success=false
    #[error("服务端拒绝请求 ({endpoint}): {message}")]
    Rejected { endpoint: String, message: String },

    /// 文件操作错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

/// 错误分类，用于结构化失败结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Status,
    MissingPrerequisite,
    MalformedResponse,
    Rejected,
    File,
    Config,
}

impl AppError {
    /// 创建网络请求失败错误
    pub fn transport(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Transport {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建响应格式错误
    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::MalformedResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// 创建文件错误
    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Transport { .. } => ErrorKind::Transport,
            AppError::Status { .. } => ErrorKind::Status,
            AppError::MissingPrerequisite { .. } => ErrorKind::MissingPrerequisite,
            AppError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            AppError::Rejected { .. } => ErrorKind::Rejected,
            AppError::File { .. } => ErrorKind::File,
            AppError::Config(_) => ErrorKind::Config,
        }
    }

    /// 非 2xx 响应时返回状态码
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 对外暴露的结构化失败信息
///
/// 公共操作不会把 [`AppError`] 抛给调用方，而是转换成该结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }
}

impl From<&AppError> for Failure {
    fn from(err: &AppError) -> Self {
        Self {
            kind: err.kind(),
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl From<AppError> for Failure {
    fn from(err: AppError) -> Self {
        Failure::from(&err)
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
