//! 客户端会话
//!
//! 记录"服务地址 + 最近一次成功提交的文档ID"

use crate::error::{AppError, AppResult};
use reqwest::Url;
use std::fmt::Display;

/// 客户端会话
///
/// `base_url` 构造后不可变；`current_document_id` 只能通过
/// [`Session::record_submission`] 更新，且只在提交成功时调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    base_url: String,
    current_document_id: Option<String>,
}

impl Session {
    /// 创建新的会话，去掉末尾的 `/`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            current_document_id: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn current_document_id(&self) -> Option<&str> {
        self.current_document_id.as_deref()
    }

    /// 拼接完整请求地址，`path` 以 `/` 开头
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 按路径段拼接请求地址
    ///
    /// 每个路径段单独做百分号编码，`/`、`?`、`#` 不会改变请求的路由
    pub fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> AppResult<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Config(format!("无效的服务地址 {}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("服务地址不能拼接路径: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url.into())
    }

    pub(crate) fn record_submission(&mut self, document_id: &str) {
        self.current_document_id = Some(document_id.to_string());
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[服务 {} 当前文档#{}]",
            self.base_url,
            self.current_document_id.as_deref().unwrap_or("-")
        )
    }
}
