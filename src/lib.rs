//! # OCR Orchestrator
//!
//! 一个调用远程 OCR 服务识别图像的 Rust 客户端
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（reqwest::Client），只暴露能力
//! - `HttpTransport` - 发送请求、拿回状态码与响应体
//!
//! ### ② 业务能力层（Services / Models）
//! - `models/` - 响应结构及边界校验
//! - `services/report` - 渲染识别报告
//! - `services/image_writer` - 保存原图
//!
//! ### ③ 客户端与流程层（Clients / Workflow）
//! - `OcrClient` - 持有会话，提供提交、查询、保存操作
//! - `workflow/` - 上传 → 获取文档 → 展示 → 保存
//!
//! ### ④ 应用层（App）
//! - `sources/` - 图片事件来源
//! - `App` - 订阅来源、控制超时、输出统计
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod services;
pub mod sources;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, ProcessingStats};
pub use clients::{strip_data_uri_prefix, OcrClient, Session};
pub use config::Config;
pub use error::{AppError, AppResult, ErrorKind, Failure};
pub use infrastructure::{FilePart, HttpResponse, HttpTransport, ReqwestTransport};
pub use models::{
    file_extension, DocumentRecord, StoredDocument, Submission, SubmissionResult,
};
pub use services::{format_file_size, format_for_display, DirectoryWriter, ImageWriter};
pub use sources::{FileListSource, ImageInput, ImageSource};
pub use workflow::{WorkflowOutcome, WorkflowResult, WorkflowStep};
