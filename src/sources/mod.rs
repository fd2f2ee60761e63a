//! 图片来源
//!
//! 待处理的图片以事件的形式推送给订阅方，
//! 客户端本身不关心图片从哪里来

pub mod file_list;

pub use file_list::FileListSource;

use tokio::sync::mpsc;

/// 一张待处理的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// 原始图片字节，走文件上传接口
    Binary { filename: String, bytes: Vec<u8> },
    /// base64 文本（可带 `data:image/...;base64,` 前缀），走 base64 接口
    Base64 { label: String, data: String },
}

impl ImageInput {
    /// 日志中展示的名称
    pub fn label(&self) -> &str {
        match self {
            ImageInput::Binary { filename, .. } => filename,
            ImageInput::Base64 { label, .. } => label,
        }
    }
}

/// 图片事件生产者
pub trait ImageSource: Send + 'static {
    /// 启动生产者，返回事件接收端；生产结束后通道关闭
    fn spawn(self) -> mpsc::Receiver<ImageInput>;
}
