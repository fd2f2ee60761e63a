//! 原图保存服务 - 业务能力层
//!
//! 只负责"把字节落到本地"能力，不关心文档结构与流程

use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 本地保存能力
pub trait ImageWriter: Send + Sync {
    /// 写入文件并返回最终路径
    fn write(&self, filename: &str, bytes: &[u8]) -> AppResult<PathBuf>;
}

/// 保存到指定目录
///
/// 职责：
/// - 目录不存在时自动创建
/// - 同名文件直接覆盖
pub struct DirectoryWriter {
    output_dir: PathBuf,
}

impl DirectoryWriter {
    /// 使用当前目录
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }

    /// 使用自定义目录创建
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: dir.into(),
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}

impl ImageWriter for DirectoryWriter {
    fn write(&self, filename: &str, bytes: &[u8]) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| AppError::file(self.output_dir.display().to_string(), e))?;

        let path = self.output_dir.join(filename);
        debug!("写入文件: {} ({} 字节)", path.display(), bytes.len());

        fs::write(&path, bytes).map_err(|e| AppError::file(path.display().to_string(), e))?;

        Ok(path)
    }
}

impl Default for DirectoryWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_directory() {
        let dir = std::env::temp_dir().join(format!("ocr_writer_{}", std::process::id()));
        let writer = DirectoryWriter::with_dir(dir.join("nested"));

        let path = writer.write("scan.png", &[0x89, b'P', b'N', b'G']).unwrap();

        assert_eq!(path, dir.join("nested").join("scan.png"));
        assert_eq!(fs::read(&path).unwrap(), vec![0x89, b'P', b'N', b'G']);

        let _ = fs::remove_dir_all(&dir);
    }
}
