use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;
use tokio::fs;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::services::format_file_size;
use crate::sources::{ImageInput, ImageSource};

const CHANNEL_CAPACITY: usize = 8;
const DATA_URI_HEAD: &[u8] = b"data:image/";

/// 按顺序读取文件列表
///
/// - `.b64` 文件或以 `data:image/` 开头的文本文件作为 base64 输入
/// - 其余文件按原始图片字节上传
/// - 读取失败的文件记录警告后跳过
pub struct FileListSource {
    paths: Vec<PathBuf>,
}

impl FileListSource {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }
}

impl ImageSource for FileListSource {
    fn spawn(self) -> mpsc::Receiver<ImageInput> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            for path in self.paths {
                let bytes = match fs::read(&path).await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        warn!("⚠️ 无法读取文件 {}: {}", path.display(), e);
                        continue;
                    }
                };

                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());

                info!(
                    "📁 已选择文件: {} ({})",
                    filename,
                    format_file_size(bytes.len() as u64)
                );

                let input = match to_input(filename, bytes) {
                    Ok(input) => input,
                    Err(e) => {
                        warn!("⚠️ base64 文件不是有效的 UTF-8 文本 {}: {}", path.display(), e);
                        continue;
                    }
                };

                if tx.send(input).await.is_err() {
                    // 订阅方已退出
                    break;
                }
            }
        });

        rx
    }
}

fn to_input(filename: String, bytes: Vec<u8>) -> Result<ImageInput, FromUtf8Error> {
    let is_base64_file = Path::new(&filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("b64"));

    if !is_base64_file && !bytes.starts_with(DATA_URI_HEAD) {
        return Ok(ImageInput::Binary { filename, bytes });
    }

    let text = String::from_utf8(bytes)?;
    Ok(ImageInput::Base64 {
        label: filename,
        data: text.trim().to_string(),
    })
}
