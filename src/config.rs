use crate::error::{AppError, AppResult};
use crate::workflow::DEFAULT_DOWNLOAD_STEM;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OCR 服务地址
    pub api_base_url: String,
    /// 原图保存目录
    pub output_dir: PathBuf,
    /// 工作流结束后是否保存原图
    pub save_image: bool,
    /// 保存原图时使用的文件名（不含扩展名）
    pub download_stem: String,
    /// 单次工作流超时（秒），不设置则不限制
    pub workflow_timeout_secs: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 待处理的图片
    pub input_files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            output_dir: PathBuf::from("downloads"),
            save_image: true,
            download_stem: DEFAULT_DOWNLOAD_STEM.to_string(),
            workflow_timeout_secs: None,
            verbose_logging: false,
            input_files: Vec::new(),
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（`OCR_CONFIG_FILE`）→ 环境变量
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("OCR_CONFIG_FILE") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file(path.display().to_string(), e))?;
        Self::from_toml_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("OCR_API_BASE_URL").unwrap_or(self.api_base_url),
            output_dir: std::env::var("OCR_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.output_dir),
            save_image: env_parse("OCR_SAVE_IMAGE").unwrap_or(self.save_image),
            download_stem: std::env::var("OCR_DOWNLOAD_STEM").unwrap_or(self.download_stem),
            workflow_timeout_secs: env_parse("OCR_WORKFLOW_TIMEOUT_SECS")
                .or(self.workflow_timeout_secs),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            input_files: self.input_files,
        }
    }
}

/// 读取并解析环境变量，缺失或无法解析时返回 `None`
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
