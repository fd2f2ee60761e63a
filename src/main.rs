use anyhow::Result;
use ocr_orchestrator::{logger, App, Config, FileListSource};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let mut config = Config::load()?;

    // 初始化日志
    if config.verbose_logging {
        logger::init_with_level("debug");
    } else {
        logger::init();
    }

    // 命令行参数追加到待处理列表
    config
        .input_files
        .extend(std::env::args().skip(1).map(PathBuf::from));

    let source = FileListSource::new(config.input_files.clone());

    // 初始化并运行应用
    let mut app = App::initialize(config).await?;
    app.run(source).await?;

    Ok(())
}
