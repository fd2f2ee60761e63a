//! 结果展示服务 - 业务能力层
//!
//! 只负责把识别结果渲染成可读文本，不发请求、不修改状态

use crate::models::{DocumentRecord, SubmissionResult};

const WIDE_RULE: usize = 60;

/// 逐行累积的报告文本
#[derive(Default)]
struct Report {
    text: String,
}

impl Report {
    fn line(&mut self, line: impl AsRef<str>) {
        self.text.push_str(line.as_ref());
        self.text.push('\n');
    }

    /// 空行 + 分隔线包围的小节标题
    fn section(&mut self, title: &str, rule: &str) {
        self.line(format!("\n{}", rule));
        self.line(title);
        self.line(rule);
    }
}

/// 渲染识别报告
///
/// 相同输入总是得到逐字节相同的输出
pub fn format_for_display(
    result: &SubmissionResult,
    document: Option<&DocumentRecord>,
) -> String {
    let mut out = Report::default();
    let heavy = "=".repeat(WIDE_RULE);
    let light = "-".repeat(WIDE_RULE);

    out.line(&heavy);
    out.line("📋 OCR 识别结果");
    out.line(&heavy);

    let submission = match result {
        SubmissionResult::Success(s) => s,
        SubmissionResult::Failure(f) => {
            out.line(format!("❌ 识别失败: {}", f.message));
            return out.text;
        }
    };

    // 基本信息
    out.line(format!("📄 文件名: {}", or_na(submission.filename.as_deref())));
    out.line(format!("📊 文本数量: {}", submission.text_count.unwrap_or(0)));
    out.line(format!("⏱️  处理耗时: {}", or_na_display(submission.processing_time)));
    out.line(format!("🎯 置信度: {}", or_na_display(submission.confidence_score)));
    out.line(format!(
        "🔧 处理方式: {}",
        or_na(submission.processing_method.as_deref())
    ));

    // 文档信息
    if let Some(doc) = document.filter(|d| d.success).and_then(|d| d.document.as_ref()) {
        let size = format_file_size(doc.file_size_bytes.unwrap_or(0));
        out.line(format!("💾 文档ID: {}", doc.document_id));
        out.line(format!("🏥 患者ID: {}", or_na(doc.patient_id.as_deref())));
        out.line(format!("📁 文件类型: {}", or_na(doc.file_type.as_deref())));
        out.line(format!("📏 文件大小: {}", size));
    }

    // 提取文本
    out.section("📝 提取文本:", &light);
    match submission.extracted_text.as_deref().filter(|t| !t.is_empty()) {
        Some(text) => out.line(text),
        None => out.line("未从该图像中提取到文本"),
    }

    // 详细结果
    out.section("📊 详细结果:", &light);
    if submission.detail_blocks.is_empty() {
        out.line("未检测到独立文本块");
    }
    for (index, block) in submission.detail_blocks.iter().enumerate() {
        let bbox = block
            .bounding_box
            .as_ref()
            .map(|b| b.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        out.line(format!("\n🔍 文本块 {}:", index + 1));
        out.line(format!("   文本: {}", or_na(block.text.as_deref())));
        out.line(format!("   置信度: {}", or_na_display(block.confidence)));
        out.line(format!("   边界框: {}", bbox));
    }

    // Webhook 状态
    if let Some(webhook) = &submission.webhook_delivery {
        out.line(format!(
            "\n🔗 Webhook 状态: {}",
            or_na(webhook.status.as_deref())
        ));
        for hook in &webhook.results {
            let icon = if hook.success { "✅" } else { "❌" };
            out.line(format!(
                "   {} {}: {}",
                icon,
                or_na(hook.config_name.as_deref()),
                or_na(hook.url.as_deref())
            ));
        }
    }

    out.text
}

/// 文件大小转可读格式（1024 进制，最多保留两位小数）
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    while unit + 1 < UNITS.len() && bytes >= 1024u64.pow(unit as u32 + 1) {
        unit += 1;
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("N/A")
}

fn or_na_display<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}
