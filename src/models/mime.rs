//! MIME 类型与文件扩展名映射

use phf::phf_map;

static EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "image/jpeg" => "jpg",
    "image/jpg" => "jpg",
    "image/png" => "png",
    "image/gif" => "gif",
    "image/bmp" => "bmp",
    "image/tiff" => "tiff",
    "image/webp" => "webp",
};

/// 未识别的 MIME 类型一律按 png 处理
pub fn file_extension(mime_type: &str) -> &'static str {
    EXTENSIONS.get(mime_type).copied().unwrap_or("png")
}

/// 根据文件名推断上传时使用的 MIME 类型
pub fn mime_from_filename(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
