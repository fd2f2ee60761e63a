#![allow(dead_code)]

use async_trait::async_trait;
use ocr_orchestrator::{
    AppError, AppResult, FilePart, HttpResponse, HttpTransport, ImageInput, ImageSource,
    ImageWriter, OcrClient,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://ocr.test";

/// 已发出的请求
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Multipart { url: String, file: FilePart },
    Json { url: String, body: Value },
    Get { url: String },
}

impl Recorded {
    pub fn url(&self) -> &str {
        match self {
            Recorded::Multipart { url, .. }
            | Recorded::Json { url, .. }
            | Recorded::Get { url } => url,
        }
    }
}

type Scripted = (Duration, AppResult<HttpResponse>);

/// 按顺序返回预设响应的传输层
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.respond_raw(status, &body.to_string())
    }

    pub fn respond_raw(self, status: u16, body: &str) -> Self {
        self.script(Duration::ZERO, Ok(HttpResponse::new(status, body)))
    }

    /// 等待 `delay` 后才返回响应
    pub fn respond_after(self, delay: Duration, status: u16, body: Value) -> Self {
        self.script(delay, Ok(HttpResponse::new(status, &body.to_string())))
    }

    pub fn refuse_connection(self) -> Self {
        let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        self.script(Duration::ZERO, Err(AppError::transport(BASE_URL, err)))
    }

    fn script(self, delay: Duration, response: AppResult<HttpResponse>) -> Self {
        self.responses.lock().unwrap().push_back((delay, response));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    async fn next(&self, recorded: Recorded) -> AppResult<HttpResponse> {
        let url = recorded.url().to_string();
        self.requests.lock().unwrap().push(recorded);

        let scripted = self.responses.lock().unwrap().pop_front();
        let Some((delay, response)) = scripted else {
            return Err(AppError::transport(
                url,
                std::io::Error::new(std::io::ErrorKind::Other, "no scripted response"),
            ));
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_multipart(&self, url: &str, file: FilePart) -> AppResult<HttpResponse> {
        self.next(Recorded::Multipart {
            url: url.to_string(),
            file,
        })
        .await
    }

    async fn post_json(&self, url: &str, body: &Value) -> AppResult<HttpResponse> {
        self.next(Recorded::Json {
            url: url.to_string(),
            body: body.clone(),
        })
        .await
    }

    async fn get(&self, url: &str) -> AppResult<HttpResponse> {
        self.next(Recorded::Get {
            url: url.to_string(),
        })
        .await
    }
}

/// 保存到内存的写入器
#[derive(Default)]
pub struct MemoryWriter {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryWriter {
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files.lock().unwrap().clone()
    }
}

impl ImageWriter for MemoryWriter {
    fn write(&self, filename: &str, bytes: &[u8]) -> AppResult<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}

/// 按顺序推送预设图片的来源
pub struct VecSource(pub Vec<ImageInput>);

impl ImageSource for VecSource {
    fn spawn(self) -> mpsc::Receiver<ImageInput> {
        let (tx, rx) = mpsc::channel(self.0.len().max(1));
        tokio::spawn(async move {
            for input in self.0 {
                if tx.send(input).await.is_err() {
                    break;
                }
            }
        });
        rx
    }
}

pub fn binary(filename: &str, bytes: &[u8]) -> ImageInput {
    ImageInput::Binary {
        filename: filename.to_string(),
        bytes: bytes.to_vec(),
    }
}

pub fn client(transport: MockTransport) -> OcrClient<MockTransport, MemoryWriter> {
    let _ = tracing_subscriber::fmt::try_init();
    OcrClient::with_parts(BASE_URL, transport, MemoryWriter::default())
}

pub fn ocr_success(document_id: &str) -> Value {
    serde_json::json!({
        "success": true,
        "document_id": document_id,
        "filename": "brain_mri.png",
        "extracted_text": "AXIAL T2 FLAIR",
        "text_count": 1,
        "confidence_score": 0.92,
        "processing_time": 1.25,
        "processing_summary": { "method": "paddleocr" },
        "results": [
            {
                "text": "AXIAL T2 FLAIR",
                "confidence": 0.92,
                "bbox": [[10, 10], [120, 10], [120, 30], [10, 30]]
            }
        ]
    })
}

pub fn document_success(document_id: &str, file_type: &str, base64_data: Option<&str>) -> Value {
    serde_json::json!({
        "success": true,
        "document": {
            "document_id": document_id,
            "patient_id": "patient-7",
            "filename": "brain_mri.png",
            "file_type": file_type,
            "file_size": 2048,
            "base64_data": base64_data
        },
        "storage_type": "Mock Storage"
    })
}
