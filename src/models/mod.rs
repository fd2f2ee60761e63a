pub mod document;
pub mod mime;
pub mod ocr;
pub mod service;

pub use document::{DocumentRecord, PatientDocuments, StoredDocument};
pub use mime::{file_extension, mime_from_filename};
pub use ocr::{DetailBlock, Submission, SubmissionResult, WebhookDelivery, WebhookResult};
pub use service::{HealthStatus, LanguageSupport};
