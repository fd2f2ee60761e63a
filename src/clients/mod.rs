pub mod ocr_client;
pub mod session;

pub use ocr_client::{strip_data_uri_prefix, OcrClient};
pub use session::Session;
