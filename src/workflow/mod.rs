pub mod ocr_flow;
pub mod result;

pub use ocr_flow::DEFAULT_DOWNLOAD_STEM;
pub use result::{WorkflowOutcome, WorkflowResult, WorkflowStep};
