pub mod image_writer;
pub mod report;

pub use image_writer::{DirectoryWriter, ImageWriter};
pub use report::{format_file_size, format_for_display};
