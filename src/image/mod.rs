pub mod image_rs_detector;
pub mod mime;
