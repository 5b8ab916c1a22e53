pub mod still_image_source;
pub mod synthetic_source;
