pub mod image;
pub mod json;
pub mod text;
