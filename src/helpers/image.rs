use std::{fs, path::Path};

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::{HelperError, HelperResult};

/// Longest edge a thumbnail decode aims for.
pub const THUMBNAIL_EDGE: u32 = 200;

pub fn encode_image_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes a base64 image payload. Line breaks and other whitespace, as
/// produced by MIME-style encoders, are ignored.
pub fn decode_image_base64(encoded: &str) -> HelperResult<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(HelperError::EmptyImage);
    }
    Ok(STANDARD.decode(compact)?)
}

pub fn read_image_base64(path: impl AsRef<Path>) -> HelperResult<String> {
    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Err(HelperError::EmptyImage);
    }
    Ok(encode_image_base64(&bytes))
}

pub fn write_image_from_base64(path: impl AsRef<Path>, encoded: &str) -> HelperResult<usize> {
    let bytes = decode_image_base64(encoded)?;
    fs::write(path, &bytes)?;
    Ok(bytes.len())
}

/// Largest power-of-two subsampling factor that keeps both dimensions at or
/// above the requested size.
pub fn calculate_in_sample_size(width: u32, height: u32, req_width: u32, req_height: u32) -> u32 {
    let mut sample = 1;
    if height > req_height || width > req_width {
        let half_height = height / 2;
        let half_width = width / 2;
        while half_height / sample >= req_height && half_width / sample >= req_width {
            sample *= 2;
        }
    }
    sample
}
