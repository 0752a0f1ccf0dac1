use std::io::Cursor;

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use image::{DynamicImage, ImageFormat};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::errors::ImportError;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Cuts `s` to at most `max` characters. Returns `None` when nothing was cut.
pub fn truncate_chars(s: &str, max: usize) -> Option<String> {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => Some(s[..byte_idx].to_string()),
        None => None,
    }
}

/// Re-encodes a cover picture as JPEG if needed and returns it base64 encoded,
/// the form the playlist image upload expects.
pub fn encode_cover_jpeg_base64(bytes: &[u8]) -> Result<String, ImportError> {
    let format = image::guess_format(bytes)?;

    let jpeg = if format == ImageFormat::Jpeg {
        bytes.to_vec()
    } else {
        let img = image::load_from_memory_with_format(bytes, format)?;
        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
        let mut out = Cursor::new(Vec::new());
        rgb.write_to(&mut out, ImageFormat::Jpeg)?;
        out.into_inner()
    };

    Ok(STANDARD.encode(jpeg))
}

/// Number of batches `len` ids split into with at most `batch_size` per batch.
pub fn batch_count(len: usize, batch_size: usize) -> usize {
    len.div_ceil(batch_size)
}
