//! Client-side image preparation.
//!
//! Before an image is sent to the gateway it is downsampled and recompressed
//! to a byte budget: neither dimension above 1920px, JPEG output, at most
//! about 1 MiB. A second guard run by the caller rejects anything still above
//! 2 MiB raw (or an estimated 1.5 MiB once base64 expansion is accounted
//! for) without issuing a network call.

use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;
use thiserror::Error;
use tracing::debug;

/// Longest allowed edge after resizing.
pub const MAX_DIMENSION: u32 = 1920;

/// Initial JPEG quality.
pub const JPEG_QUALITY: u8 = 80;

/// Compression target: output should fit in 1 MiB.
pub const TARGET_BYTES: usize = 1024 * 1024;

/// Hard ceiling on the raw payload sent to the gateway.
pub const MAX_RAW_BYTES: usize = 2 * 1024 * 1024;

/// Ceiling on the payload once base64 expansion (4/3) is estimated back out.
pub const MAX_ENCODED_ESTIMATE_BYTES: usize = 3 * 1024 * 1024 / 2;

pub const MSG_COMPRESSION_FAILED: &str = "Không thể nén ảnh. Vui lòng thử ảnh khác.";
pub const MSG_TOO_LARGE_RAW: &str = "Ảnh vẫn quá lớn sau khi nén. Vui lòng chọn ảnh khác.";
pub const MSG_TOO_LARGE_ENCODED: &str =
    "Ảnh vẫn quá lớn. Vui lòng thử ảnh có độ phân giải thấp hơn.";

#[derive(Error, Debug)]
pub enum PrepareError {
    /// Any decode or encode failure surfaces as one generic message.
    #[error("{}", MSG_COMPRESSION_FAILED)]
    Compression(#[source] image::ImageError),

    /// Payload still above the 2 MiB raw ceiling after compression.
    #[error("{}", MSG_TOO_LARGE_RAW)]
    TooLargeRaw { size_bytes: usize },

    /// Payload above the 1.5 MiB decoded-from-base64 estimate.
    #[error("{}", MSG_TOO_LARGE_ENCODED)]
    TooLargeEncoded { estimated_bytes: usize },
}

/// Image data ready for upload: recompressed bytes plus the declared
/// content type.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub size_bytes: usize,
}

impl ImagePayload {
    /// Base64 encoding of the payload, no data-URL prefix (the wire format
    /// of the `image` field).
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }

    /// Data-URL for previewing the prepared image.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// Prepare an image for upload: resize so neither dimension exceeds
/// [`MAX_DIMENSION`], re-encode as JPEG starting at quality
/// [`JPEG_QUALITY`] and step the quality down until the output fits in
/// [`TARGET_BYTES`] (the last attempt is kept if the floor is reached).
pub fn prepare(input: &[u8]) -> Result<ImagePayload, PrepareError> {
    let img = image::load_from_memory(input).map_err(PrepareError::Compression)?;

    let (width, height) = img.dimensions();
    let img = if width > MAX_DIMENSION || height > MAX_DIMENSION {
        debug!(
            "Resizing image from {}x{} to fit {}px",
            width, height, MAX_DIMENSION
        );
        img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = img.to_rgb8();

    let mut quality = JPEG_QUALITY;
    let mut jpeg_bytes = encode_jpeg(&rgb, quality)?;
    while jpeg_bytes.len() > TARGET_BYTES && quality > 30 {
        quality -= 10;
        debug!(
            "Output is {} bytes, retrying at quality {}",
            jpeg_bytes.len(),
            quality
        );
        jpeg_bytes = encode_jpeg(&rgb, quality)?;
    }

    debug!(
        "Prepared image: {} bytes in, {} bytes out at quality {}",
        input.len(),
        jpeg_bytes.len(),
        quality
    );

    let size_bytes = jpeg_bytes.len();
    Ok(ImagePayload {
        bytes: jpeg_bytes,
        mime_type: "image/jpeg".to_string(),
        size_bytes,
    })
}

/// Pre-upload guard: reject payloads over the raw ceiling or over the
/// base64-expansion estimate. Run by the caller before any network call.
pub fn check_upload_size(payload: &ImagePayload) -> Result<(), PrepareError> {
    if payload.size_bytes > MAX_RAW_BYTES {
        return Err(PrepareError::TooLargeRaw {
            size_bytes: payload.size_bytes,
        });
    }

    // Estimate the decoded size back out of the base64 length (4/3 inflation).
    let encoded_len = payload.size_bytes.div_ceil(3) * 4;
    let estimated_bytes = encoded_len * 3 / 4;
    if estimated_bytes > MAX_ENCODED_ESTIMATE_BYTES {
        return Err(PrepareError::TooLargeEncoded { estimated_bytes });
    }

    Ok(())
}

fn encode_jpeg(rgb: &image::RgbImage, quality: u8) -> Result<Vec<u8>, PrepareError> {
    let mut out = std::io::Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    rgb.write_with_encoder(encoder)
        .map_err(PrepareError::Compression)?;
    Ok(out.into_inner())
}
