//! Cover-image reference helper.
//!
//! Small local images become embeddable `data:` URIs; anything that is
//! already a URL or data URI passes through verbatim. Validation happens
//! on the actual bytes (magic numbers), not the file extension.

use anyhow::{Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use std::fs;
use std::path::Path;

/// Hard cap on embeddable image size.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Resolve a `--image` argument into a stored image reference.
///
/// - `http(s)://...` and `data:...` strings are taken verbatim;
/// - anything else is treated as a local file path and embedded;
/// - an empty argument yields a generated placeholder reference.
pub fn resolve_image_ref(arg: &str) -> Result<String> {
    let trimmed = arg.trim();
    if trimmed.is_empty() {
        return Ok(placeholder_ref());
    }
    if trimmed.starts_with("http") || trimmed.starts_with("data:") {
        return Ok(trimmed.to_string());
    }
    to_data_uri(Path::new(trimmed))
}

/// Embed a local image file as a `data:<mime>;base64,...` reference.
///
/// Fails with a validation message for unsupported formats or files over
/// [`MAX_IMAGE_BYTES`].
pub fn to_data_uri(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    if bytes.len() > MAX_IMAGE_BYTES {
        bail!(
            "image is {} bytes; the limit is 2 MiB",
            bytes.len()
        );
    }
    let Some(mime) = sniff_mime(&bytes) else {
        bail!("unsupported image format; use JPEG, PNG, GIF, or WebP");
    };
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(&bytes)))
}

/// Random-looking picsum placeholder, keyed by the current time.
#[must_use]
pub fn placeholder_ref() -> String {
    format!(
        "https://picsum.photos/800/600?random={}",
        Utc::now().timestamp_millis()
    )
}

/// Identify the four supported formats by their magic numbers.
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    None
}
