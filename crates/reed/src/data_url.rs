use base64::{Engine as _, engine::general_purpose::STANDARD};

/// MIME type used when a file reports none, same as `FileReader`.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Base64 `data:` URL for `bytes`, as produced by `FileReader.readAsDataURL`.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() { FALLBACK_MIME } else { mime.trim() };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
