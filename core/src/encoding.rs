//! Base64 helpers for image payloads (`img_categoria`, `img_livro`).

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ApiError;

/// Read a file and return its contents as bare base64.
pub async fn file_to_base64(path: impl AsRef<Path>) -> Result<String, ApiError> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    Ok(bytes_to_base64(&bytes))
}

pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Strip a `data:<mime>;base64,` prefix, returning the bare payload.
///
/// Input without a data-URI prefix is returned unchanged.
pub fn strip_data_uri(value: &str) -> &str {
    if !value.starts_with("data:") {
        return value;
    }
    match value.split_once(',') {
        Some((_, payload)) => payload,
        None => value,
    }
}
