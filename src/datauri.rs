/// Data URI parsing and encoding
///
/// A data URI carries an image as `data:<mime>;base64,<payload>`. This module
/// converts between that textual form and [`BinaryPayload`], the in-memory
/// representation the compression pipeline works on.
use crate::constants::{FALLBACK_MIME_TYPE, MAX_PAYLOAD_SIZE};
use crate::error::{Result, SqueezeError};
use crate::utils::base64_payload_size;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Raw image bytes tagged with a MIME type and a display filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub filename: String,
}

impl BinaryPayload {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
            filename: filename.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Split a data URI into its MIME type and base64 payload without decoding
///
/// # Arguments
/// * `uri` - The data URI to split
///
/// # Returns
/// * `Ok((mime, payload))` - Borrowed MIME type and base64 payload substrings
/// * `Err(SqueezeError::MalformedDataUri)` - If scheme, comma or base64 marker is missing
pub fn split_data_uri(uri: &str) -> Result<(&str, &str)> {
    let rest = uri.strip_prefix("data:").ok_or_else(|| {
        SqueezeError::MalformedDataUri("missing 'data:' scheme".to_string())
    })?;

    let comma = rest.find(',').ok_or_else(|| {
        SqueezeError::MalformedDataUri("missing ',' separator".to_string())
    })?;

    let header = &rest[..comma];
    let payload = &rest[comma + 1..];

    let mime = header.strip_suffix(";base64").ok_or_else(|| {
        SqueezeError::MalformedDataUri("missing ';base64' marker".to_string())
    })?;

    Ok((mime, payload))
}

/// Decode a base64 data URI into a binary payload
///
/// # Arguments
/// * `uri` - The data URI to decode
/// * `filename` - Display filename to tag the payload with
///
/// # Returns
/// * `Ok(BinaryPayload)` - Bytes plus the MIME type discovered in the header
/// * `Err(SqueezeError)` - If the URI is malformed, oversized or not valid base64
pub fn decode_data_uri(uri: &str, filename: &str) -> Result<BinaryPayload> {
    let (mime, payload) = split_data_uri(uri)?;

    // Check the declared size before decoding to avoid materializing
    // oversized payloads.
    let declared_size = base64_payload_size(uri);
    if declared_size > MAX_PAYLOAD_SIZE {
        return Err(SqueezeError::PayloadTooLarge(declared_size, MAX_PAYLOAD_SIZE));
    }

    let bytes = STANDARD.decode(payload)?;

    let mime = if mime.is_empty() { FALLBACK_MIME_TYPE } else { mime };

    Ok(BinaryPayload::new(bytes, mime, filename))
}

/// Encode a binary payload back into a base64 data URI
pub fn encode_data_uri(payload: &BinaryPayload) -> String {
    format!(
        "data:{};base64,{}",
        payload.mime,
        STANDARD.encode(&payload.bytes)
    )
}
