//! Embedded-data image payloads

use crate::core::error::DomainError;
use crate::image::hash::ContentHash;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

const DATA_IMAGE_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64";

/// An image carried inline as a `data:image/<subtype>;base64,<data>` URI (Value Object)
///
/// Only the shape of the URI is checked; the bytes themselves are opaque and
/// never decoded into pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImagePayload {
    mime: String,
    data: String,
}

impl ImagePayload {
    /// Parse and validate a data URI
    pub fn parse(uri: &str) -> Result<Self, DomainError> {
        if !uri.starts_with(DATA_IMAGE_PREFIX) {
            return Err(DomainError::MalformedPayload(format!(
                "expected a {DATA_IMAGE_PREFIX} URI, got {:?}",
                preview(uri)
            )));
        }
        let rest = &uri["data:".len()..];

        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| DomainError::MalformedPayload("missing ',' separator".to_string()))?;

        let mime = header.strip_suffix(BASE64_MARKER).ok_or_else(|| {
            DomainError::MalformedPayload(format!("payload is not base64 encoded ({header})"))
        })?;

        let subtype = &mime["image/".len()..];
        if subtype.is_empty() || subtype.contains(';') {
            return Err(DomainError::MalformedPayload(format!(
                "invalid media type {mime:?}"
            )));
        }

        if data.is_empty() {
            return Err(DomainError::MalformedPayload("empty image data".to_string()));
        }

        STANDARD
            .decode(data)
            .map_err(|e| DomainError::MalformedPayload(format!("invalid base64 data: {e}")))?;

        Ok(Self {
            mime: mime.to_string(),
            data: data.to_string(),
        })
    }

    /// Encode raw image bytes as a payload
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self {
            mime: mime.to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Media type, e.g. `image/png`
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// File extension for the media type: `png` for `image/png`, `svg` for `image/svg+xml`
    pub fn file_extension(&self) -> &str {
        let subtype = self.mime.strip_prefix("image/").unwrap_or(&self.mime);
        subtype.split('+').next().unwrap_or(subtype)
    }

    /// The base64 text after the comma
    pub fn encoded_data(&self) -> &str {
        &self.data
    }

    /// Decode the image bytes
    pub fn decode(&self) -> Result<Vec<u8>, DomainError> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| DomainError::MalformedPayload(format!("invalid base64 data: {e}")))
    }

    /// Size of the decoded image in bytes, computed from the encoded length
    pub fn byte_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        (self.data.len() / 4) * 3 - padding
    }

    /// Digest of the encoded data, used to detect repeated generations
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of(self.data.as_bytes())
    }

    /// Render back to a `data:` URI
    pub fn to_data_uri(&self) -> String {
        format!("data:{}{},{}", self.mime, BASE64_MARKER, self.data)
    }
}

impl TryFrom<String> for ImagePayload {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ImagePayload> for String {
    fn from(payload: ImagePayload) -> Self {
        payload.to_data_uri()
    }
}

fn preview(uri: &str) -> String {
    uri.chars().take(32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_png() {
        let payload = ImagePayload::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(payload.mime(), "image/png");
        assert_eq!(payload.encoded_data(), "aGVsbG8=");
        assert_eq!(payload.decode().unwrap(), b"hello");
        assert_eq!(payload.byte_len(), 5);
    }

    #[test]
    fn test_file_extension_follows_subtype() {
        assert_eq!(ImagePayload::from_bytes("image/png", b"x").file_extension(), "png");
        assert_eq!(ImagePayload::from_bytes("image/jpeg", b"x").file_extension(), "jpeg");
        assert_eq!(ImagePayload::from_bytes("image/svg+xml", b"x").file_extension(), "svg");
    }

    #[test]
    fn test_parse_rejects_urls() {
        let err = ImagePayload::parse("https://replicate.delivery/x.png").unwrap_err();
        assert!(err.is_malformed_payload());
    }

    #[test]
    fn test_parse_rejects_non_image_data_uri() {
        assert!(ImagePayload::parse("data:text/plain;base64,aGVsbG8=").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_base64_marker() {
        assert!(ImagePayload::parse("data:image/svg+xml,<svg/>").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_data() {
        assert!(ImagePayload::parse("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_base64() {
        assert!(ImagePayload::parse("data:image/png;base64,not base64!").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_subtype() {
        assert!(ImagePayload::parse("data:image/;base64,aGVsbG8=").is_err());
    }

    #[test]
    fn test_from_bytes_renders_data_uri() {
        let payload = ImagePayload::from_bytes("image/jpeg", b"hello");
        assert_eq!(payload.to_data_uri(), "data:image/jpeg;base64,aGVsbG8=");
        assert_eq!(ImagePayload::parse(&payload.to_data_uri()).unwrap(), payload);
    }

    #[test]
    fn test_same_bytes_same_hash() {
        let a = ImagePayload::from_bytes("image/png", b"pixels");
        let b = ImagePayload::from_bytes("image/png", b"pixels");
        let c = ImagePayload::from_bytes("image/png", b"other pixels");
        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
    }

    #[test]
    fn test_string_conversions_round_trip_through_parse() {
        let uri = String::from(ImagePayload::from_bytes("image/webp", b"hello"));
        assert_eq!(uri, "data:image/webp;base64,aGVsbG8=");
        let payload = ImagePayload::try_from(uri).unwrap();
        assert_eq!(payload.mime(), "image/webp");
    }
}
