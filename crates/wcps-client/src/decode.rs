//! Interpreting query responses.
//!
//! A coverage server answers with scalars (`14.409449`), rasdaman-style
//! arrays (`{1,2,3}`), CSV text, error text, or an encoded image. The
//! decoder picks the first interpretation that fits: images announced by
//! content type, then UTF-8 text (numeric when every token is a number),
//! then sniffed image bytes.

use std::io::Cursor;

use bytes::Bytes;
use image::ImageFormat;

use crate::error::{ClientError, ClientResult};
use crate::transport::Payload;

/// A decoded query result.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Non-numeric text, e.g. a server message.
    Text(String),
    /// One or more numbers, flattened in server order.
    Values(Vec<f64>),
    /// An encoded image with its dimensions.
    Image {
        format: ImageFormat,
        width: u32,
        height: u32,
        bytes: Bytes,
    },
}

impl Decoded {
    /// The single value of a scalar result.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Decoded::Values(values) if values.len() == 1 => Some(values[0]),
            _ => None,
        }
    }

    /// Human-readable one-line description.
    pub fn summary(&self) -> String {
        match self {
            Decoded::Text(text) => text.clone(),
            Decoded::Values(values) => values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(","),
            Decoded::Image {
                format,
                width,
                height,
                bytes,
            } => format!("{:?} image {}x{} ({} bytes)", format, width, height, bytes.len()),
        }
    }
}

/// Decode a raw payload.
pub fn decode(payload: &Payload) -> ClientResult<Decoded> {
    if payload.is_empty() {
        return Ok(Decoded::Text(String::new()));
    }

    let announced_image = payload
        .content_type
        .as_deref()
        .map_or(false, |ct| ct.trim().to_lowercase().starts_with("image/"));
    if announced_image {
        return decode_image(&payload.body);
    }

    if let Ok(text) = std::str::from_utf8(&payload.body) {
        return Ok(match parse_values(text) {
            Some(values) => Decoded::Values(values),
            None => Decoded::Text(text.to_string()),
        });
    }

    decode_image(&payload.body)
}

fn decode_image(bytes: &Bytes) -> ClientResult<Decoded> {
    let reader = image::io::Reader::new(Cursor::new(&bytes[..]))
        .with_guessed_format()
        .map_err(|e| ClientError::Nondecodable(e.to_string()))?;

    let format = reader.format().ok_or_else(|| {
        ClientError::Nondecodable("data is neither text nor a known image format".to_string())
    })?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ClientError::Nondecodable(format!("corrupt {:?} image: {}", format, e)))?;

    Ok(Decoded::Image {
        format,
        width,
        height,
        bytes: bytes.clone(),
    })
}

/// Parse scalars, comma lists and nested `{...}` arrays into a flat list.
fn parse_values(text: &str) -> Option<Vec<f64>> {
    let numeric_chars = |c: char| {
        c.is_ascii_digit()
            || c.is_whitespace()
            || matches!(c, '.' | '-' | '+' | 'e' | 'E' | ',' | '{' | '}' | '"')
    };
    if !text.chars().all(numeric_chars) {
        return None;
    }

    let values = text
        .split(|c: char| c == ',' || c == '{' || c == '}' || c == '"' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
