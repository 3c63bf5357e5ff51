//! Output encodings supported by the `encode()` function.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Media type a query result is encoded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingType {
    Png,
    Jpeg,
    Tiff,
    Gif,
    Csv,
}

impl EncodingType {
    pub const ALL: [EncodingType; 5] = [
        EncodingType::Png,
        EncodingType::Jpeg,
        EncodingType::Tiff,
        EncodingType::Gif,
        EncodingType::Csv,
    ];

    /// Media type string passed to `encode()`.
    pub fn media_type(&self) -> &'static str {
        match self {
            EncodingType::Png => "image/png",
            EncodingType::Jpeg => "image/jpeg",
            EncodingType::Tiff => "image/tiff",
            EncodingType::Gif => "image/gif",
            EncodingType::Csv => "text/csv",
        }
    }

    /// Conventional file extension for the encoded result.
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingType::Png => "png",
            EncodingType::Jpeg => "jpg",
            EncodingType::Tiff => "tif",
            EncodingType::Gif => "gif",
            EncodingType::Csv => "csv",
        }
    }

    pub fn is_image(&self) -> bool {
        !matches!(self, EncodingType::Csv)
    }
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_type())
    }
}

impl FromStr for EncodingType {
    type Err = QueryError;

    /// Accepts short names (`png`, `jpg`) and media types (`image/png`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" | "image/png" => Ok(EncodingType::Png),
            "jpeg" | "jpg" | "image/jpeg" => Ok(EncodingType::Jpeg),
            "tiff" | "tif" | "image/tiff" => Ok(EncodingType::Tiff),
            "gif" | "image/gif" => Ok(EncodingType::Gif),
            "csv" | "text/csv" => Ok(EncodingType::Csv),
            _ => Err(QueryError::InvalidEncodingType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_types() {
        let media: Vec<_> = EncodingType::ALL.iter().map(|e| e.media_type()).collect();
        assert_eq!(
            media,
            vec!["image/png", "image/jpeg", "image/tiff", "image/gif", "text/csv"]
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("png".parse::<EncodingType>().unwrap(), EncodingType::Png);
        assert_eq!("IMAGE/JPEG".parse::<EncodingType>().unwrap(), EncodingType::Jpeg);
        assert_eq!("text/csv".parse::<EncodingType>().unwrap(), EncodingType::Csv);
        assert_eq!(
            "image/bmp".parse::<EncodingType>(),
            Err(QueryError::InvalidEncodingType("image/bmp".to_string()))
        );
    }

    #[test]
    fn test_is_image() {
        assert!(EncodingType::Gif.is_image());
        assert!(!EncodingType::Csv.is_image());
    }
}
