//! Per-category conversion options.
//!
//! These are accepted on the request and threaded through to the converter
//! so that an encoder which understands them can use them. The simulated
//! encoder ignores them.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use super::error::ConverterError;
use crate::formats::FormatCategory;

static PAGE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\d+\s*(-\s*\d+\s*)?(,\s*\d+\s*(-\s*\d+\s*)?)*$").expect("valid regex")
});

/// Quality preset for audio and video output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Low,
    Medium,
    #[default]
    High,
    Best,
}

/// Output resolution for video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "480p")]
    P480,
    #[default]
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "1440p")]
    P1440,
    #[serde(rename = "2160p")]
    P2160,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageOptions {
    /// 10-100.
    pub quality: u8,
    pub width: u32,
    pub height: u32,
    pub preserve_aspect_ratio: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            quality: 80,
            width: 1280,
            height: 720,
            preserve_aspect_ratio: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentOptions {
    /// `all` or an explicit list such as `1-5, 8, 11-13`.
    pub page_range: String,
    pub include_annotations: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            page_range: "all".to_string(),
            include_annotations: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioOptions {
    pub quality_tier: QualityTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoOptions {
    pub quality_tier: QualityTier,
    pub resolution: Resolution,
    /// 500-8000.
    pub bitrate_kbps: u32,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            quality_tier: QualityTier::High,
            resolution: Resolution::P720,
            bitrate_kbps: 1800,
        }
    }
}

/// Options bag, tagged by the category it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ConversionOptions {
    Image(ImageOptions),
    Document(DocumentOptions),
    Audio(AudioOptions),
    Video(VideoOptions),
}

impl ConversionOptions {
    /// Default option set for a category; archives and unknown files have none.
    pub fn defaults_for(category: FormatCategory) -> Option<Self> {
        match category {
            FormatCategory::Images => Some(Self::Image(ImageOptions::default())),
            FormatCategory::Documents => Some(Self::Document(DocumentOptions::default())),
            FormatCategory::Audio => Some(Self::Audio(AudioOptions::default())),
            FormatCategory::Video => Some(Self::Video(VideoOptions::default())),
            FormatCategory::Archives | FormatCategory::Other => None,
        }
    }

    /// Parses options from their JSON wire form and validates ranges.
    pub fn from_json(raw: &str) -> Result<Self, ConverterError> {
        let options: Self = serde_json::from_str(raw)
            .map_err(|e| ConverterError::invalid_options(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Checks every field against its permitted range.
    pub fn validate(&self) -> Result<(), ConverterError> {
        match self {
            Self::Image(image) => {
                if !(10..=100).contains(&image.quality) {
                    return Err(ConverterError::invalid_options(format!(
                        "image quality must be between 10 and 100, got {}",
                        image.quality
                    )));
                }
                if image.width == 0 || image.height == 0 {
                    return Err(ConverterError::invalid_options(
                        "image width and height must be positive",
                    ));
                }
            }
            Self::Document(document) => {
                parse_page_range(&document.page_range)?;
            }
            Self::Audio(_) => {}
            Self::Video(video) => {
                if !(500..=8000).contains(&video.bitrate_kbps) {
                    return Err(ConverterError::invalid_options(format!(
                        "video bitrate must be between 500 and 8000 kbps, got {}",
                        video.bitrate_kbps
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Parses a page range expression into inclusive, 1-based spans.
///
/// `all` yields an empty list, meaning every page.
pub fn parse_page_range(expr: &str) -> Result<Vec<(u32, u32)>, ConverterError> {
    if expr.trim().eq_ignore_ascii_case("all") {
        return Ok(Vec::new());
    }
    if !PAGE_RANGE.is_match(expr) {
        return Err(ConverterError::invalid_options(format!(
            "malformed page range: {:?}",
            expr
        )));
    }

    let mut spans = Vec::new();
    for part in expr.split(',') {
        let mut bounds = part.split('-').map(|b| b.trim().parse::<u32>());
        let start = match bounds.next() {
            Some(Ok(n)) => n,
            _ => {
                return Err(ConverterError::invalid_options(format!(
                    "malformed page range: {:?}",
                    expr
                )))
            }
        };
        let end = match bounds.next() {
            Some(Ok(n)) => n,
            Some(Err(_)) => {
                return Err(ConverterError::invalid_options(format!(
                    "malformed page range: {:?}",
                    expr
                )))
            }
            None => start,
        };
        if start == 0 || end < start {
            return Err(ConverterError::invalid_options(format!(
                "invalid page span {}-{}",
                start, end
            )));
        }
        spans.push((start, end));
    }
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_category() {
        assert!(matches!(
            ConversionOptions::defaults_for(FormatCategory::Images),
            Some(ConversionOptions::Image(ImageOptions { quality: 80, .. }))
        ));
        assert!(ConversionOptions::defaults_for(FormatCategory::Archives).is_none());
        assert!(ConversionOptions::defaults_for(FormatCategory::Other).is_none());
    }

    #[test]
    fn test_from_json_video() {
        let options = ConversionOptions::from_json(
            r#"{"category":"video","qualityTier":"best","resolution":"1080p","bitrateKbps":4000}"#,
        )
        .unwrap();
        let ConversionOptions::Video(video) = options else {
            panic!("expected video options");
        };
        assert_eq!(video.quality_tier, QualityTier::Best);
        assert_eq!(video.resolution, Resolution::P1080);
        assert_eq!(video.bitrate_kbps, 4000);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let options = ConversionOptions::from_json(r#"{"category":"image","quality":55}"#).unwrap();
        assert_eq!(
            options,
            ConversionOptions::Image(ImageOptions {
                quality: 55,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_category() {
        let err = ConversionOptions::from_json(r#"{"category":"archive"}"#).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_image_quality_range() {
        let low = ConversionOptions::Image(ImageOptions {
            quality: 9,
            ..Default::default()
        });
        assert!(low.validate().is_err());

        let edge = ConversionOptions::Image(ImageOptions {
            quality: 10,
            ..Default::default()
        });
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_image_dimensions_positive() {
        let options = ConversionOptions::Image(ImageOptions {
            width: 0,
            ..Default::default()
        });
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_video_bitrate_range() {
        let too_high = ConversionOptions::Video(VideoOptions {
            bitrate_kbps: 8001,
            ..Default::default()
        });
        assert!(too_high.validate().is_err());

        let too_low = ConversionOptions::Video(VideoOptions {
            bitrate_kbps: 499,
            ..Default::default()
        });
        assert!(too_low.validate().is_err());
    }

    #[test]
    fn test_unknown_resolution_rejected() {
        let result = ConversionOptions::from_json(r#"{"category":"video","resolution":"360p"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_page_range() {
        assert_eq!(parse_page_range("all").unwrap(), Vec::new());
        assert_eq!(parse_page_range(" ALL ").unwrap(), Vec::new());
        assert_eq!(
            parse_page_range("1-5, 8, 11-13").unwrap(),
            vec![(1, 5), (8, 8), (11, 13)]
        );
        assert_eq!(parse_page_range("3").unwrap(), vec![(3, 3)]);
    }

    #[test]
    fn test_parse_page_range_rejects_bad_input() {
        assert!(parse_page_range("").is_err());
        assert!(parse_page_range("1-").is_err());
        assert!(parse_page_range("5-2").is_err());
        assert!(parse_page_range("0-3").is_err());
        assert!(parse_page_range("a-b").is_err());
        assert!(parse_page_range("1,,2").is_err());
    }

    #[test]
    fn test_document_options_validated() {
        let options = ConversionOptions::Document(DocumentOptions {
            page_range: "1-2-3".to_string(),
            include_annotations: false,
        });
        assert!(options.validate().is_err());
    }
}
