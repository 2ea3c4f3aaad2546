//! Types for the format catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad family a file extension belongs to.
///
/// Only drives which option set and picker list a client presents; it has no
/// bearing on how bytes are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatCategory {
    Documents,
    Images,
    Audio,
    Video,
    Archives,
    Other,
}

impl FormatCategory {
    /// The five named categories, in the order a converter page shows its tabs.
    pub const TABS: [FormatCategory; 5] = [
        Self::Documents,
        Self::Images,
        Self::Audio,
        Self::Video,
        Self::Archives,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Images => "images",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Archives => "archives",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FormatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the catalog: a source extension and what it may become.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatCatalogEntry {
    pub source: &'static str,
    pub category: FormatCategory,
    pub targets: &'static [&'static str],
}
