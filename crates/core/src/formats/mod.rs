//! Format catalog.
//!
//! Static lookup tables mapping a source extension to the targets it can be
//! converted to, plus the category grouping used to decide which options a
//! client offers. All lookups normalize the extension to lower case first;
//! unknown extensions simply yield nothing.

mod types;

pub use types::{FormatCatalogEntry, FormatCategory};

const CONVERSIONS: &[(&str, &[&str])] = &[
    // Documents
    ("pdf", &["docx", "txt", "jpg", "png"]),
    ("docx", &["pdf", "txt", "html"]),
    ("txt", &["pdf", "docx", "html"]),
    // Images
    ("jpg", &["png", "webp", "gif", "pdf"]),
    ("jpeg", &["png", "webp", "gif", "pdf"]),
    ("png", &["jpg", "webp", "gif", "pdf"]),
    ("webp", &["jpg", "png", "gif"]),
    ("gif", &["jpg", "png", "webp"]),
    ("heic", &["jpg", "png", "webp"]),
    // Audio
    ("mp3", &["wav", "ogg", "aac"]),
    ("wav", &["mp3", "ogg", "aac"]),
    ("ogg", &["mp3", "wav", "aac"]),
    ("aac", &["mp3", "wav", "ogg"]),
    // Video
    ("mp4", &["webm", "avi", "gif"]),
    ("webm", &["mp4", "avi", "gif"]),
    ("avi", &["mp4", "webm", "gif"]),
    ("mov", &["mp4", "webm", "avi"]),
    // Archives
    ("zip", &["rar", "tar", "7z"]),
    ("rar", &["zip", "tar", "7z"]),
    ("7z", &["zip", "rar", "tar"]),
    ("tar", &["zip", "rar", "7z"]),
];

const CATEGORIES: &[(FormatCategory, &[&str])] = &[
    (
        FormatCategory::Documents,
        &["pdf", "docx", "doc", "txt", "rtf", "odt", "html", "md"],
    ),
    (
        FormatCategory::Images,
        &["jpg", "jpeg", "png", "gif", "webp", "heic", "svg", "tiff"],
    ),
    (
        FormatCategory::Audio,
        &["mp3", "wav", "ogg", "aac", "flac", "m4a"],
    ),
    (
        FormatCategory::Video,
        &["mp4", "webm", "avi", "mov", "mkv", "flv"],
    ),
    (FormatCategory::Archives, &["zip", "rar", "7z", "tar", "gz"]),
];

const MIME_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("txt", "text/plain"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("zip", "application/zip"),
];

/// Returns the permissible target extensions for a source extension.
///
/// An empty slice means "no conversion offered", not an error.
pub fn target_formats_for(source_extension: &str) -> &'static [&'static str] {
    let ext = source_extension.to_lowercase();
    CONVERSIONS
        .iter()
        .find(|(source, _)| *source == ext)
        .map(|(_, targets)| *targets)
        .unwrap_or(&[])
}

/// Returns the category an extension belongs to, or `Other`.
pub fn category_of(extension: &str) -> FormatCategory {
    let ext = extension.to_lowercase();
    CATEGORIES
        .iter()
        .find(|(_, members)| members.contains(&ext.as_str()))
        .map(|(category, _)| *category)
        .unwrap_or(FormatCategory::Other)
}

/// Lower-cased text after the last `.` of a file name.
///
/// Returns `None` when the name has no dot or ends with one.
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Source format as reported in a conversion record: the file extension, or
/// an empty string when there is none.
pub fn source_format_of(filename: &str) -> String {
    file_extension(filename).unwrap_or_default()
}

/// Target formats a converter page offers on each category tab.
pub fn picker_formats(category: FormatCategory) -> &'static [&'static str] {
    match category {
        FormatCategory::Documents => &["pdf", "docx", "txt"],
        FormatCategory::Images => &["jpg", "png", "webp", "gif"],
        FormatCategory::Audio => &["mp3", "wav", "ogg"],
        FormatCategory::Video => &["mp4", "webm"],
        FormatCategory::Archives => &["zip"],
        FormatCategory::Other => &[],
    }
}

/// Target pre-selected when a file of this extension is picked.
///
/// Proposes a format different from the source; archives and unknown
/// extensions get no suggestion.
pub fn suggested_target(extension: &str) -> Option<&'static str> {
    let ext = extension.to_lowercase();
    let suggestion = match category_of(&ext) {
        FormatCategory::Documents if ext == "pdf" => "docx",
        FormatCategory::Documents => "pdf",
        FormatCategory::Images if ext == "jpg" => "png",
        FormatCategory::Images => "jpg",
        FormatCategory::Audio if ext == "mp3" => "wav",
        FormatCategory::Audio => "mp3",
        FormatCategory::Video if ext == "mp4" => "webm",
        FormatCategory::Video => "mp4",
        FormatCategory::Archives | FormatCategory::Other => return None,
    };
    Some(suggestion)
}

/// Canonical MIME type for an extension, `text/plain` when unknown.
pub fn mime_type_for(extension: &str) -> &'static str {
    let ext = extension.to_lowercase();
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or("text/plain")
}

/// Every source extension the catalog knows how to convert.
pub fn entries() -> Vec<FormatCatalogEntry> {
    CONVERSIONS
        .iter()
        .map(|&(source, targets)| FormatCatalogEntry {
            source,
            category: category_of(source),
            targets,
        })
        .collect()
}
