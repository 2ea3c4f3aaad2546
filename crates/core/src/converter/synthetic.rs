//! Signature-stub encoder.
//!
//! Produces byte buffers that begin with the magic number or structural
//! preamble of the requested format, followed by a short readable label.
//! The output is identifiable by signature sniffing but is not a decodable
//! file of that format.

use chrono::{SecondsFormat, Utc};

use super::types::{EncodedFile, TargetFormat};

const PNG_HEADER: [u8; 12] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // signature
    0x00, 0x00, 0x00, 0x0D, // IHDR chunk length
];

const JPEG_HEADER: [u8; 20] = [
    0xFF, 0xD8, // SOI
    0xFF, 0xE0, // APP0
    0x00, 0x10, // APP0 length
    0x4A, 0x46, 0x49, 0x46, 0x00, // "JFIF\0"
    0x01, 0x01, // version 1.1
    0x00, // density units
    0x00, 0x01, // X density
    0x00, 0x01, // Y density
    0x00, 0x00, // no thumbnail
];

const ID3_HEADER: [u8; 10] = [
    0x49, 0x44, 0x33, // "ID3"
    0x03, 0x00, // v2.3
    0x00, // flags
    0x00, 0x00, 0x00, 0x16, // tag size
];

const MP4_FTYP: [u8; 24] = [
    0x00, 0x00, 0x00, 0x18, // box size
    0x66, 0x74, 0x79, 0x70, // "ftyp"
    0x6D, 0x70, 0x34, 0x32, // major brand "mp42"
    0x00, 0x00, 0x00, 0x00, // minor version
    0x6D, 0x70, 0x34, 0x32, // compatible "mp42"
    0x69, 0x73, 0x6F, 0x6D, // compatible "isom"
];

const ZIP_HEADER: [u8; 14] = [
    0x50, 0x4B, 0x03, 0x04, // local file header
    0x0A, 0x00, // version
    0x00, 0x00, // flags
    0x00, 0x00, // compression
    0x00, 0x00, // mod time
    0x00, 0x00, // mod date
];

const DOCX_HEADER: [u8; 8] = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00, 0x00, 0x00];

/// First eight characters of an identifier (the whole id if shorter).
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Name a rendered file is offered under: `converted-<id8>.<format>`.
pub fn suggested_filename(id: &str, format_token: &str) -> String {
    format!("converted-{}.{}", short_id(id), format_token)
}

/// Renders a signature stub for `format_token`.
///
/// Total over its domain: every token produces output, unknown ones as a
/// plain-text description.
pub fn encode(id: &str, format_token: &str) -> EncodedFile {
    let format = TargetFormat::parse(format_token);
    let short = short_id(id);

    let bytes = match &format {
        TargetFormat::Pdf => pdf_document(short).into_bytes(),
        TargetFormat::Docx => with_label(
            &DOCX_HEADER,
            &format!(
                "This is a simulated DOCX file created by Convertify. ID: {}",
                short
            ),
        ),
        TargetFormat::Jpeg => with_label(&JPEG_HEADER, &format!("Convertify Image {}", short)),
        TargetFormat::Png => with_label(&PNG_HEADER, &format!("Convertify PNG {}", short)),
        TargetFormat::Mp3 => with_label(&ID3_HEADER, &format!("Convertify MP3 Sample {}", short)),
        TargetFormat::Mp4 => with_label(&MP4_FTYP, &format!("Convertify MP4 {}", short)),
        TargetFormat::Zip => with_label(&ZIP_HEADER, &format!("Convertify Archive {}", short)),
        TargetFormat::Other(token) => plain_text(id, token).into_bytes(),
    };

    EncodedFile {
        bytes,
        suggested_filename: suggested_filename(id, format_token),
        content_type: format.content_type(),
    }
}

fn with_label(header: &[u8], label: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(header.len() + label.len());
    bytes.extend_from_slice(header);
    bytes.extend_from_slice(label.as_bytes());
    bytes
}

fn pdf_document(short: &str) -> String {
    format!(
        "%PDF-1.5
1 0 obj
<< /Type /Catalog /Pages 2 0 R >>
endobj
2 0 obj
<< /Type /Pages /Kids [3 0 R] /Count 1 >>
endobj
3 0 obj
<< /Type /Page /Parent 2 0 R /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>
endobj
4 0 obj
<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>
endobj
5 0 obj
<< /Length 68 >>
stream
BT
/F1 12 Tf
72 712 Td
(Convertify Demo PDF File - ID: {short}) Tj
ET
endstream
endobj
xref
0 6
0000000000 65535 f
0000000009 00000 n
0000000058 00000 n
0000000115 00000 n
0000000216 00000 n
0000000283 00000 n
trailer
<< /Size 6 /Root 1 0 R >>
startxref
401
%%EOF"
    )
}

fn plain_text(id: &str, token: &str) -> String {
    format!(
        "This is a Convertify converted file (ID: {short})\n\n\
         This file was created for demonstration purposes.\n\
         In a real application, this would be a properly converted {token} file.\n\n\
         Format: {token}\n\
         Conversion ID: {id}\n\
         Created: {created}\n\n\
         Thank you for using Convertify!",
        short = short_id(id),
        created = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "3f2b8c1e-9d4a-4b7e-8f00-1234567890ab";

    #[test]
    fn test_short_id() {
        assert_eq!(short_id(ID), "3f2b8c1e");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id(""), "");
    }

    #[test]
    fn test_pdf_signature() {
        let file = encode(ID, "pdf");
        assert!(file.bytes.starts_with(b"%PDF-1.5"));
        assert!(file.bytes.ends_with(b"%%EOF"));
        assert_eq!(file.content_type, "application/pdf");
        let text = String::from_utf8(file.bytes).unwrap();
        assert!(text.contains("(Convertify Demo PDF File - ID: 3f2b8c1e) Tj"));
    }

    #[test]
    fn test_png_signature() {
        let file = encode(ID, "png");
        assert_eq!(
            &file.bytes[..8],
            &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
        );
        assert_eq!(&file.bytes[8..12], &[0x00, 0x00, 0x00, 0x0D]);
        assert_eq!(file.content_type, "image/png");
    }

    #[test]
    fn test_jpeg_signature_for_both_spellings() {
        for token in ["jpg", "jpeg", "JPG"] {
            let file = encode(ID, token);
            assert_eq!(&file.bytes[..4], &[0xFF, 0xD8, 0xFF, 0xE0]);
            assert_eq!(&file.bytes[6..11], b"JFIF\0");
            assert_eq!(file.content_type, "image/jpeg");
        }
    }

    #[test]
    fn test_mp3_id3_header() {
        let file = encode(ID, "mp3");
        assert_eq!(&file.bytes[..3], b"ID3");
        assert_eq!(file.bytes[3], 0x03);
        assert_eq!(file.content_type, "audio/mpeg");
    }

    #[test]
    fn test_mp4_ftyp_box() {
        let file = encode(ID, "mp4");
        assert_eq!(&file.bytes[4..8], b"ftyp");
        assert_eq!(&file.bytes[8..12], b"mp42");
        assert_eq!(&file.bytes[20..24], b"isom");
        assert_eq!(file.content_type, "video/mp4");
    }

    #[test]
    fn test_zip_and_docx_share_local_header_magic() {
        let zip = encode(ID, "zip");
        let docx = encode(ID, "docx");
        assert_eq!(&zip.bytes[..4], &[0x50, 0x4B, 0x03, 0x04]);
        assert_eq!(&docx.bytes[..4], &[0x50, 0x4B, 0x03, 0x04]);
        assert_eq!(zip.bytes[4], 0x0A);
        assert_eq!(docx.bytes[4], 0x14);
        assert_eq!(zip.content_type, "application/zip");
        assert!(docx.content_type.contains("wordprocessingml"));
    }

    #[test]
    fn test_labels_embed_short_id() {
        for token in ["docx", "jpg", "png", "mp3", "mp4", "zip"] {
            let file = encode(ID, token);
            let tail = String::from_utf8_lossy(&file.bytes);
            assert!(tail.contains("3f2b8c1e"), "{} label missing id", token);
            assert!(!tail.contains(ID), "{} label should use short id", token);
        }
    }

    #[test]
    fn test_unknown_format_is_plain_text() {
        let file = encode(ID, "webp");
        assert_eq!(file.content_type, "text/plain");
        let text = String::from_utf8(file.bytes).unwrap();
        assert!(text.starts_with("This is a Convertify converted file (ID: 3f2b8c1e)"));
        assert!(text.contains("Format: webp"));
        assert!(text.contains(&format!("Conversion ID: {}", ID)));
        assert!(text.contains("Created: "));
    }

    #[test]
    fn test_filename_uses_token_verbatim() {
        for token in ["pdf", "png", "jpeg", "JPG", "txt", "webp", "7z"] {
            assert_eq!(
                encode(ID, token).suggested_filename,
                format!("converted-3f2b8c1e.{}", token)
            );
        }
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        assert!(encode(ID, "PDF").bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(encode(ID, "Zip").content_type, "application/zip");
    }
}
