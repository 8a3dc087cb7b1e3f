//! Content-Type to file extension mapping
//!
//! The server-declared `Content-Type` is the only signal used to name a
//! downloaded page. No sniffing of the body takes place.

use serde::Serialize;
use std::fmt;

/// Image formats that can be persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    /// File extension including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => ".jpg",
            ImageKind::Png => ".png",
            ImageKind::Gif => ".gif",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Classifies a declared media type
///
/// Parameters such as `; charset=binary` are ignored:
/// - `image/jpeg` -> [`ImageKind::Jpeg`]
/// - `image/png` -> [`ImageKind::Png`]
/// - `image/gif` -> [`ImageKind::Gif`]
///
/// Anything else, including malformed values, is unrecognized.
pub fn classify(content_type: &str) -> Option<ImageKind> {
    let media_type: mime::Mime = content_type.trim().parse().ok()?;

    if media_type.type_() != mime::IMAGE {
        return None;
    }

    match media_type.subtype() {
        mime::JPEG => Some(ImageKind::Jpeg),
        mime::PNG => Some(ImageKind::Png),
        mime::GIF => Some(ImageKind::Gif),
        _ => None,
    }
}

/// Same as [`classify`] for a header that may be missing
pub fn classify_header(content_type: Option<&str>) -> Option<ImageKind> {
    content_type.and_then(classify)
}
