//! # Supported Media Types
//!
//! The fixed allow-list of MIME types accepted in a record's `type` field.
//! Matching is case-insensitive on the full `type/subtype` and ignores any
//! `;`-delimited parameters (`image/svg+xml; charset=utf-8`).

/// Every MIME type a metadata record may declare in `type`.
pub const SUPPORTED_MEDIA_TYPES: &[&str] = &[
    // Images
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    "image/avif",
    "image/bmp",
    "image/tiff",
    // Video
    "video/mp4",
    "video/webm",
    "video/quicktime",
    "video/ogg",
    // Audio
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/ogg",
    "audio/flac",
    "audio/aac",
    // 3D models
    "model/gltf-binary",
    "model/gltf+json",
    // Documents
    "application/pdf",
    "text/html",
    "text/plain",
];

/// Returns true if `mime` is on the [`SUPPORTED_MEDIA_TYPES`] allow-list.
pub fn is_supported_media_type(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or(mime).trim();
    SUPPORTED_MEDIA_TYPES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(essence))
}
