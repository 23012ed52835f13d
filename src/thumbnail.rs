use std::path::Path;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssetKind {
    Image,
    Document,
    Audio,
    Video,
    Other,
}

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "txt", "md", "json", "xml", "html", "css", "js", "cs", "java", "py", "cpp", "c", "h",
];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "m4a", "wma"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tga", "tif", "tiff"];

impl AssetKind {
    /// The kind shown for a catalogued file. Only a file that decoded as an
    /// image counts as one; an image extension that failed to decode is
    /// `Other`.
    pub fn detect(extension: &str, decodes_as_image: bool) -> AssetKind {
        if decodes_as_image {
            return AssetKind::Image;
        }
        match AssetKind::classify(extension) {
            AssetKind::Image => AssetKind::Other,
            kind => kind,
        }
    }

    /// Classifies by extension, with or without the leading dot, any case.
    pub fn classify(extension: &str) -> AssetKind {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        let ext = ext.as_str();
        if IMAGE_EXTENSIONS.contains(&ext) {
            AssetKind::Image
        } else if DOCUMENT_EXTENSIONS.contains(&ext) {
            AssetKind::Document
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            AssetKind::Audio
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            AssetKind::Video
        } else {
            AssetKind::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Document => "document",
            AssetKind::Audio => "audio",
            AssetKind::Video => "video",
            AssetKind::Other => "other",
        }
    }
}

/// True when the file's header decodes as an image, whatever its extension.
pub fn probe_image(path: &Path) -> bool {
    let reader = match image::ImageReader::open(path).and_then(|r| r.with_guessed_format()) {
        Ok(reader) => reader,
        Err(_) => return false,
    };
    if reader.format().is_none() {
        return false;
    }
    reader.into_dimensions().is_ok()
}

/// The thumbnail for a file: the file itself when it is an image.
pub fn thumbnail_for(path: &Path) -> Option<String> {
    if !probe_image(path) {
        return None;
    }
    path.to_str().map(str::to_owned)
}
