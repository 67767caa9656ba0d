use clap::ValueEnum;
use image::ImageFormat;

/// Extensions recognized during directory discovery (lowercase, no dot).
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "gif", "tiff", "tif", "webp", "ico",
];

/// Output encoding requested by the user.
///
/// `jpg`/`jpeg` and `tif`/`tiff` are aliases for the same encoder; they are
/// kept as distinct variants so the output file keeps the extension the user
/// asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetFormat {
    #[value(name = "jpg")]
    Jpg,
    #[value(name = "jpeg")]
    Jpeg,
    #[value(name = "png")]
    Png,
    #[value(name = "bmp")]
    Bmp,
    #[value(name = "gif")]
    Gif,
    #[value(name = "tiff")]
    Tiff,
    #[value(name = "tif")]
    Tif,
    #[value(name = "webp")]
    Webp,
    #[value(name = "ico")]
    Ico,
}

impl TargetFormat {
    /// Canonical encoder identifier for the image crate.
    pub fn image_format(&self) -> ImageFormat {
        match self {
            TargetFormat::Jpg | TargetFormat::Jpeg => ImageFormat::Jpeg,
            TargetFormat::Png => ImageFormat::Png,
            TargetFormat::Bmp => ImageFormat::Bmp,
            TargetFormat::Gif => ImageFormat::Gif,
            TargetFormat::Tiff | TargetFormat::Tif => ImageFormat::Tiff,
            TargetFormat::Webp => ImageFormat::WebP,
            TargetFormat::Ico => ImageFormat::Ico,
        }
    }

    /// File extension used for output files (the user-facing name).
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Jpg => "jpg",
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Png => "png",
            TargetFormat::Bmp => "bmp",
            TargetFormat::Gif => "gif",
            TargetFormat::Tiff => "tiff",
            TargetFormat::Tif => "tif",
            TargetFormat::Webp => "webp",
            TargetFormat::Ico => "ico",
        }
    }

    /// Whether the encoded file can carry an alpha channel.
    /// Only the JPEG family cannot represent transparency.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, TargetFormat::Jpg | TargetFormat::Jpeg)
    }

    /// Whether the encoder takes the 0-100 quality parameter into account.
    pub fn uses_quality(&self) -> bool {
        matches!(self, TargetFormat::Jpg | TargetFormat::Jpeg)
    }

    /// All supported formats, in declaration order.
    pub fn all() -> &'static [TargetFormat] {
        &[
            TargetFormat::Jpg,
            TargetFormat::Jpeg,
            TargetFormat::Png,
            TargetFormat::Bmp,
            TargetFormat::Gif,
            TargetFormat::Tiff,
            TargetFormat::Tif,
            TargetFormat::Webp,
            TargetFormat::Ico,
        ]
    }

    /// Parse a user-supplied format name (case-insensitive).
    pub fn parse(name: &str) -> Option<TargetFormat> {
        <TargetFormat as ValueEnum>::from_str(name.trim(), true).ok()
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpg_alias_maps_to_jpeg_encoder() {
        assert_eq!(TargetFormat::Jpg.image_format(), ImageFormat::Jpeg);
        assert_eq!(TargetFormat::Jpeg.image_format(), ImageFormat::Jpeg);
        assert_eq!(TargetFormat::Tif.image_format(), ImageFormat::Tiff);
    }

    #[test]
    fn test_extension_keeps_user_facing_name() {
        assert_eq!(TargetFormat::Jpg.extension(), "jpg");
        assert_eq!(TargetFormat::Jpeg.extension(), "jpeg");
        assert_eq!(TargetFormat::Tif.extension(), "tif");
    }

    #[test]
    fn test_alpha_support() {
        assert!(!TargetFormat::Jpg.supports_alpha());
        assert!(!TargetFormat::Jpeg.supports_alpha());
        assert!(TargetFormat::Png.supports_alpha());
        assert!(TargetFormat::Webp.supports_alpha());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(TargetFormat::parse("PNG"), Some(TargetFormat::Png));
        assert_eq!(TargetFormat::parse(" webp "), Some(TargetFormat::Webp));
        assert_eq!(TargetFormat::parse("heic"), None);
        assert_eq!(TargetFormat::parse(""), None);
    }

    #[test]
    fn test_whitelist_covers_all_targets() {
        for format in TargetFormat::all() {
            assert!(IMAGE_EXTENSIONS.contains(&format.extension()));
        }
    }
}
