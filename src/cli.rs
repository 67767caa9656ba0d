use clap::Parser;
use std::path::PathBuf;

use crate::conversion::TargetFormat;

/// Quality used when the requested value is out of range.
pub const DEFAULT_QUALITY: u8 = 85;

#[derive(Parser, Debug)]
#[command(
    name = "imgbatch",
    about = "Batch image format converter",
    long_about = "
imgbatch - Batch Image Format Converter

Converts every image found in a directory to a single target format.
Decoding and encoding are handled by the image crate; supported targets
are jpg, jpeg, png, bmp, gif, tiff, tif, webp and ico.

Run without any arguments to use the interactive prompt instead of flags.

Example Usage:
  # Convert a folder of mixed images to JPEG at default quality
  imgbatch -i ~/Photos -f jpg

  # Recursive conversion to PNG into a custom output directory
  imgbatch -i ~/Photos -o ~/converted -f png -r

  # Low-quality JPEG thumbnails
  imgbatch -i ~/Photos -f jpg -q 40"
)]
pub struct Args {
    /// Input directory to scan for images
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Output directory for converted images (created if missing)
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Target format
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    pub format: TargetFormat,

    /// Recurse into subdirectories
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Output quality for lossy formats (0-100)
    #[arg(short = 'q', long = "quality", default_value_t = DEFAULT_QUALITY, value_name = "N")]
    pub quality: u8,
}

impl Args {
    /// Quality after range validation. Values above 100 fall back to the
    /// default, the same policy the interactive prompt applies.
    pub fn effective_quality(&self) -> u8 {
        if self.quality > 100 {
            DEFAULT_QUALITY
        } else {
            self.quality
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::try_parse_from(["imgbatch", "-i", "/tmp/in", "-f", "png"]).unwrap();
        assert_eq!(args.input_dir, PathBuf::from("/tmp/in"));
        assert_eq!(args.output_dir, PathBuf::from("output"));
        assert_eq!(args.format, TargetFormat::Png);
        assert!(!args.recursive);
        assert_eq!(args.quality, DEFAULT_QUALITY);
    }

    #[test]
    fn test_parse_all_flags() {
        let args = Args::try_parse_from([
            "imgbatch", "-i", "in", "-o", "out", "-f", "jpg", "-r", "-q", "70",
        ])
        .unwrap();
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert_eq!(args.format, TargetFormat::Jpg);
        assert!(args.recursive);
        assert_eq!(args.effective_quality(), 70);
    }

    #[test]
    fn test_missing_required_flags_are_rejected() {
        assert!(Args::try_parse_from(["imgbatch", "-f", "png"]).is_err());
        assert!(Args::try_parse_from(["imgbatch", "-i", "in"]).is_err());
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        assert!(Args::try_parse_from(["imgbatch", "-i", "in", "-f", "heic"]).is_err());
    }

    #[test]
    fn test_out_of_range_quality_falls_back_to_default() {
        let args = Args::try_parse_from(["imgbatch", "-i", "in", "-f", "jpg", "-q", "120"]).unwrap();
        assert_eq!(args.quality, 120);
        assert_eq!(args.effective_quality(), DEFAULT_QUALITY);
    }
}
