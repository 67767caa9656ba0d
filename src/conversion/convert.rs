use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::format::TargetFormat;

/// Outcome of a single file conversion. Exactly one of `output_path` and
/// `error` is populated.
#[derive(Debug)]
pub struct ConversionResult {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl ConversionResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Convert one image file to the target format.
///
/// Creates the output directory if it does not exist and writes
/// `<output_dir>/<stem>.<target extension>`. Any error raised by the image
/// crate or the filesystem (corrupt file, unsupported layout, disk full)
/// is captured in the returned result, never propagated.
pub fn convert_image(
    input_path: &Path,
    output_dir: &Path,
    format: TargetFormat,
    quality: u8,
) -> ConversionResult {
    match convert_inner(input_path, output_dir, format, quality) {
        Ok(output_path) => ConversionResult {
            input_path: input_path.to_path_buf(),
            output_path: Some(output_path),
            error: None,
        },
        Err(e) => ConversionResult {
            input_path: input_path.to_path_buf(),
            output_path: None,
            // `{:#}` keeps the context chain in a single line
            error: Some(format!("{:#}", e)),
        },
    }
}

fn convert_inner(
    input_path: &Path,
    output_dir: &Path,
    format: TargetFormat,
    quality: u8,
) -> Result<PathBuf> {
    let img = image::open(input_path)
        .with_context(|| format!("Failed to open image: {}", input_path.display()))?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));

    let img = normalize_color_mode(img, format);
    encode(&img, &output_path, format, quality)
        .with_context(|| format!("Failed to encode {}", output_path.display()))?;

    Ok(output_path)
}

/// Normalize the decoded pixel layout for the target encoder.
///
/// Everything is flattened to 8-bit RGB or RGBA: palette, grayscale and
/// 16-bit sources all go through here. The JPEG family cannot represent
/// transparency so it always gets plain RGB; GIF and ICO encoders expect
/// RGBA input; all other targets keep the alpha channel iff the source
/// carried one.
fn normalize_color_mode(img: DynamicImage, format: TargetFormat) -> DynamicImage {
    match format {
        TargetFormat::Jpg | TargetFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        TargetFormat::Gif | TargetFormat::Ico => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => {
            if img.color().has_alpha() {
                DynamicImage::ImageRgba8(img.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(img.to_rgb8())
            }
        }
    }
}

/// Write the image with format-specific encoder options.
///
/// JPEG honors the requested quality (the image crate's encoder writes
/// 4:4:4, no chroma subsampling). PNG is lossless so quality does not
/// apply; it gets the strongest compression instead. The remaining
/// formats use the crate's default encoder settings (WEBP encoding is
/// lossless in the image crate).
fn encode(img: &DynamicImage, output_path: &Path, format: TargetFormat, quality: u8) -> Result<()> {
    match format {
        TargetFormat::Jpg | TargetFormat::Jpeg => {
            let file = File::create(output_path)?;
            let writer = BufWriter::new(file);
            img.write_with_encoder(JpegEncoder::new_with_quality(writer, quality))?;
        }
        TargetFormat::Png => {
            let file = File::create(output_path)?;
            let writer = BufWriter::new(file);
            img.write_with_encoder(PngEncoder::new_with_quality(
                writer,
                CompressionType::Best,
                FilterType::Adaptive,
            ))?;
        }
        _ => {
            img.save_with_format(output_path, format.image_format())?;
        }
    }
    Ok(())
}
