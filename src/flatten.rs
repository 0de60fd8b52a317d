use std::fs;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, DynamicImage, ImageBuffer, Pixel, Primitive, Rgb, Rgba};

use crate::error::FlattenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Transparency was removed and the file rewritten.
    Fixed,
    /// The file has no alpha and was left as is.
    Skipped,
}

/// Whether the decoded image carries any alpha.
///
/// The PNG decoder expands palettes and `tRNS` color keys into an alpha
/// channel, so palette-level transparency is reported here too.
pub fn has_transparency(img: &DynamicImage) -> bool {
    img.color().has_alpha()
}

/// Flattens the PNG at `path` onto `background`, overwriting it in place.
///
/// Files without transparency are never opened for writing.
pub fn flatten(path: &Path, background: Rgb<u8>) -> Result<Outcome, FlattenError> {
    let img = image::open(path).map_err(|source| FlattenError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        color = ?img.color(),
        width = img.width(),
        height = img.height(),
        "decoded {}",
        path.display()
    );

    if !has_transparency(&img) {
        return Ok(Outcome::Skipped);
    }

    rewrite(path, &composite(&img, background))?;
    Ok(Outcome::Fixed)
}

/// Encodes `flat` as PNG and replaces the file at `path` with it.
///
/// The whole image is encoded before the file is opened.
fn rewrite(path: &Path, flat: &DynamicImage) -> Result<(), FlattenError> {
    let bytes = encode_png(flat).map_err(|source| FlattenError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, &bytes).map_err(|source| FlattenError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Composites `img` over an opaque canvas filled with `background`, using the
/// image's own alpha as the blend mask.
///
/// 16-bit and float sources produce an `Rgb16` canvas, everything else `Rgb8`.
pub fn composite(img: &DynamicImage, background: Rgb<u8>) -> DynamicImage {
    match img.color() {
        ColorType::L16
        | ColorType::La16
        | ColorType::Rgb16
        | ColorType::Rgba16
        | ColorType::Rgb32F
        | ColorType::Rgba32F => {
            let wide = Rgb(background.0.map(|c| u16::from(c) * 257));
            DynamicImage::ImageRgb16(blend_over(&img.to_rgba16(), wide))
        }
        _ => DynamicImage::ImageRgb8(blend_over(&img.to_rgba8(), background)),
    }
}

fn blend_over<S>(
    src: &ImageBuffer<Rgba<S>, Vec<S>>,
    background: Rgb<S>,
) -> ImageBuffer<Rgb<S>, Vec<S>>
where
    S: Primitive + Into<u64> + TryFrom<u64>,
    Rgba<S>: Pixel<Subpixel = S>,
    Rgb<S>: Pixel<Subpixel = S>,
{
    let max: u64 = S::DEFAULT_MAX_VALUE.into();
    let [bg_r, bg_g, bg_b] = background.0;

    ImageBuffer::from_fn(src.width(), src.height(), |x, y| {
        let [r, g, b, a] = src.get_pixel(x, y).0;
        let alpha: u64 = a.into();
        let mix = |c: S, bg: S| {
            let c: u64 = c.into();
            let bg: u64 = bg.into();
            let v = (c * alpha + bg * (max - alpha) + max / 2) / max;
            S::try_from(v).unwrap_or(S::DEFAULT_MAX_VALUE)
        };
        Rgb([mix(r, bg_r), mix(g, bg_g), mix(b, bg_b)])
    })
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(bytes)
}
