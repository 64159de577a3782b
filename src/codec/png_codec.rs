use std::fmt;
use std::io::Cursor;

use backdrop_fill::RgbaImage;
use serde::Serialize;

use crate::error::CodecError;

/// Color layout stored in the PNG header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorKind {
    Grayscale,
    GrayscaleAlpha,
    Rgb,
    Rgba,
    Indexed,
}

impl From<png::ColorType> for ColorKind {
    fn from(color: png::ColorType) -> Self {
        match color {
            png::ColorType::Grayscale => ColorKind::Grayscale,
            png::ColorType::GrayscaleAlpha => ColorKind::GrayscaleAlpha,
            png::ColorType::Rgb => ColorKind::Rgb,
            png::ColorType::Rgba => ColorKind::Rgba,
            png::ColorType::Indexed => ColorKind::Indexed,
        }
    }
}

impl fmt::Display for ColorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorKind::Grayscale => "grayscale",
            ColorKind::GrayscaleAlpha => "grayscale+alpha",
            ColorKind::Rgb => "RGB",
            ColorKind::Rgba => "RGBA",
            ColorKind::Indexed => "indexed",
        };
        f.write_str(name)
    }
}

/// What the file looked like before it was expanded to RGBA8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceColor {
    pub color_type: ColorKind,
    pub bit_depth: u8,
    /// Alpha channel or a tRNS chunk was present
    pub has_alpha: bool,
}

impl fmt::Display for SourceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-bit", self.color_type, self.bit_depth)?;
        if self.has_alpha && !matches!(self.color_type, ColorKind::Rgba | ColorKind::GrayscaleAlpha)
        {
            f.write_str(" (tRNS)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: RgbaImage,
    pub source_color: SourceColor,
}

/// Decode a PNG of any color type and bit depth into RGBA8.
///
/// Palettes and low bit depths are expanded, 16-bit samples are reduced to
/// their high byte and a tRNS chunk becomes real alpha.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let source_color = {
        let info = reader.info();
        SourceColor {
            color_type: info.color_type.into(),
            bit_depth: info.bit_depth as u8,
            has_alpha: matches!(
                info.color_type,
                png::ColorType::Rgba | png::ColorType::GrayscaleAlpha
            ) || info.trns.is_some(),
        }
    };

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(CodecError::Unsupported(format!(
            "{}-bit samples after expansion",
            frame.bit_depth as u8
        )));
    }

    let rgba = expand_to_rgba(&buf, frame.color_type)?;
    let image = RgbaImage::from_raw(frame.width, frame.height, rgba)
        .map_err(|e| CodecError::Unsupported(e.to_string()))?;

    Ok(DecodedImage {
        image,
        source_color,
    })
}

fn expand_to_rgba(data: &[u8], color_type: png::ColorType) -> Result<Vec<u8>, CodecError> {
    let rgba = match color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(CodecError::Unsupported(
                "indexed samples after expansion".to_string(),
            ))
        }
    };
    Ok(rgba)
}

/// Encode an image as an 8-bit RGBA PNG.
///
/// With `optimize` the result is re-compressed with oxipng; if that fails
/// the plain encoding is returned.
pub fn encode_png(image: &RgbaImage, optimize: bool) -> Result<Vec<u8>, CodecError> {
    let raw: Vec<u8> = image.pixels().iter().flat_map(|p| p.to_bytes()).collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if optimize {
            // oxipng picks filters and compression afterwards
            encoder.set_compression(png::Compression::Fast);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raw)?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Re-compressed PNG"
            );
            Ok(optimized)
        }
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, keeping unoptimized PNG");
            Ok(png_bytes)
        }
    }
}
