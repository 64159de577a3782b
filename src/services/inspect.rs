use std::fmt;
use std::path::{Path, PathBuf};

use backdrop_fill::{BackdropRemover, Rgb, Rgba, RgbaImage};
use serde::{Serialize, Serializer};

use crate::codec::{decode_png, SourceColor};
use crate::error::ProcessError;

/// Pixels reported by [`inspect`]; x is clamped to the image width.
const PROBES: [(u32, u32); 2] = [(0, 0), (10, 0)];

/// Transparency found in the decoded pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "alpha", rename_all = "snake_case")]
pub enum AlphaStatus {
    /// The file has no alpha channel or tRNS chunk at all
    NoAlphaChannel,
    /// An alpha channel exists but every pixel is fully opaque
    Opaque,
    Translucent { min_alpha: u8 },
}

impl fmt::Display for AlphaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlphaStatus::NoAlphaChannel => f.write_str("no alpha channel"),
            AlphaStatus::Opaque => f.write_str("alpha channel, fully opaque"),
            AlphaStatus::Translucent { min_alpha } => {
                write!(f, "alpha channel, min alpha {min_alpha}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Probe {
    pub x: u32,
    pub y: u32,
    #[serde(serialize_with = "rgba_tuple")]
    pub pixel: Rgba,
}

fn rgba_tuple<S: Serializer>(pixel: &Rgba, serializer: S) -> Result<S::Ok, S::Error> {
    pixel.to_bytes().serialize(serializer)
}

/// Read-only look at one file: what it contains and what a run would do.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub source_color: SourceColor,
    #[serde(flatten)]
    pub alpha: AlphaStatus,
    pub transparent_pixels: usize,
    pub probes: Vec<Probe>,
    #[serde(serialize_with = "hex_counts")]
    pub dominant: Vec<(Rgb, u32)>,
    #[serde(serialize_with = "hex_list")]
    pub targets: Vec<Rgb>,
    pub seeds: usize,
    pub would_remove: usize,
}

fn hex_counts<S: Serializer>(colors: &[(Rgb, u32)], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(colors.iter().map(|(c, n)| (c.to_hex(), *n)))
}

fn hex_list<S: Serializer>(colors: &[Rgb], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(colors.iter().map(|c| c.to_hex()))
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path.display())?;
        writeln!(
            f,
            "  size:     {}x{} ({})",
            self.width, self.height, self.source_color
        )?;
        writeln!(f, "  alpha:    {}", self.alpha)?;
        writeln!(f, "  cleared:  {} pixels", self.transparent_pixels)?;
        for probe in &self.probes {
            let [r, g, b, a] = probe.pixel.to_bytes();
            writeln!(
                f,
                "  pixel ({}, {}): ({r}, {g}, {b}, {a})",
                probe.x, probe.y
            )?;
        }
        let dominant: Vec<String> = self
            .dominant
            .iter()
            .map(|(c, n)| format!("{c} x{n}"))
            .collect();
        writeln!(f, "  dominant: {}", dominant.join(", "))?;
        if self.targets.is_empty() {
            writeln!(f, "  targets:  none (no background detected)")?;
        } else {
            let targets: Vec<String> = self.targets.iter().map(|c| c.to_hex()).collect();
            writeln!(f, "  targets:  {}", targets.join(", "))?;
        }
        write!(
            f,
            "  fill:     {} seeds, would remove {} pixels",
            self.seeds, self.would_remove
        )
    }
}

/// Decode `path` and report its transparency and the remover's verdict.
/// The file is never written.
pub fn inspect(path: &Path, remover: &BackdropRemover) -> Result<InspectReport, ProcessError> {
    if !path.is_file() {
        return Err(ProcessError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| ProcessError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = decode_png(&bytes).map_err(|e| ProcessError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let image = &decoded.image;
    let diagnostics = remover.analyze(image);
    tracing::debug!(
        path = %path.display(),
        seeds = diagnostics.seeds,
        would_remove = diagnostics.removed,
        "Inspected image"
    );

    Ok(InspectReport {
        path: path.to_path_buf(),
        width: image.width(),
        height: image.height(),
        source_color: decoded.source_color,
        alpha: alpha_status(image, decoded.source_color.has_alpha),
        transparent_pixels: image.count_transparent(),
        probes: probes(image),
        dominant: diagnostics.dominant,
        targets: diagnostics.targets,
        seeds: diagnostics.seeds,
        would_remove: diagnostics.removed,
    })
}

fn alpha_status(image: &RgbaImage, has_alpha: bool) -> AlphaStatus {
    if !has_alpha {
        return AlphaStatus::NoAlphaChannel;
    }
    match image.min_alpha() {
        255 => AlphaStatus::Opaque,
        min_alpha => AlphaStatus::Translucent { min_alpha },
    }
}

fn probes(image: &RgbaImage) -> Vec<Probe> {
    let mut probes: Vec<Probe> = Vec::with_capacity(PROBES.len());
    for (x, y) in PROBES {
        let x = x.min(image.width() - 1);
        let y = y.min(image.height() - 1);
        if probes.iter().any(|p| p.x == x && p.y == y) {
            continue;
        }
        probes.push(Probe {
            x,
            y,
            pixel: image.get(x, y),
        });
    }
    probes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_png;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inspect_reports_verdict_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.png");
        let mut image = RgbaImage::new(12, 12, Rgba::opaque(Rgb::gray(204))).unwrap();
        image.set(6, 6, Rgba::opaque(Rgb::new(0, 120, 0)));
        let bytes = encode_png(&image, false).unwrap();
        std::fs::write(&path, &bytes).unwrap();

        let report = inspect(&path, &BackdropRemover::new()).unwrap();

        assert_eq!((report.width, report.height), (12, 12));
        assert_eq!(report.alpha, AlphaStatus::Opaque);
        assert_eq!(report.transparent_pixels, 0);
        assert_eq!(report.targets, vec![Rgb::gray(204)]);
        assert_eq!(report.would_remove, 143);
        assert_eq!(
            report.probes,
            vec![
                Probe {
                    x: 0,
                    y: 0,
                    pixel: Rgba::opaque(Rgb::gray(204)),
                },
                Probe {
                    x: 10,
                    y: 0,
                    pixel: Rgba::opaque(Rgb::gray(204)),
                },
            ]
        );
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_probe_clamped_on_narrow_image() {
        let image = RgbaImage::new(4, 1, Rgba::TRANSPARENT).unwrap();
        let found = probes(&image);
        assert_eq!(found.len(), 2);
        assert_eq!((found[1].x, found[1].y), (3, 0));

        let dot = RgbaImage::new(1, 1, Rgba::TRANSPARENT).unwrap();
        assert_eq!(probes(&dot).len(), 1);
    }

    #[test]
    fn test_alpha_status() {
        let mut image = RgbaImage::new(2, 2, Rgba::opaque(Rgb::gray(9))).unwrap();
        assert_eq!(alpha_status(&image, false), AlphaStatus::NoAlphaChannel);
        assert_eq!(alpha_status(&image, true), AlphaStatus::Opaque);

        image.set(1, 1, Rgba::new(9, 9, 9, 40));
        assert_eq!(
            alpha_status(&image, true),
            AlphaStatus::Translucent { min_alpha: 40 }
        );
        assert_eq!(
            AlphaStatus::Translucent { min_alpha: 40 }.to_string(),
            "alpha channel, min alpha 40"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = inspect(Path::new("/no/such/file.png"), &BackdropRemover::new()).unwrap_err();
        assert!(matches!(err, ProcessError::NotFound(_)));
    }
}
