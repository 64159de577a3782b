use std::fmt;
use std::path::{Path, PathBuf};

use backdrop_fill::{BackdropRemover, Diagnostics, Removal, Rgb};
use serde::{Serialize, Serializer};

use crate::codec::{decode_png, encode_png};
use crate::error::{ConfigError, ProcessError};
use crate::models::AppConfig;

/// What happened to one file.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Backdrop pixels were erased (and written back unless `written` is false)
    Cleared {
        seeds: usize,
        removed: usize,
        #[serde(serialize_with = "hex_colors")]
        targets: Vec<Rgb>,
        written: bool,
    },
    /// No border color qualified as backdrop; file untouched
    NoBackgroundDetected,
    /// Backdrop found but nothing reachable to erase; file untouched
    NoChangeMade { seeds: usize },
    /// The fill would have erased too much of the image; file untouched
    Refused { fraction: f64 },
    Failed {
        kind: &'static str,
        #[serde(serialize_with = "display")]
        error: ProcessError,
    },
}

impl Outcome {
    fn failed(error: ProcessError) -> Self {
        Outcome::Failed {
            kind: error.kind(),
            error,
        }
    }
}

fn hex_colors<S: Serializer>(colors: &[Rgb], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(colors.iter().map(|c| c.to_hex()))
}

fn display<S: Serializer>(value: &ProcessError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Per-file result of [`ImageProcessor::process`].
#[derive(Debug, Serialize)]
pub struct ProcessReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ProcessReport {
    /// Pixels erased from this file.
    pub fn removed_count(&self) -> usize {
        match self.outcome {
            Outcome::Cleared { removed, .. } => removed,
            _ => 0,
        }
    }

    /// Why the file was left as it was, if it was.
    pub fn skipped_reason(&self) -> Option<String> {
        match &self.outcome {
            Outcome::Cleared { .. } => None,
            Outcome::NoBackgroundDetected => Some("no background detected".to_string()),
            Outcome::NoChangeMade { .. } => Some("no changes".to_string()),
            Outcome::Refused { fraction } => Some(format!(
                "refused: would erase {:.0}% of image",
                fraction * 100.0
            )),
            Outcome::Failed { error, .. } => Some(error.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.outcome {
            Outcome::Cleared {
                seeds,
                removed,
                targets,
                written,
            } => {
                write!(
                    f,
                    "{path}: removed {removed} pixels from {seeds} seeds (targets {})",
                    join_colors(targets)
                )?;
                if !written {
                    f.write_str(" [dry run]")?;
                }
                Ok(())
            }
            Outcome::NoChangeMade { seeds } => {
                write!(f, "{path}: skipped, no changes ({seeds} seeds)")
            }
            Outcome::Failed { error, .. } => write!(f, "{path}: failed, {error}"),
            _ => write!(
                f,
                "{path}: skipped, {}",
                self.skipped_reason().unwrap_or_default()
            ),
        }
    }
}

fn join_colors(colors: &[Rgb]) -> String {
    colors
        .iter()
        .map(|c| c.to_hex())
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_counts(colors: &[(Rgb, u32)]) -> String {
    colors
        .iter()
        .map(|(c, n)| format!("{c}x{n}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs the remover over files on disk, one file at a time.
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    remover: BackdropRemover,
    optimize: bool,
    dry_run: bool,
}

impl ImageProcessor {
    pub fn new(remover: BackdropRemover) -> Self {
        Self {
            remover,
            optimize: false,
            dry_run: false,
        }
    }

    /// Build a processor from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.remover()?).optimize(config.optimize))
    }

    /// Re-compress written files with oxipng.
    pub fn optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Report what would be removed without writing anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn remover(&self) -> &BackdropRemover {
        &self.remover
    }

    /// Load, clear and save one file. Errors are captured in the report.
    pub fn process(&self, path: &Path) -> ProcessReport {
        let outcome = match self.try_process(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to process image");
                Outcome::failed(e)
            }
        };
        ProcessReport {
            path: path.to_path_buf(),
            outcome,
        }
    }

    fn try_process(&self, path: &Path) -> Result<Outcome, ProcessError> {
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
        tracing::debug!(
            path = %path.display(),
            width = decoded.image.width(),
            height = decoded.image.height(),
            source = %decoded.source_color,
            "Decoded image"
        );

        let mut image = decoded.image;
        let removal = self.remover.remove(&mut image);
        log_diagnostics(path, removal.diagnostics());

        let outcome = match removal {
            Removal::NoBackdrop { .. } => Outcome::NoBackgroundDetected,
            Removal::Unchanged { diagnostics } => Outcome::NoChangeMade {
                seeds: diagnostics.seeds,
            },
            Removal::Refused { fraction, .. } => {
                tracing::warn!(
                    path = %path.display(),
                    fraction,
                    "Refusing fill that would erase most of the image"
                );
                Outcome::Refused { fraction }
            }
            Removal::Cleared { diagnostics } => {
                let written = !self.dry_run;
                if written {
                    let png_bytes =
                        encode_png(&image, self.optimize).map_err(|e| ProcessError::Encode {
                            path: path.to_path_buf(),
                            message: e.to_string(),
                        })?;
                    std::fs::write(path, &png_bytes).map_err(|source| ProcessError::Io {
                        path: path.to_path_buf(),
                        source,
                    })?;
                    tracing::info!(
                        path = %path.display(),
                        removed = diagnostics.removed,
                        bytes = png_bytes.len(),
                        "Saved cleared image"
                    );
                }
                Outcome::Cleared {
                    seeds: diagnostics.seeds,
                    removed: diagnostics.removed,
                    targets: diagnostics.targets,
                    written,
                }
            }
        };
        Ok(outcome)
    }
}

fn log_diagnostics(path: &Path, diagnostics: &Diagnostics) {
    tracing::debug!(
        path = %path.display(),
        sampled = diagnostics.sampled,
        dominant = %join_counts(&diagnostics.dominant),
        "Sampled border"
    );
    tracing::info!(
        path = %path.display(),
        targets = %join_colors(&diagnostics.targets),
        seeds = diagnostics.seeds,
        removed = diagnostics.removed,
        "Backdrop analysis"
    );
}
