use backdrop_fill::{BackdropRemover, Rgb, DEFAULT_REFERENCE_PALETTE};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "BGCLEAR_CONFIG";

/// Tuning and discovery settings, loaded from YAML.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Width in pixels of the border band sampled for backdrop colors
    #[serde(default = "default_border_depth")]
    pub border_depth: u32,

    /// Share of border samples a color must exceed to count as backdrop
    #[serde(default = "default_min_fraction")]
    pub min_fraction: f64,

    /// Distance under which a border color matches a reference tone
    #[serde(default = "default_palette_threshold")]
    pub palette_threshold: f32,

    /// Distance under which a pixel joins the fill
    #[serde(default = "default_fill_threshold")]
    pub fill_threshold: f32,

    /// Checkerboard tones always treated as backdrop when seen on the
    /// border, as hex strings
    #[serde(default = "default_reference_palette")]
    pub reference_palette: Vec<String>,

    /// Refuse fills that would erase more than this share of an image
    #[serde(default)]
    pub max_removed_fraction: Option<f64>,

    /// Re-compress written files with oxipng
    #[serde(default)]
    pub optimize: bool,

    /// File extensions picked up when a directory is given
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_border_depth() -> u32 {
    5
}

fn default_min_fraction() -> f64 {
    0.01
}

fn default_palette_threshold() -> f32 {
    20.0
}

fn default_fill_threshold() -> f32 {
    25.0
}

fn default_reference_palette() -> Vec<String> {
    DEFAULT_REFERENCE_PALETTE.iter().map(|c| c.to_hex()).collect()
}

fn default_extensions() -> Vec<String> {
    vec!["png".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            border_depth: default_border_depth(),
            min_fraction: default_min_fraction(),
            palette_threshold: default_palette_threshold(),
            fill_threshold: default_fill_threshold(),
            reference_palette: default_reference_palette(),
            max_removed_fraction: None,
            optimize: false,
            extensions: default_extensions(),
        }
    }
}

/// Per-run overrides from the command line. `None` keeps the file value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub border_depth: Option<u32>,
    pub min_fraction: Option<f64>,
    pub palette_threshold: Option<f32>,
    pub fill_threshold: Option<f32>,
    pub max_removed_fraction: Option<f64>,
    pub optimize: bool,
}

impl AppConfig {
    /// Load configuration from `path`, or return defaults when there is none.
    ///
    /// A path that was given but can't be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            border_depth = config.border_depth,
            fill_threshold = config.fill_threshold,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(depth) = overrides.border_depth {
            self.border_depth = depth;
        }
        if let Some(fraction) = overrides.min_fraction {
            self.min_fraction = fraction;
        }
        if let Some(threshold) = overrides.palette_threshold {
            self.palette_threshold = threshold;
        }
        if let Some(threshold) = overrides.fill_threshold {
            self.fill_threshold = threshold;
        }
        if overrides.max_removed_fraction.is_some() {
            self.max_removed_fraction = overrides.max_removed_fraction;
        }
        if overrides.optimize {
            self.optimize = true;
        }
    }

    /// Parse the reference palette into colors.
    pub fn palette(&self) -> Result<Vec<Rgb>, ConfigError> {
        self.reference_palette
            .iter()
            .map(|value| {
                value.parse().map_err(|source| ConfigError::Color {
                    value: value.clone(),
                    source,
                })
            })
            .collect()
    }

    /// Build a validated remover from these settings.
    pub fn remover(&self) -> Result<BackdropRemover, ConfigError> {
        let remover = BackdropRemover::new()
            .border_depth(self.border_depth)
            .min_fraction(self.min_fraction)
            .palette_threshold(self.palette_threshold)
            .fill_threshold(self.fill_threshold)
            .reference_palette(self.palette()?)
            .max_removed_fraction(self.max_removed_fraction)
            .validate()?;
        Ok(remover)
    }

    /// Whether `path` has one of the configured extensions (case-insensitive).
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }

    /// Render the effective configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Pick the config file: an explicit flag wins over the environment.
pub fn resolve_config_path(flag: Option<PathBuf>, env: Option<OsString>) -> Option<PathBuf> {
    flag.or_else(|| env.filter(|value| !value.is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.border_depth, 5);
        assert_eq!(config.min_fraction, 0.01);
        assert_eq!(config.palette_threshold, 20.0);
        assert_eq!(config.fill_threshold, 25.0);
        assert_eq!(
            config.reference_palette,
            vec!["#FFFFFF", "#CCCCCC", "#C0C0C0", "#999999"]
        );
        assert_eq!(config.max_removed_fraction, None);
        assert!(!config.optimize);
        assert_eq!(config.extensions, vec!["png"]);
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_file_keeps_other_defaults() {
        let file = write_config("border_depth: 8\nreference_palette: ['#F0F0F0']\n");
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.border_depth, 8);
        assert_eq!(config.reference_palette, vec!["#F0F0F0"]);
        assert_eq!(config.fill_threshold, 25.0);
        assert_eq!(config.extensions, vec!["png"]);
    }

    #[test]
    fn test_load_empty_mapping() {
        let file = write_config("{}\n");
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        match AppConfig::load(Some(&missing)) {
            Err(ConfigError::Read { path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected Read error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let file = write_config("border_dpeth: 3\n");
        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let mut config = AppConfig::default();
        config.apply(&Overrides {
            fill_threshold: Some(30.0),
            max_removed_fraction: Some(0.95),
            ..Default::default()
        });

        assert_eq!(config.fill_threshold, 30.0);
        assert_eq!(config.max_removed_fraction, Some(0.95));
        assert_eq!(config.border_depth, 5);
        assert!(!config.optimize);
    }

    #[test]
    fn test_remover_reflects_settings() {
        let config = AppConfig {
            border_depth: 3,
            fill_threshold: 12.5,
            reference_palette: vec!["#000".to_string()],
            ..Default::default()
        };
        let remover = config.remover().unwrap();

        assert_eq!(remover.get_border_depth(), 3);
        assert_eq!(remover.get_fill_threshold(), 12.5);
        assert_eq!(
            remover.classifier_options().reference_palette,
            vec![Rgb::new(0, 0, 0)]
        );
    }

    #[test]
    fn test_remover_rejects_bad_palette_and_options() {
        let bad_color = AppConfig {
            reference_palette: vec!["#GGGGGG".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            bad_color.remover(),
            Err(ConfigError::Color { ref value, .. }) if value == "#GGGGGG"
        ));

        let zero_depth = AppConfig {
            border_depth: 0,
            ..Default::default()
        };
        assert!(matches!(zero_depth.remover(), Err(ConfigError::Options(_))));
    }

    #[test]
    fn test_matches_extension() {
        let config = AppConfig {
            extensions: vec!["png".to_string(), ".apng".to_string()],
            ..Default::default()
        };
        assert!(config.matches_extension(Path::new("a/b.png")));
        assert!(config.matches_extension(Path::new("B.PNG")));
        assert!(config.matches_extension(Path::new("x.apng")));
        assert!(!config.matches_extension(Path::new("x.jpg")));
        assert!(!config.matches_extension(Path::new("README")));
    }

    #[test]
    fn test_yaml_round_trips_through_load() {
        let config = AppConfig {
            border_depth: 7,
            max_removed_fraction: Some(0.5),
            optimize: true,
            ..Default::default()
        };
        let file = write_config(&config.to_yaml().unwrap());
        assert_eq!(AppConfig::load(Some(file.path())).unwrap(), config);
    }

    #[test]
    fn test_resolve_config_path() {
        let flag = Some(PathBuf::from("flag.yaml"));
        let env = Some(OsString::from("env.yaml"));

        assert_eq!(
            resolve_config_path(flag.clone(), env.clone()),
            Some(PathBuf::from("flag.yaml"))
        );
        assert_eq!(
            resolve_config_path(None, env),
            Some(PathBuf::from("env.yaml"))
        );
        assert_eq!(resolve_config_path(None, Some(OsString::new())), None);
        assert_eq!(resolve_config_path(None, None), None);
    }
}
