//! # Unified Configuration System
//!
//! All settings of a conversion run live here, grouped by the stage that reads
//! them. Every section has defaults matching the classic `mixamo2sl` behavior,
//! so an empty file (or no file at all) is a valid configuration.
//!
//! ## Configuration Categories
//!
//! - **Logging**: default log filter
//! - **Output**: destination naming and post-write verification
//! - **Materials**: material library discovery
//! - **Document**: COLLADA asset header
//! - **Bones**: bone list file locations

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use crate::foundation::logging;

pub use crate::config::{Config, ConfigError};

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level; `RUST_LOG` overrides it
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// # Output Configuration
///
/// Controls where the converted document lands and whether it is re-read
/// after writing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Suffix replacing the input extension, e.g. `hero.obj` -> `hero.m2sl.dae`
    pub suffix: String,
    /// Re-read the written document and check its triangle set
    pub verify: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: ".m2sl.dae".to_string(),
            verify: false,
        }
    }
}

/// # Material Configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    /// When no material file is given, load the first `mtllib` named by the OBJ
    pub discover_from_obj: bool,
}

/// Up axis written into the document header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpAxis {
    /// X up
    #[serde(rename = "X_UP")]
    X,
    /// Y up
    #[default]
    #[serde(rename = "Y_UP")]
    Y,
    /// Z up
    #[serde(rename = "Z_UP")]
    Z,
}

impl UpAxis {
    /// Name as written in COLLADA `<up_axis>`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "X_UP",
            Self::Y => "Y_UP",
            Self::Z => "Z_UP",
        }
    }
}

/// # Document Configuration
///
/// Values copied into the COLLADA `<asset>` header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// `<authoring_tool>` text
    pub authoring_tool: String,
    /// Up axis of the source mesh
    pub up_axis: UpAxis,
    /// Unit name
    pub unit_name: String,
    /// Size of one unit in meters
    pub unit_meter: f32,
}

impl DocumentConfig {
    /// Set the up axis
    pub fn with_up_axis(mut self, up_axis: UpAxis) -> Self {
        self.up_axis = up_axis;
        self
    }

    /// Set the unit
    pub fn with_unit(mut self, name: impl Into<String>, meter: f32) -> Self {
        self.unit_name = name.into();
        self.unit_meter = meter;
        self
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            authoring_tool: format!("rig_convert {}", env!("CARGO_PKG_VERSION")),
            up_axis: UpAxis::Y,
            unit_name: "meter".to_string(),
            unit_meter: 1.0,
        }
    }
}

/// # Bone Configuration
///
/// Bone list files used by the retargeting hooks. Relative paths resolve
/// against the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoneConfig {
    /// Where discovered bone names are written; `None` skips discovery
    pub discovered_list: Option<PathBuf>,
    /// Bone names in the source naming convention
    pub input_list: PathBuf,
    /// Bone names in the target naming convention
    pub output_list: PathBuf,
}

impl Default for BoneConfig {
    fn default() -> Self {
        Self {
            discovered_list: Some(PathBuf::from("getbones.ini")),
            input_list: PathBuf::from("inputbones.ini"),
            output_list: PathBuf::from("outputbones.ini"),
        }
    }
}

/// # Complete Converter Configuration
///
/// Top-level configuration handed to [`crate::ConversionPipeline`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Material configuration
    pub materials: MaterialConfig,
    /// Document header configuration
    pub document: DocumentConfig,
    /// Bone list configuration
    pub bones: BoneConfig,
}

impl ConvertConfig {
    /// Set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Enable or disable post-write verification
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.output.verify = verify;
        self
    }

    /// Set the bone list files
    pub fn with_bones(mut self, bones: BoneConfig) -> Self {
        self.bones = bones;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !logging::is_valid_level(&self.logging.level) {
            return Err(ConfigError::Invalid(format!("Unknown log level '{}'", self.logging.level)));
        }

        if self.output.suffix.is_empty() {
            return Err(ConfigError::Invalid("Output suffix cannot be empty".to_string()));
        }

        if !(self.document.unit_meter.is_finite() && self.document.unit_meter > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Unit size must be a positive number, got {}",
                self.document.unit_meter
            )));
        }

        Ok(())
    }
}

impl Config for ConvertConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ConvertConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.suffix, ".m2sl.dae");
        assert_eq!(config.bones.discovered_list, Some(PathBuf::from("getbones.ini")));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ConvertConfig = toml::from_str(
            r#"
[logging]
level = "debug"

[document]
up_axis = "Z_UP"
"#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.document.up_axis, UpAxis::Z);
        assert_eq!(config.document.unit_name, "meter");
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_toml_and_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConvertConfig::default()
            .with_log_level("warn")
            .with_verify(true);

        for name in ["config.toml", "config.ron"] {
            let path = dir.path().join(name);
            config.save_to_file(&path).unwrap();
            let loaded = ConvertConfig::load_from_file(&path).unwrap();
            assert_eq!(loaded, config, "round trip through {name}");
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(matches!(
            ConvertConfig::load_from_file(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = ConvertConfig::default().with_log_level("shouty");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ConvertConfig::default();
        config.output.suffix.clear();
        assert!(config.validate().is_err());

        let mut config = ConvertConfig::default();
        config.document = config.document.with_unit("inch", 0.0);
        assert!(config.validate().is_err());
    }
}
