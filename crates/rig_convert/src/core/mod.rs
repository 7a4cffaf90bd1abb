//! # Core Module
//!
//! Shared abstractions used by every stage of a conversion run.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for logging, output, materials, document and bones

pub mod config;

pub use crate::foundation;
pub use crate::assets;

pub use config::{
    ConvertConfig,
    LoggingConfig,
    OutputConfig,
    MaterialConfig,
    DocumentConfig,
    BoneConfig,
    UpAxis,
    Config,
    ConfigError,
};
