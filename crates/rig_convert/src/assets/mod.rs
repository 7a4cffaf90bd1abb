//! Source asset parsing
//!
//! Readers for the two text formats a conversion consumes: Wavefront OBJ
//! meshes and their MTL material tables.

pub mod obj_parser;
pub mod materials;

pub use obj_parser::{ObjParser, ObjData};
pub use materials::{MtlParser, Material, MaterialTable, MaterialLibrary};

use std::path::PathBuf;
use thiserror::Error;

use crate::foundation::math::Vec3;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Malformed token in a source file
    #[error("{source_name}:{line}: {message}")]
    Parse {
        /// File name or label of the parsed text
        source_name: String,
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// Source could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying cause
        source: std::io::Error,
    },
}

impl AssetError {
    /// Build an IO error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Position of the line being parsed, used to build errors
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineContext<'a> {
    pub source_name: &'a str,
    pub line: usize,
}

impl<'a> LineContext<'a> {
    pub fn new(source_name: &'a str, line: usize) -> Self {
        Self { source_name, line }
    }

    pub fn error(&self, message: impl Into<String>) -> AssetError {
        AssetError::Parse {
            source_name: self.source_name.to_string(),
            line: self.line,
            message: message.into(),
        }
    }

    /// Parse a single finite float token
    pub fn parse_f32(&self, command: &str, token: &str) -> Result<f32, AssetError> {
        token.parse::<f32>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| self.error(format!("{command} invalid float value '{token}'")))
    }

    /// Parse the remaining tokens as floats and keep the first three
    ///
    /// Every token has to be a valid float, even the ones that are dropped.
    pub fn parse_vec3<'t, I>(&self, command: &str, tokens: I) -> Result<Vec3, AssetError>
    where
        I: Iterator<Item = &'t str>,
    {
        let values = tokens
            .map(|token| self.parse_f32(command, token))
            .collect::<Result<Vec<f32>, _>>()?;

        match values.as_slice() {
            [x, y, z, ..] => Ok(Vec3::new(*x, *y, *z)),
            _ => Err(self.error(format!(
                "{command} expects at least 3 values, found {}",
                values.len()
            ))),
        }
    }

    /// Take the next token or fail with "missing <what>"
    pub fn required<'t, I>(&self, command: &str, what: &str, tokens: &mut I) -> Result<&'t str, AssetError>
    where
        I: Iterator<Item = &'t str>,
    {
        tokens.next()
            .ok_or_else(|| self.error(format!("{command} missing {what}")))
    }
}
