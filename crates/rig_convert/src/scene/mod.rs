//! COLLADA scene documents
//!
//! Builds the document for one converted mesh, writes it, and reads the
//! primitive set back for verification.

pub mod document;
pub mod builder;
pub mod collada_writer;
pub mod collada_reader;

pub use document::{MeshDocument, Semantic, TriangleSet};
pub use builder::DocumentBuilder;
pub use collada_writer::{stage_document, write_document, StagedDocument};
pub use collada_reader::DocumentSummary;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Document building and serialization errors
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A triangle names a vertex that does not exist
    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        /// Triangle position in the index list
        triangle: usize,
        /// Offending 0-based index
        index: usize,
        /// Number of vertices
        vertex_count: usize,
    },

    /// A triangle corner has no matching normal
    #[error("Triangle {triangle} needs normal {index}, but the mesh has {normal_count} normals")]
    NormalOutOfRange {
        /// Triangle position in the index list
        triangle: usize,
        /// Offending 0-based index
        index: usize,
        /// Number of normals
        normal_count: usize,
    },

    /// Normal indices do not cover every triangle
    #[error("{triangles} triangles but {normals} normal index triples")]
    ChannelLength {
        /// Number of triangles
        triangles: usize,
        /// Number of normal index triples
        normals: usize,
    },

    /// XML encoder failure
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Failure writing into the in-memory buffer
    #[error("Encoding error: {0}")]
    Encode(#[from] std::io::Error),

    /// Destination could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying cause
        source: std::io::Error,
    },

    /// Document could not be read back
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// Document path
        path: PathBuf,
        /// Underlying cause
        source: std::io::Error,
    },

    /// Document did not have the expected shape
    #[error("Unexpected document content: {0}")]
    Inspect(String),
}

impl DocumentError {
    /// Build a write error for `path`
    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write { path: path.to_path_buf(), source }
    }

    /// True for index range violations
    pub fn is_reference_error(&self) -> bool {
        matches!(self, Self::VertexOutOfRange { .. } | Self::NormalOutOfRange { .. })
    }
}
