//! Skeleton retargeting hooks
//!
//! Bone lists can be discovered in a source file, read and written, and
//! paired into a [`BoneMapping`]. Renaming bones inside a converted document
//! and computing skin weights are left to a [`Retargeter`] implementation;
//! the bundled [`NoopRetargeter`] does neither.

pub mod bone_list;
pub mod retarget;

pub use bone_list::{discover_bone_names, discover_bone_names_in_file, read_bone_names, write_bone_names};
pub use retarget::{BoneMapping, NoopRetargeter, Retargeter};

use std::path::PathBuf;
use thiserror::Error;

/// Rig errors
#[derive(Error, Debug)]
pub enum RigError {
    /// Bone list could not be read or written
    #[error("Bone list {}: {source}", .path.display())]
    Io {
        /// Bone list path
        path: PathBuf,
        /// Underlying cause
        source: std::io::Error,
    },

    /// Source and target lists do not pair up
    #[error("Bone lists differ in length: {input} source names, {output} target names")]
    MismatchedLists {
        /// Number of source names
        input: usize,
        /// Number of target names
        output: usize,
    },

    /// A retargeter implementation failed
    #[error("Retargeting failed: {0}")]
    Retarget(String),
}
