//! Retargeting extension point
//!
//! No renaming or weighting algorithm ships with the converter. A
//! [`Retargeter`] receives the staged document and the bone mapping before
//! the document is moved to its destination; both methods default to doing
//! nothing. An error from either method aborts the conversion.

use std::path::Path;

use super::RigError;

/// Source bone names paired with target names by position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoneMapping {
    pairs: Vec<(String, String)>,
}

impl BoneMapping {
    /// Pair two lists of equal length
    pub fn from_lists(input: Vec<String>, output: Vec<String>) -> Result<Self, RigError> {
        if input.len() != output.len() {
            return Err(RigError::MismatchedLists {
                input: input.len(),
                output: output.len(),
            });
        }
        Ok(Self { pairs: input.into_iter().zip(output).collect() })
    }

    /// Target name for a source bone
    pub fn target_of(&self, source: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(from, _)| from == source)
            .map(|(_, to)| to.as_str())
    }

    /// All pairs in list order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True if no bones are mapped
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Post-conversion skeleton processing
pub trait Retargeter {
    /// Rename bones in the staged document
    fn rename_bones(&self, _document: &Path, _mapping: &BoneMapping) -> Result<(), RigError> {
        Ok(())
    }

    /// Compute skin weights for the staged document
    fn calculate_weights(&self, _document: &Path) -> Result<(), RigError> {
        Ok(())
    }
}

/// Retargeter that leaves the document untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRetargeter;

impl Retargeter for NoopRetargeter {
    fn rename_bones(&self, document: &Path, mapping: &BoneMapping) -> Result<(), RigError> {
        log::info!(
            "Bone renaming not implemented; {} mapping(s) left unapplied to {}",
            mapping.len(),
            document.display()
        );
        Ok(())
    }

    fn calculate_weights(&self, document: &Path) -> Result<(), RigError> {
        log::info!("Skin weight calculation not implemented; {} unchanged", document.display());
        Ok(())
    }
}
