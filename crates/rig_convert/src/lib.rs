//! # Rig Convert
//!
//! Converts Wavefront OBJ meshes (with optional MTL materials) into
//! COLLADA 1.4.1 documents for avatar pipelines.
//!
//! ## Features
//!
//! - **OBJ Parsing**: Positions, normals, polygon faces and material tags
//! - **MTL Loading**: Diffuse colors and diffuse texture maps
//! - **Triangulation**: Fan triangulation of arbitrary convex polygons
//! - **COLLADA Output**: Atomic writes of a single-geometry document
//! - **Verification**: Re-reading written documents to check the triangle set
//! - **Rig Hooks**: Bone list discovery and a pluggable retargeting stage
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rig_convert::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = ConversionPipeline::new(ConvertConfig::default())?;
//!     let request = ConvertRequest::new("hero.obj").with_material_library("hero.mtl");
//!     let report = pipeline.run(&request)?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Shared configuration and re-exports
pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod geometry;
pub mod scene;
pub mod rig;

mod pipeline;

pub use pipeline::{
    default_output_path, ConversionPipeline, ConvertError, ConvertReport, ConvertRequest, ErrorKind,
};

/// Common imports for converter users
pub mod prelude {
    pub use crate::{
        ConversionPipeline, ConvertError, ConvertReport, ConvertRequest, ErrorKind,
        core::config::{ConvertConfig, DocumentConfig, UpAxis},
        config::Config,
        foundation::{logging, math::Vec3},
        assets::{Material, MaterialTable, ObjData, ObjParser, MtlParser, MaterialLibrary},
        geometry::{Face, Triangle, triangulate_faces},
        scene::{DocumentBuilder, DocumentSummary, MeshDocument, write_document},
        rig::{BoneMapping, Retargeter, NoopRetargeter},
    };
}
