//! Conversion pipeline
//!
//! Runs one OBJ -> COLLADA conversion from start to finish. Each stage runs to
//! completion before the next one starts, and the first failure aborts the
//! run. The document is staged in a temporary file while verification and
//! retargeting run, and only moved to its destination once every stage has
//! succeeded.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::assets::{AssetError, MaterialLibrary, MaterialTable, ObjData, ObjParser};
use crate::config::ConfigError;
use crate::core::config::ConvertConfig;
use crate::geometry::{triangulate_faces, triangulate_normals};
use crate::rig::{self, BoneMapping, NoopRetargeter, Retargeter, RigError};
use crate::scene::{stage_document, DocumentBuilder, DocumentError, DocumentSummary, MeshDocument};

/// One conversion job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    /// Source OBJ file
    pub input: PathBuf,
    /// MTL file to resolve the material tag against
    pub material_library: Option<PathBuf>,
    /// Destination; defaults to the input path with the configured suffix
    pub output: Option<PathBuf>,
}

impl ConvertRequest {
    /// Create a request for `input`
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            material_library: None,
            output: None,
        }
    }

    /// Set the material library
    pub fn with_material_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.material_library = Some(path.into());
        self
    }

    /// Set an explicit destination
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Check that the named input files exist and the destination is not the input
    pub fn validate(&self) -> Result<(), ConvertError> {
        if !self.input.is_file() {
            return Err(ConvertError::Usage(format!(
                "Input mesh {} does not exist or is not a file",
                self.input.display()
            )));
        }
        if let Some(output) = &self.output {
            if same_file(&self.input, output) {
                return Err(ConvertError::Usage(format!(
                    "Output {} would overwrite the input mesh",
                    output.display()
                )));
            }
        }
        if let Some(mtl) = &self.material_library {
            if !mtl.is_file() {
                return Err(ConvertError::Usage(format!(
                    "Material file {} does not exist or is not a file",
                    mtl.display()
                )));
            }
        }
        Ok(())
    }

    /// Destination path for this request
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input, suffix))
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    matches!((a.canonicalize(), b.canonicalize()), (Ok(a), Ok(b)) if a == b)
}

/// Replace the extension of `input` with `suffix`: `hero.obj` -> `hero.m2sl.dae`
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{suffix}"))
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    /// Written document
    pub output: PathBuf,
    /// Vertices written
    pub vertex_count: usize,
    /// Normals written
    pub normal_count: usize,
    /// Triangles written
    pub triangle_count: usize,
    /// Faces with fewer than three corners
    pub dropped_faces: usize,
    /// Name of the bound material
    pub material: Option<String>,
    /// Bone names written to the discovered list
    pub bones_discovered: usize,
    /// Bone pairs handed to the retargeter
    pub bones_mapped: usize,
}

impl fmt::Display for ConvertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} vertices, {} normals, {} triangles, material {}",
            self.output.display(),
            self.vertex_count,
            self.normal_count,
            self.triangle_count,
            self.material.as_deref().unwrap_or("<none>")
        )?;
        if self.dropped_faces > 0 {
            write!(f, ", {} degenerate face(s) dropped", self.dropped_faces)?;
        }
        Ok(())
    }
}

/// Broad error categories, used for exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad arguments
    Usage,
    /// Malformed token in the mesh or material text
    Parse,
    /// Face references a vertex or normal that does not exist
    Reference,
    /// Source unreadable or destination unwritable
    Io,
    /// Invalid configuration
    Config,
}

impl ErrorKind {
    /// Process exit code for this category
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Usage => 2,
            Self::Parse => 3,
            Self::Reference => 4,
            Self::Io => 5,
            Self::Config => 6,
        }
    }
}

/// Conversion errors
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Bad request
    #[error("Usage error: {0}")]
    Usage(String),

    /// Source parsing or reading failed
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Document building or writing failed
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Bone list handling failed
    #[error(transparent)]
    Rig(#[from] RigError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The written document did not match what was built
    #[error("Verification failed: {0}")]
    Verification(String),
}

impl ConvertError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) => ErrorKind::Usage,
            Self::Asset(AssetError::Parse { .. }) => ErrorKind::Parse,
            Self::Asset(AssetError::Io { .. }) => ErrorKind::Io,
            Self::Document(e) if e.is_reference_error() => ErrorKind::Reference,
            Self::Document(_) | Self::Verification(_) => ErrorKind::Io,
            Self::Rig(RigError::MismatchedLists { .. }) | Self::Config(_) => ErrorKind::Config,
            Self::Rig(_) => ErrorKind::Io,
        }
    }
}

/// Runs conversions with a fixed configuration
pub struct ConversionPipeline {
    config: ConvertConfig,
    retargeter: Box<dyn Retargeter>,
}

impl ConversionPipeline {
    /// Create a pipeline with the no-op retargeter
    pub fn new(config: ConvertConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        Ok(Self {
            config,
            retargeter: Box::new(NoopRetargeter),
        })
    }

    /// Replace the retargeter
    pub fn with_retargeter(mut self, retargeter: Box<dyn Retargeter>) -> Self {
        self.retargeter = retargeter;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Run one conversion
    pub fn run(&self, request: &ConvertRequest) -> Result<ConvertReport, ConvertError> {
        request.validate()?;
        log::info!("Converting {}", request.input.display());

        let obj = ObjParser::parse_file(&request.input)?;
        let bones = self.discover_bones(&request.input)?;

        let triangles = triangulate_faces(&obj.faces);
        let normal_triangles = triangulate_normals(&obj.faces);
        let dropped_faces = obj.faces.iter().filter(|face| !face.is_polygon()).count();
        if dropped_faces > 0 {
            log::warn!("Dropped {dropped_faces} face(s) with fewer than three corners");
        }
        log::debug!("Triangulated {} faces into {} triangles", obj.faces.len(), triangles.len());

        let materials = self.load_materials(request, &obj)?;
        let material = materials.resolve(obj.active_material.as_deref());
        if let (Some(tag), None) = (&obj.active_material, material) {
            log::warn!("Material '{tag}' not found in material table, writing without material binding");
        }

        let document = DocumentBuilder::new(&self.config.document)
            .positions(&obj.vertices)
            .normals(&obj.normals)
            .triangles(triangles)
            .normal_triangles(normal_triangles)
            .material(material)
            .build()?;

        let output = request.output_path(&self.config.output.suffix);
        let staged = stage_document(&document, &output)?;

        let bones_mapped = self.retarget(staged.path())?;

        if self.config.output.verify {
            Self::verify(staged.path(), &document)?;
        }

        let bones_discovered = match (&self.config.bones.discovered_list, bones) {
            (Some(list), Some(bones)) => {
                rig::write_bone_names(list, &bones)?;
                log::info!("Listed {} bone name(s) in {}", bones.len(), list.display());
                bones.len()
            }
            _ => 0,
        };

        let output = staged.persist()?;

        let report = ConvertReport {
            output,
            vertex_count: obj.vertices.len(),
            normal_count: obj.normals.len(),
            triangle_count: document.geometry.triangles.triangles.len(),
            dropped_faces,
            material: material.map(|m| m.name.clone()),
            bones_discovered,
            bones_mapped,
        };
        log::info!("Converted {report}");
        Ok(report)
    }

    /// Material table from the explicit library, or from `mtllib` when enabled
    fn load_materials(&self, request: &ConvertRequest, obj: &ObjData) -> Result<MaterialTable, ConvertError> {
        if let Some(path) = &request.material_library {
            return Ok(MaterialLibrary::load(path)?);
        }

        if !self.config.materials.discover_from_obj {
            return Ok(MaterialTable::new());
        }

        let Some(library) = obj.material_libraries.first() else {
            return Ok(MaterialTable::new());
        };

        let path = MaterialLibrary::resolve_library_path(&request.input, library);
        if path.is_file() {
            Ok(MaterialLibrary::load(&path)?)
        } else {
            log::warn!("Material library {} named by the mesh was not found", path.display());
            Ok(MaterialTable::new())
        }
    }

    /// Re-read the staged document and compare its triangle set
    fn verify(path: &Path, document: &MeshDocument) -> Result<(), ConvertError> {
        let summary = DocumentSummary::from_file(path)?;
        let set = &document.geometry.triangles;

        let written = summary.vertex_triangles()?;
        if written != set.triangles {
            return Err(ConvertError::Verification(format!(
                "vertex indices of {} triangles differ from the {} built",
                written.len(),
                set.triangles.len()
            )));
        }

        let vertex_count = document.geometry.positions().element_count();
        if let Some(index) = written.iter().flatten().find(|&&index| index >= vertex_count) {
            return Err(ConvertError::Verification(format!(
                "document references vertex {index} of {vertex_count}"
            )));
        }

        let written_normals = summary.normal_triangles()?.unwrap_or_default();
        if written_normals != set.normals {
            return Err(ConvertError::Verification(format!(
                "normal channel holds {} triangles, expected {}",
                written_normals.len(),
                set.normals.len()
            )));
        }

        log::debug!("Verified {} triangles in {}", written.len(), path.display());
        Ok(())
    }

    /// Bone names in the source, when a discovered list is configured
    fn discover_bones(&self, input: &Path) -> Result<Option<Vec<String>>, ConvertError> {
        if self.config.bones.discovered_list.is_none() {
            return Ok(None);
        }
        Ok(Some(rig::discover_bone_names_in_file(input)?))
    }

    /// Hand the staged document to the retargeter
    fn retarget(&self, document: &Path) -> Result<usize, ConvertError> {
        let bones = &self.config.bones;

        let mapped = if bones.input_list.is_file() && bones.output_list.is_file() {
            let mapping = BoneMapping::from_lists(
                rig::read_bone_names(&bones.input_list)?,
                rig::read_bone_names(&bones.output_list)?,
            )?;
            self.retargeter.rename_bones(document, &mapping)?;
            mapping.len()
        } else {
            log::warn!(
                "Bone lists {} / {} not found, skipping bone renaming",
                bones.input_list.display(),
                bones.output_list.display()
            );
            0
        };

        self.retargeter.calculate_weights(document)?;
        Ok(mapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BoneConfig;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    const QUAD_OBJ: &str = "\
mtllib hero.mtl
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
vn 0 0 1
vn 0 0 1
vn 0 0 1
usemtl Skin
f 1//1 2//2 3//3 4//4
";

    const HERO_MTL: &str = "newmtl Skin\nKd 1.0 0.5 0.0\nmap_Kd skin.png\n";

    /// Workspace with all bone lists pointing into a temporary directory
    fn setup(obj: &str) -> (TempDir, ConversionPipeline, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hero.obj");
        fs::write(&input, obj).unwrap();

        let config = ConvertConfig::default().with_bones(BoneConfig {
            discovered_list: Some(dir.path().join("getbones.ini")),
            input_list: dir.path().join("inputbones.ini"),
            output_list: dir.path().join("outputbones.ini"),
        });
        let pipeline = ConversionPipeline::new(config).unwrap();
        (dir, pipeline, input)
    }

    #[test]
    fn test_convert_quad_with_material() {
        let (dir, pipeline, input) = setup(QUAD_OBJ);
        let mtl = dir.path().join("hero.mtl");
        fs::write(&mtl, HERO_MTL).unwrap();

        let report = pipeline
            .run(&ConvertRequest::new(&input).with_material_library(&mtl))
            .unwrap();

        assert_eq!(report.output, dir.path().join("hero.m2sl.dae"));
        assert_eq!(report.vertex_count, 4);
        assert_eq!(report.normal_count, 4);
        assert_eq!(report.triangle_count, 2);
        assert_eq!(report.material.as_deref(), Some("Skin"));

        let summary = DocumentSummary::from_file(&report.output).unwrap();
        assert_eq!(summary.vertex_triangles().unwrap(), vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(summary.input("NORMAL").map(|i| i.offset), Some(1));
        assert_eq!(summary.material_symbol.as_deref(), Some("materialref"));
    }

    #[test]
    fn test_round_trip_counts_for_mixed_polygons() {
        let mut obj = String::new();
        for i in 0..8 {
            obj.push_str(&format!("v {i} {} 0\n", i * i));
        }
        obj.push_str("f 1 2 3\nf 1 2 3 4\nf 1 2 3 4 5 6 7 8\nf 8 7 6 5 4\n");
        let (_dir, pipeline, input) = setup(&obj);

        let report = pipeline.run(&ConvertRequest::new(&input)).unwrap();
        let summary = DocumentSummary::from_file(&report.output).unwrap();
        let triangles = summary.vertex_triangles().unwrap();

        let expected = 1 + 2 + 6 + 3;
        assert_eq!(summary.triangle_count, expected);
        assert_eq!(triangles.len(), expected);
        assert!(triangles.iter().flatten().all(|&index| index < 8));
    }

    #[test]
    fn test_no_normals_means_no_normal_channel() {
        let (_dir, pipeline, input) = setup("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");

        let report = pipeline.run(&ConvertRequest::new(&input)).unwrap();
        let summary = DocumentSummary::from_file(&report.output).unwrap();

        assert_eq!(report.normal_count, 0);
        assert!(summary.input("NORMAL").is_none());
        assert_eq!(summary.source_count("normals"), None);
        assert_eq!(summary.stride(), 1);
    }

    #[test]
    fn test_unknown_material_tag_is_not_an_error() {
        let (dir, pipeline, input) = setup(QUAD_OBJ);
        let mtl = dir.path().join("other.mtl");
        fs::write(&mtl, "newmtl Cloth\nKd 0 0 1\n").unwrap();

        let report = pipeline
            .run(&ConvertRequest::new(&input).with_material_library(&mtl))
            .unwrap();
        let summary = DocumentSummary::from_file(&report.output).unwrap();

        assert!(report.material.is_none());
        assert!(summary.material_symbol.is_none());
        assert!(summary.material_bindings.is_empty());
    }

    #[test]
    fn test_malformed_vertex_writes_nothing() {
        let (dir, pipeline, input) = setup("v 0 0 0\nv 1.0 x 2.0\nv 0 1 0\nf 1 2 3\n");

        let err = pipeline.run(&ConvertRequest::new(&input)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(!dir.path().join("hero.m2sl.dae").exists());
        assert!(!dir.path().join("getbones.ini").exists());
    }

    #[test]
    fn test_out_of_range_face_writes_nothing() {
        let (dir, pipeline, input) = setup("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 5\n");

        let err = pipeline.run(&ConvertRequest::new(&input)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(!dir.path().join("hero.m2sl.dae").exists());
    }

    #[test]
    fn test_missing_input_is_usage_error() {
        let (dir, pipeline, _input) = setup("");
        let err = pipeline
            .run(&ConvertRequest::new(dir.path().join("nope.obj")))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(err.kind().exit_code(), 2);
    }

    #[test]
    fn test_unwritable_output_is_io_error() {
        let (dir, pipeline, input) = setup("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let request = ConvertRequest::new(&input).with_output(dir.path().join("no_dir").join("out.dae"));

        let err = pipeline.run(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_mtllib_discovery() {
        let (dir, _pipeline, input) = setup(QUAD_OBJ);
        fs::write(dir.path().join("hero.mtl"), HERO_MTL).unwrap();

        let mut config = ConvertConfig::default().with_bones(BoneConfig {
            discovered_list: None,
            input_list: dir.path().join("inputbones.ini"),
            output_list: dir.path().join("outputbones.ini"),
        });
        config.materials.discover_from_obj = true;
        let pipeline = ConversionPipeline::new(config).unwrap();

        let report = pipeline.run(&ConvertRequest::new(&input)).unwrap();
        assert_eq!(report.material.as_deref(), Some("Skin"));
        assert_eq!(report.bones_discovered, 0);
    }

    #[test]
    fn test_verify_passes_on_written_document() {
        let (dir, _pipeline, input) = setup(QUAD_OBJ);
        let config = ConvertConfig::default()
            .with_verify(true)
            .with_bones(BoneConfig {
                discovered_list: None,
                input_list: dir.path().join("inputbones.ini"),
                output_list: dir.path().join("outputbones.ini"),
            });
        let pipeline = ConversionPipeline::new(config).unwrap();

        let report = pipeline.run(&ConvertRequest::new(&input)).unwrap();
        assert_eq!(report.triangle_count, 2);
    }

    #[test]
    fn test_bone_discovery_list_written() {
        let obj = "bone mixamorig:Hips\nbone mixamorig:Spine\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let (dir, pipeline, input) = setup(obj);

        let report = pipeline.run(&ConvertRequest::new(&input)).unwrap();

        assert_eq!(report.bones_discovered, 2);
        let listed = rig::read_bone_names(&dir.path().join("getbones.ini")).unwrap();
        assert_eq!(listed, vec!["mixamorig:Hips".to_string(), "mixamorig:Spine".to_string()]);
    }

    struct RecordingRetargeter {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Retargeter for RecordingRetargeter {
        fn rename_bones(&self, document: &Path, mapping: &BoneMapping) -> Result<(), RigError> {
            assert!(document.is_file());
            assert_ne!(document.extension().and_then(|ext| ext.to_str()), Some("dae"));
            self.calls.borrow_mut().push(format!("rename {}", mapping.len()));
            Ok(())
        }

        fn calculate_weights(&self, _document: &Path) -> Result<(), RigError> {
            self.calls.borrow_mut().push("weights".to_string());
            Ok(())
        }
    }

    #[test]
    fn test_retargeter_receives_mapping() {
        let (dir, pipeline, input) = setup("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        fs::write(dir.path().join("inputbones.ini"), "mixamorig:Hips\nmixamorig:Spine\n").unwrap();
        fs::write(dir.path().join("outputbones.ini"), "mPelvis\nmTorso\n").unwrap();

        let calls = Rc::new(RefCell::new(Vec::new()));
        let pipeline = pipeline.with_retargeter(Box::new(RecordingRetargeter { calls: Rc::clone(&calls) }));

        let report = pipeline.run(&ConvertRequest::new(&input)).unwrap();

        assert_eq!(report.bones_mapped, 2);
        assert_eq!(*calls.borrow(), vec!["rename 2".to_string(), "weights".to_string()]);
    }

    #[test]
    fn test_mismatched_bone_lists() {
        let (dir, pipeline, input) = setup("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        fs::write(dir.path().join("inputbones.ini"), "a\nb\n").unwrap();
        fs::write(dir.path().join("outputbones.ini"), "x\n").unwrap();

        let err = pipeline.run(&ConvertRequest::new(&input)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!dir.path().join("hero.m2sl.dae").exists());
        assert!(!dir.path().join("getbones.ini").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    /// Reverses the winding of the single triangle in the staged document
    struct RewindingRetargeter;

    impl Retargeter for RewindingRetargeter {
        fn calculate_weights(&self, document: &Path) -> Result<(), RigError> {
            let io_error = |source| RigError::Io { path: document.to_path_buf(), source };
            let xml = fs::read_to_string(document).map_err(io_error)?;
            fs::write(document, xml.replace("<p>0 1 2</p>", "<p>2 1 0</p>")).map_err(io_error)
        }
    }

    #[test]
    fn test_failed_verification_writes_nothing() {
        let (dir, _pipeline, input) = setup("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let config = ConvertConfig::default()
            .with_verify(true)
            .with_bones(BoneConfig {
                discovered_list: Some(dir.path().join("getbones.ini")),
                input_list: dir.path().join("inputbones.ini"),
                output_list: dir.path().join("outputbones.ini"),
            });
        let pipeline = ConversionPipeline::new(config)
            .unwrap()
            .with_retargeter(Box::new(RewindingRetargeter));

        let err = pipeline.run(&ConvertRequest::new(&input)).unwrap_err();

        assert!(matches!(err, ConvertError::Verification(_)), "unexpected error: {err}");
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!dir.path().join("hero.m2sl.dae").exists());
        assert!(!dir.path().join("getbones.ini").exists());
    }

    #[test]
    fn test_dropped_faces_are_reported() {
        let (_dir, pipeline, input) = setup("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2\nf 1 2 3\nf 3\n");

        let report = pipeline.run(&ConvertRequest::new(&input)).unwrap();

        assert_eq!(report.dropped_faces, 2);
        assert_eq!(report.triangle_count, 1);
        assert!(report.to_string().ends_with("2 degenerate face(s) dropped"));
    }

    const CUBE_OBJ: &str = "\
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
vn 0 0 -1
vn 0 0 1
vn 0 -1 0
vn 0 1 0
vn -1 0 0
vn 1 0 0
f 1//1 4//1 3//1 2//1
f 5//2 6//2 7//2 8//2
f 1//3 2//3 6//3 5//3
f 4//4 8//4 7//4 3//4
f 1//5 5//5 8//5 4//5
f 2//6 3//6 7//6 6//6
";

    #[test]
    fn test_cube_with_face_normals() {
        let (dir, _pipeline, input) = setup(CUBE_OBJ);
        let config = ConvertConfig::default()
            .with_verify(true)
            .with_bones(BoneConfig {
                discovered_list: None,
                input_list: dir.path().join("inputbones.ini"),
                output_list: dir.path().join("outputbones.ini"),
            });
        let pipeline = ConversionPipeline::new(config).unwrap();

        let report = pipeline.run(&ConvertRequest::new(&input)).unwrap();
        assert_eq!(report.vertex_count, 8);
        assert_eq!(report.normal_count, 6);
        assert_eq!(report.triangle_count, 12);

        let summary = DocumentSummary::from_file(&report.output).unwrap();
        assert_eq!(summary.source_count("normals"), Some(6));
        assert!(summary.vertex_triangles().unwrap().iter().flatten().all(|&index| index < 8));

        let normals = summary.normal_triangles().unwrap().unwrap();
        assert_eq!(normals.len(), 12);
        assert_eq!(normals[0], [0, 0, 0]);
        assert_eq!(normals[11], [5, 5, 5]);
    }

    #[test]
    fn test_output_over_input_is_usage_error() {
        let (dir, pipeline, input) = setup("bone Hips\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let request = ConvertRequest::new(&input).with_output(dir.path().join(".").join("hero.obj"));

        let err = pipeline.run(&request).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(fs::read_to_string(&input).unwrap().starts_with("bone Hips"));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("models/hero.obj"), ".m2sl.dae"),
            Path::new("models").join("hero.m2sl.dae")
        );
        assert_eq!(default_output_path(Path::new("mesh"), ".dae"), PathBuf::from("mesh.dae"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ConvertConfig::default().with_log_level("chatty");
        assert!(matches!(ConversionPipeline::new(config), Err(ConvertError::Config(_))));
    }
}
