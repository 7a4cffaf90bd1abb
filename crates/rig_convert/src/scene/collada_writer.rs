//! COLLADA 1.4.1 serialization
//!
//! The document is encoded in memory first and then written through a
//! temporary file in the destination directory, so a failed run never leaves
//! a truncated `.dae` behind.

use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tempfile::NamedTempFile;

use super::document::{Effect, FloatSource, Geometry, MeshDocument, SceneNode};
use super::DocumentError;

/// COLLADA schema namespace
pub const COLLADA_NAMESPACE: &str = "http://www.collada.org/2005/11/COLLADASchema";
/// Schema version written in the root element
pub const COLLADA_VERSION: &str = "1.4.1";

/// Thin element-level wrapper over the quick-xml event writer
struct ElementWriter<W: Write> {
    xml: Writer<W>,
}

impl<W: Write> ElementWriter<W> {
    fn new(inner: W) -> Self {
        Self { xml: Writer::new_with_indent(inner, b' ', 2) }
    }

    fn declaration(&mut self) -> Result<(), DocumentError> {
        self.xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        Ok(())
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocumentError> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.xml.write_event(Event::Start(start))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), DocumentError> {
        self.xml.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocumentError> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.xml.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), DocumentError> {
        self.open(name, attrs)?;
        self.xml.write_event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    fn into_inner(self) -> W {
        self.xml.into_inner()
    }
}

/// Join values with single spaces
fn join<T: Display>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Encode a document as UTF-8 XML
pub fn to_bytes(document: &MeshDocument) -> Result<Vec<u8>, DocumentError> {
    let mut w = ElementWriter::new(Vec::new());

    w.declaration()?;
    w.open("COLLADA", &[("xmlns", COLLADA_NAMESPACE), ("version", COLLADA_VERSION)])?;

    write_asset(&mut w, document)?;

    if let Some(image) = &document.image {
        w.open("library_images", &[])?;
        w.open("image", &[("id", image.id.as_str()), ("name", image.id.as_str())])?;
        w.text_element("init_from", &[], &image.init_from)?;
        w.close("image")?;
        w.close("library_images")?;
    }

    if let Some(effect) = &document.effect {
        w.open("library_effects", &[])?;
        write_effect(&mut w, effect)?;
        w.close("library_effects")?;
    }

    if let Some(material) = &document.material {
        w.open("library_materials", &[])?;
        w.open("material", &[("id", material.id.as_str()), ("name", material.name.as_str())])?;
        w.empty("instance_effect", &[("url", material.effect_url.as_str())])?;
        w.close("material")?;
        w.close("library_materials")?;
    }

    w.open("library_geometries", &[])?;
    write_geometry(&mut w, &document.geometry)?;
    w.close("library_geometries")?;

    w.open("library_visual_scenes", &[])?;
    w.open("visual_scene", &[("id", document.scene.id.as_str())])?;
    for node in &document.scene.nodes {
        write_node(&mut w, node)?;
    }
    w.close("visual_scene")?;
    w.close("library_visual_scenes")?;

    w.open("scene", &[])?;
    w.empty("instance_visual_scene", &[("url", document.active_scene_url().as_str())])?;
    w.close("scene")?;

    w.close("COLLADA")?;

    let mut bytes = w.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Encoded document sitting in a temporary file next to its destination
///
/// Dropping it without calling [`StagedDocument::persist`] removes the
/// temporary file and leaves the destination untouched.
#[derive(Debug)]
pub struct StagedDocument {
    file: NamedTempFile,
    destination: PathBuf,
}

impl StagedDocument {
    /// Path of the temporary file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Final path the document will be moved to
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Move the staged file over the destination
    pub fn persist(self) -> Result<PathBuf, DocumentError> {
        let Self { file, destination } = self;
        file.persist(&destination)
            .map_err(|e| DocumentError::write(&destination, e.error))?;
        log::info!("Wrote {}", destination.display());
        Ok(destination)
    }
}

/// Encode a document into a temporary file in the destination's directory
pub fn stage_document(document: &MeshDocument, path: &Path) -> Result<StagedDocument, DocumentError> {
    let bytes = to_bytes(document)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| DocumentError::write(path, e))?;
    file.write_all(&bytes).map_err(|e| DocumentError::write(path, e))?;
    file.as_file().sync_all().map_err(|e| DocumentError::write(path, e))?;

    log::debug!("Staged {} bytes for {} in {}", bytes.len(), path.display(), file.path().display());
    Ok(StagedDocument {
        file,
        destination: path.to_path_buf(),
    })
}

/// Write a document to `path`, replacing it only once the full document is on disk
pub fn write_document(document: &MeshDocument, path: &Path) -> Result<(), DocumentError> {
    stage_document(document, path)?.persist()?;
    Ok(())
}

fn write_asset<W: Write>(w: &mut ElementWriter<W>, document: &MeshDocument) -> Result<(), DocumentError> {
    let asset = &document.asset;
    let meter = asset.unit_meter.to_string();

    w.open("asset", &[])?;
    w.open("contributor", &[])?;
    w.text_element("authoring_tool", &[], &asset.authoring_tool)?;
    w.close("contributor")?;
    w.text_element("created", &[], &asset.created)?;
    w.text_element("modified", &[], &asset.modified)?;
    w.empty("unit", &[("name", asset.unit_name.as_str()), ("meter", meter.as_str())])?;
    w.text_element("up_axis", &[], &asset.up_axis)?;
    w.close("asset")
}

fn write_effect<W: Write>(w: &mut ElementWriter<W>, effect: &Effect) -> Result<(), DocumentError> {
    w.open("effect", &[("id", effect.id.as_str()), ("name", effect.id.as_str())])?;
    w.open("profile_COMMON", &[])?;

    if let Some(image) = &effect.image {
        let surface = format!("{image}-surface");
        let sampler = format!("{image}-sampler");

        w.open("newparam", &[("sid", surface.as_str())])?;
        w.open("surface", &[("type", "2D")])?;
        w.text_element("init_from", &[], image)?;
        w.close("surface")?;
        w.close("newparam")?;

        w.open("newparam", &[("sid", sampler.as_str())])?;
        w.open("sampler2D", &[])?;
        w.text_element("source", &[], &surface)?;
        w.close("sampler2D")?;
        w.close("newparam")?;
    }

    w.open("technique", &[("sid", "common")])?;
    w.open("phong", &[])?;
    w.open("diffuse", &[])?;
    w.text_element("color", &[], &join(effect.diffuse))?;
    w.close("diffuse")?;
    w.close("phong")?;
    w.close("technique")?;

    w.close("profile_COMMON")?;
    w.close("effect")
}

fn write_source<W: Write>(w: &mut ElementWriter<W>, source: &FloatSource) -> Result<(), DocumentError> {
    let array_id = source.array_id();
    let array_url = format!("#{array_id}");
    let value_count = source.data.len().to_string();
    let element_count = source.element_count().to_string();
    let stride = FloatSource::PARAMS.len().to_string();

    w.open("source", &[("id", source.id.as_str())])?;
    w.text_element(
        "float_array",
        &[("id", array_id.as_str()), ("count", value_count.as_str())],
        &join(&source.data),
    )?;
    w.open("technique_common", &[])?;
    w.open("accessor", &[("source", array_url.as_str()), ("count", element_count.as_str()), ("stride", stride.as_str())])?;
    for param in FloatSource::PARAMS {
        w.empty("param", &[("name", param), ("type", "float")])?;
    }
    w.close("accessor")?;
    w.close("technique_common")?;
    w.close("source")
}

fn write_geometry<W: Write>(w: &mut ElementWriter<W>, geometry: &Geometry) -> Result<(), DocumentError> {
    w.open("geometry", &[("id", geometry.id.as_str()), ("name", geometry.name.as_str())])?;
    w.open("mesh", &[])?;

    for source in &geometry.sources {
        write_source(w, source)?;
    }

    let positions_url = format!("#{}", geometry.positions().id);
    w.open("vertices", &[("id", geometry.vertices_id.as_str())])?;
    w.empty("input", &[("semantic", "POSITION"), ("source", positions_url.as_str())])?;
    w.close("vertices")?;

    let set = &geometry.triangles;
    let count = set.triangles.len().to_string();
    let mut attrs = vec![("count", count.as_str())];
    if let Some(symbol) = &set.material_symbol {
        attrs.push(("material", symbol.as_str()));
    }

    w.open("triangles", &attrs)?;
    for input in &set.inputs {
        let offset = input.offset.to_string();
        w.empty(
            "input",
            &[("offset", offset.as_str()), ("semantic", input.semantic.as_str()), ("source", input.source.as_str())],
        )?;
    }
    w.text_element("p", &[], &join(set.index_list()))?;
    w.close("triangles")?;

    w.close("mesh")?;
    w.close("geometry")
}

fn write_node<W: Write>(w: &mut ElementWriter<W>, node: &SceneNode) -> Result<(), DocumentError> {
    w.open("node", &[("id", node.id.as_str()), ("name", node.name.as_str())])?;

    match &node.material {
        Some(binding) => {
            w.open("instance_geometry", &[("url", node.geometry_url.as_str())])?;
            w.open("bind_material", &[])?;
            w.open("technique_common", &[])?;
            w.empty("instance_material", &[("symbol", binding.symbol.as_str()), ("target", binding.target.as_str())])?;
            w.close("technique_common")?;
            w.close("bind_material")?;
            w.close("instance_geometry")?;
        }
        None => w.empty("instance_geometry", &[("url", node.geometry_url.as_str())])?,
    }

    w.close("node")
}
