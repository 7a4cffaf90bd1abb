//! Reads back the primitive set of a written COLLADA document
//!
//! This is not a general COLLADA importer. It understands the documents
//! produced by [`super::collada_writer`], which is enough to verify a
//! conversion after the fact.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::DocumentError;
use crate::geometry::Triangle;

/// One `<input>` of the triangle set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSummary {
    /// Channel offset
    pub offset: usize,
    /// `VERTEX`, `NORMAL`, ...
    pub semantic: String,
    /// Referenced url
    pub source: String,
}

/// What a document says about its geometry and bindings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    /// `count` attribute of `<triangles>`
    pub triangle_count: usize,
    /// Triangle set inputs in document order
    pub inputs: Vec<InputSummary>,
    /// Raw `<p>` contents
    pub indices: Vec<usize>,
    /// `material` attribute of `<triangles>`
    pub material_symbol: Option<String>,
    /// `(source id, accessor count)` for every `<source>`
    pub sources: Vec<(String, usize)>,
    /// `(symbol, target)` of every `<instance_material>`
    pub material_bindings: Vec<(String, String)>,
    /// Url of `<instance_visual_scene>`
    pub active_scene: Option<String>,
}

/// Read an attribute as a string
fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

fn parse_count(element: &BytesStart<'_>, name: &[u8]) -> Result<usize, DocumentError> {
    let value = attribute(element, name).unwrap_or_default();
    value.parse().map_err(|_| {
        DocumentError::Inspect(format!(
            "<{}> has invalid {} '{}'",
            String::from_utf8_lossy(element.local_name().as_ref()),
            String::from_utf8_lossy(name),
            value
        ))
    })
}

impl DocumentSummary {
    /// Read a document from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|e| DocumentError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_xml(&xml)
    }

    /// Read a document held in memory
    pub fn from_xml(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut summary = Self::default();
        let mut current_source: Option<String> = None;
        let mut in_triangles = false;
        let mut in_p = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    match e.local_name().as_ref() {
                        b"source" if !in_triangles => {
                            current_source = attribute(e, b"id");
                        }
                        b"accessor" => {
                            if let Some(id) = &current_source {
                                summary.sources.push((id.clone(), parse_count(e, b"count")?));
                            }
                        }
                        b"triangles" => {
                            in_triangles = true;
                            summary.triangle_count = parse_count(e, b"count")?;
                            summary.material_symbol = attribute(e, b"material");
                        }
                        b"input" if in_triangles => {
                            summary.inputs.push(InputSummary {
                                offset: parse_count(e, b"offset")?,
                                semantic: attribute(e, b"semantic").unwrap_or_default(),
                                source: attribute(e, b"source").unwrap_or_default(),
                            });
                        }
                        b"p" if in_triangles => in_p = true,
                        b"instance_material" => {
                            summary.material_bindings.push((
                                attribute(e, b"symbol").unwrap_or_default(),
                                attribute(e, b"target").unwrap_or_default(),
                            ));
                        }
                        b"instance_visual_scene" => {
                            summary.active_scene = attribute(e, b"url");
                        }
                        _ => {}
                    }
                }
                Ok(Event::Text(ref t)) if in_p => {
                    let text = String::from_utf8_lossy(t);
                    for token in text.split_whitespace() {
                        let index = token.parse().map_err(|_| {
                            DocumentError::Inspect(format!("<p> contains non-index '{token}'"))
                        })?;
                        summary.indices.push(index);
                    }
                }
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"p" => in_p = false,
                    b"triangles" => in_triangles = false,
                    b"source" => current_source = None,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocumentError::Inspect(format!("XML parse error: {e}"))),
                _ => {}
            }
        }

        Ok(summary)
    }

    /// Number of indices per corner
    pub fn stride(&self) -> usize {
        self.inputs.iter().map(|input| input.offset + 1).max().unwrap_or(1)
    }

    /// Input bound to `semantic`, if any
    pub fn input(&self, semantic: &str) -> Option<&InputSummary> {
        self.inputs.iter().find(|input| input.semantic == semantic)
    }

    /// Accessor count of the source with `id`
    pub fn source_count(&self, id: &str) -> Option<usize> {
        self.sources.iter().find(|(source, _)| source == id).map(|(_, count)| *count)
    }

    /// De-interleave the `VERTEX` channel into triangles
    pub fn vertex_triangles(&self) -> Result<Vec<Triangle>, DocumentError> {
        self.channel_triangles("VERTEX")?
            .ok_or_else(|| DocumentError::Inspect("triangle set has no VERTEX input".to_string()))
    }

    /// De-interleave the `NORMAL` channel, if the triangle set has one
    pub fn normal_triangles(&self) -> Result<Option<Vec<Triangle>>, DocumentError> {
        self.channel_triangles("NORMAL")
    }

    fn channel_triangles(&self, semantic: &str) -> Result<Option<Vec<Triangle>>, DocumentError> {
        let Some(input) = self.input(semantic) else {
            return Ok(None);
        };

        let stride = self.stride();
        let expected = self.triangle_count * 3 * stride;
        if self.indices.len() != expected {
            return Err(DocumentError::Inspect(format!(
                "expected {expected} indices for {} triangles, found {}",
                self.triangle_count,
                self.indices.len()
            )));
        }

        let corners: Vec<usize> = self
            .indices
            .chunks_exact(stride)
            .map(|corner| corner[input.offset])
            .collect();

        Ok(Some(
            corners
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
        ))
    }
}
