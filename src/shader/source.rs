// source.rs - Splits a combined shader file into its vertex and fragment sections

use log::{debug, warn};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line that switches the section the following lines belong to.
pub const MARKER: &str = "#shader";
pub const VERTEX_TOKEN: &str = "vertex";
pub const FRAGMENT_TOKEN: &str = "fragment";

/// Section the scanner is currently filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageKind {
    #[default]
    None,
    Vertex,
    Fragment,
}

impl StageKind {
    /// Classifies a marker line. Returns `None` when the line names no known stage,
    /// in which case the current section is kept.
    fn from_marker(line: &str) -> Option<Self> {
        if line.contains(VERTEX_TOKEN) {
            Some(StageKind::Vertex)
        } else if line.contains(FRAGMENT_TOKEN) {
            Some(StageKind::Fragment)
        } else {
            None
        }
    }
}

/// Vertex and fragment source text taken from one shader file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderProgramSource {
    vertex: String,
    fragment: String,
}

impl ShaderProgramSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn is_empty(&self) -> bool {
        self.vertex.is_empty() && self.fragment.is_empty()
    }
}

#[derive(Default)]
struct Splitter {
    kind: StageKind,
    vertex: String,
    fragment: String,
}

impl Splitter {
    fn push_line(&mut self, line: &str) {
        if line.contains(MARKER) {
            if let Some(kind) = StageKind::from_marker(line) {
                self.kind = kind;
            }
            return;
        }

        let target = match self.kind {
            // Nothing before the first marker is kept
            StageKind::None => return,
            StageKind::Vertex => &mut self.vertex,
            StageKind::Fragment => &mut self.fragment,
        };
        target.push_str(line);
        target.push('\n');
    }

    fn finish(self) -> ShaderProgramSource {
        ShaderProgramSource {
            vertex: self.vertex,
            fragment: self.fragment,
        }
    }
}

/// Strips a trailing `\r`; bytes that are not UTF-8 become U+FFFD.
fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes)
}

/// Reads `path` and splits it into vertex and fragment sources.
///
/// Never fails: an unreadable file logs a warning and yields empty sources.
pub fn parse_shader<P: AsRef<Path>>(path: P) -> ShaderProgramSource {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(
                "Shader file {} could not be opened ({}), using empty shader sources",
                path.display(),
                e
            );
            return ShaderProgramSource::default();
        }
    };

    let mut splitter = Splitter::default();
    for line in BufReader::new(file).split(b'\n') {
        match line {
            Ok(bytes) => splitter.push_line(&decode_line(&bytes)),
            Err(e) => {
                warn!("Stopped reading shader file {}: {}", path.display(), e);
                break;
            }
        }
    }

    let source = splitter.finish();
    debug!(
        "Parsed {}: {} bytes vertex, {} bytes fragment",
        path.display(),
        source.vertex.len(),
        source.fragment.len()
    );
    source
}

/// Same as [`parse_shader`] over text already in memory.
pub fn parse_shader_str(text: &str) -> ShaderProgramSource {
    let mut splitter = Splitter::default();
    for line in text.lines() {
        splitter.push_line(line);
    }
    splitter.finish()
}
