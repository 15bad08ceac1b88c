//! EXIF tag enumeration through a visitor.

use exif::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Receives one call per EXIF field found in a file.
pub trait TagVisitor {
    fn visit(&mut self, name: &str, value: &str);
}

/// Collects every tag as an owned `(name, value)` pair.
impl TagVisitor for Vec<(String, String)> {
    fn visit(&mut self, name: &str, value: &str) {
        self.push((name.to_string(), value.to_string()));
    }
}

/// Emits one log event per tag.
pub struct LoggingVisitor<'a> {
    path: &'a Path,
}

impl<'a> LoggingVisitor<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }
}

impl TagVisitor for LoggingVisitor<'_> {
    fn visit(&mut self, name: &str, value: &str) {
        tracing::info!(path = %self.path.display(), tag = name, "{} {}", name, value);
    }
}

/// Reads EXIF fields out of image containers.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Feed every EXIF field of `path` to `visitor` and return how many there were.
    ///
    /// A file with no EXIF block yields `Ok(0)`. A file that cannot be opened
    /// or whose EXIF block is malformed is an error.
    pub fn walk(path: &Path, visitor: &mut dyn TagVisitor) -> PipelineResult<usize> {
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let mut reader = BufReader::new(file);
        let exif = match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => return Ok(0),
            Err(e) => {
                return Err(PipelineError::Metadata {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        let mut visited = 0;
        for field in exif.fields() {
            let name = field.tag.to_string();
            let value = field.display_value().with_unit(&exif).to_string();
            visitor.visit(&name, &value);
            visited += 1;
        }
        Ok(visited)
    }

    /// Collect every EXIF field of `path` as `(name, value)` pairs.
    pub fn enumerate_tags(path: &Path) -> PipelineResult<Vec<(String, String)>> {
        let mut tags = Vec::new();
        Self::walk(path, &mut tags)?;
        Ok(tags)
    }
}
