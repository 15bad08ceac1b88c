//! Heuristic post-write check for leftover metadata markers.
//!
//! Only a fixed-size prefix of the output is read, and only JPEG APPn marker
//! pairs are looked for. A PNG can never trip the check except by a chance
//! byte pattern, so for PNG output this is a safety net and not a guarantee.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::VerifyConfig;
use crate::error::{PipelineError, PipelineResult};

/// JPEG segment markers associated with auxiliary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// APP1, EXIF
    Exif,
    /// APP2, ICC color profile
    IccProfile,
    /// APP13, IPTC / Photoshop
    Iptc,
    /// APP0, JFIF header. Written at the start of nearly every baseline JPEG.
    Jfif,
}

impl Marker {
    /// The metadata-bearing markers.
    pub const METADATA: [Marker; 3] = [Marker::Exif, Marker::IccProfile, Marker::Iptc];

    /// The metadata-bearing markers plus JFIF.
    pub const ALL: [Marker; 4] = [Marker::Exif, Marker::IccProfile, Marker::Iptc, Marker::Jfif];

    /// The two-byte signature of this marker.
    pub fn bytes(self) -> [u8; 2] {
        match self {
            Marker::Exif => [0xFF, 0xE1],
            Marker::IccProfile => [0xFF, 0xE2],
            Marker::Iptc => [0xFF, 0xED],
            Marker::Jfif => [0xFF, 0xE0],
        }
    }

    fn name(self) -> &'static str {
        match self {
            Marker::Exif => "EXIF",
            Marker::IccProfile => "ICC Profile",
            Marker::Iptc => "IPTC",
            Marker::Jfif => "JFIF",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [hi, lo] = self.bytes();
        write!(f, "{:02X}{:02X} ({})", hi, lo, self.name())
    }
}

/// Result of scanning a header window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// No marker pair in the window
    Clean,
    /// First marker pair found, with its offset in the window
    MarkerFound { marker: Marker, offset: usize },
}

/// Scans the first `header_bytes` of a file for metadata marker pairs.
pub struct Verifier {
    header_bytes: usize,
    markers: Vec<Marker>,
}

impl Verifier {
    /// Create a verifier from config.
    pub fn new(config: &VerifyConfig) -> Self {
        let markers = if config.flag_jfif_marker {
            Marker::ALL.to_vec()
        } else {
            Marker::METADATA.to_vec()
        };
        Self {
            header_bytes: config.header_bytes,
            markers,
        }
    }

    /// Read the header window of `path` and fail if it holds a marker.
    ///
    /// Files shorter than the window fail too.
    pub fn verify(&self, path: &Path) -> PipelineResult<()> {
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let mut header = Vec::with_capacity(self.header_bytes);
        file.take(self.header_bytes as u64)
            .read_to_end(&mut header)
            .map_err(|e| PipelineError::io(path, e))?;

        if header.len() < self.header_bytes {
            return Err(PipelineError::TruncatedOutput {
                path: path.to_path_buf(),
                expected: self.header_bytes,
                actual: header.len(),
            });
        }

        match self.scan(&header) {
            VerificationOutcome::Clean => Ok(()),
            VerificationOutcome::MarkerFound { marker, offset } => {
                Err(PipelineError::Verification {
                    path: path.to_path_buf(),
                    marker,
                    offset,
                })
            }
        }
    }

    /// Check every adjacent byte pair of `header` against the marker set.
    pub fn scan(&self, header: &[u8]) -> VerificationOutcome {
        for (offset, pair) in header.windows(2).enumerate() {
            if let Some(&marker) = self.markers.iter().find(|m| m.bytes() == pair) {
                return VerificationOutcome::MarkerFound { marker, offset };
            }
        }
        VerificationOutcome::Clean
    }
}
