// Storage adapter: reads and writes the whole registry as one JSON document.
// It only (de)serializes; the registry's own Deserialize impl enforces the
// course invariants, and any violation surfaces here as a corrupt snapshot.

use crate::error::{Result, TrackerError};
use crate::registry::Registry;
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Top-level document: `{"courses": {...}}`.
#[derive(Deserialize)]
struct Snapshot {
    courses: Registry,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    courses: &'a Registry,
}

/// Handle on the snapshot file. Holds only the path; every call opens the
/// file afresh.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file is an empty registry.
    pub fn load(&self) -> Result<Registry> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no snapshot at {}, starting empty", self.path.display());
                return Ok(Registry::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };
        let snapshot: Snapshot =
            serde_json::from_str(&text).map_err(|e| TrackerError::CorruptSnapshot {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        debug!(
            "loaded {} course(s) from {}",
            snapshot.courses.len(),
            self.path.display()
        );
        Ok(snapshot.courses)
    }

    /// Overwrite the snapshot with the full registry.
    pub fn save(&self, registry: &Registry) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let text = to_pretty_json(&SnapshotRef { courses: registry })
            .map_err(|e| self.io_error(std::io::Error::new(ErrorKind::InvalidData, e)))?;
        std::fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        debug!(
            "saved {} course(s) to {}",
            registry.len(),
            self.path.display()
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> TrackerError {
        TrackerError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

// Four-space indentation keeps the file readable when edited by hand.
fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    out.push(b'\n');
    Ok(out)
}
