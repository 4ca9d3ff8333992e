use std::io;
use std::path::Path;

/// Filesystem collaborator used for schema-file existence checks.
///
/// Injected so the engine stays a pure computation; tests substitute
/// probes that fake missing files or I/O failures.
pub trait FileProbe {
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// Probe backed by the real filesystem.
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
