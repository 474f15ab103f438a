use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the local copy inside its scratch directory. Object names can exceed what the
/// filesystem allows for a single path component, so they are never used on disk.
const SCRATCH_FILE_NAME: &str = "object";

/// A local file inside a directory owned by a single invocation.
///
/// The directory and everything in it is removed when this is dropped, so an invocation never
/// leaves its copy behind regardless of how it exits.
#[derive(Debug)]
pub struct ScratchFile {
    dir: TempDir,
    path: PathBuf,
}

impl ScratchFile {
    /// Creates an empty file inside a freshly created unique directory under `root`.
    pub fn create_in(root: &Path) -> std::io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("bucket-notifier-")
            .tempdir_in(root)?;
        let path = dir.path().join(SCRATCH_FILE_NAME);
        std::fs::File::create(&path)?;
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the scratch directory, reporting any failure instead of ignoring it like drop does
    pub fn close(self) -> std::io::Result<()> {
        self.dir.close()
    }
}
