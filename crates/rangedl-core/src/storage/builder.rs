//! Builder for creating and preallocating the output file.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::writer::SharedFile;
#[cfg(unix)]
use std::os::unix::io::AsRawFd;

/// Builder for a new output file. Call `preallocate` then `build` to get
/// a `SharedFile` that workers write into concurrently.
pub struct StorageWriterBuilder {
    file: File,
    path: PathBuf,
}

impl StorageWriterBuilder {
    /// Create the output file at `path`. Overwrites if the path already exists.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        tracing::debug!(path = %path.display(), "output file created");
        Ok(StorageWriterBuilder {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Preallocate `size` bytes. On Unix tries `posix_fallocate` for real block
    /// allocation; falls back to `set_len` on failure or non-Unix.
    pub fn preallocate(&mut self, size: u64) -> io::Result<()> {
        if size == 0 {
            return Ok(());
        }
        #[cfg(unix)]
        {
            let fd = self.file.as_raw_fd();
            let r = unsafe { libc::posix_fallocate(fd, 0, size as libc::off_t) };
            if r == 0 {
                return Ok(());
            }
            tracing::debug!(errno = r, "posix_fallocate failed, falling back to set_len");
        }
        self.file.set_len(size)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finish building and return the sink shared by all range workers.
    pub fn build(self) -> SharedFile<File> {
        SharedFile::new(self.file)
    }
}
