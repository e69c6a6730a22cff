//! Lock-guarded positioned writes into the shared output file.

use std::fs::File;
use std::io;
use std::sync::Mutex;

/// A target that accepts writes at absolute offsets.
///
/// Called only while the owning `SharedFile` lock is held, so implementations
/// may keep a single cursor or other non-thread-safe state.
pub trait PositionedWrite: Send {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()>;

    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl PositionedWrite for File {
    #[cfg(unix)]
    fn write_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        use std::os::unix::fs::FileExt;
        FileExt::write_all_at(self, data, offset)
    }

    #[cfg(not(unix))]
    fn write_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        use std::io::{Seek, SeekFrom, Write};
        self.seek(SeekFrom::Start(offset))?;
        self.write_all(data)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// The single output handle shared by all range workers.
///
/// Every `write_at` takes the one lock for exactly one positioned write.
pub struct SharedFile<W = File> {
    inner: Mutex<W>,
}

impl<W: PositionedWrite> SharedFile<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Write `data` at `offset` under the shared lock.
    pub fn write_at(&self, offset: u64, data: &[u8]) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output file lock poisoned"))?;
        guard.write_at(offset, data)
    }

    /// Flush file data to disk.
    pub fn sync(&self) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output file lock poisoned"))?;
        guard.sync()
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.inner
            .into_inner()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output file lock poisoned"))
    }
}
