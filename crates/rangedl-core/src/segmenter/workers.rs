//! Clamped worker count.

/// Number of concurrent range workers, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerCount(usize);

impl WorkerCount {
    pub const MIN: usize = 1;
    pub const MAX: usize = 50;

    /// Clamp any requested count (including zero or negative CLI input) into range.
    pub fn clamped(requested: i64) -> Self {
        let n = requested.clamp(Self::MIN as i64, Self::MAX as i64);
        WorkerCount(n as usize)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for WorkerCount {
    fn default() -> Self {
        WorkerCount(Self::MIN)
    }
}
