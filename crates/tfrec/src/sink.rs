//! Append-only byte destinations for encoded frames.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// An append-only byte destination.
///
/// A sink belongs to exactly one writer at a time; no method provides
/// internal locking. All calls block until the bytes are accepted (or
/// the operation fails).
pub trait Sink {
    /// Appends `buf` in full.
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;
    /// Pushes any buffered bytes toward the destination.
    fn flush(&mut self) -> io::Result<()>;
    /// Releases the destination. Called at most once.
    fn close(&mut self) -> io::Result<()>;
}

/// Buffered, file-backed sink.
pub struct FileSink {
    file: BufWriter<File>,
}

impl FileSink {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }
}

impl Sink for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.file.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        // The descriptor itself is released on drop; close only has to
        // drain the write buffer so no frame bytes are lost.
        self.file.flush()
    }
}
