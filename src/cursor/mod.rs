//! Uniform seek/read/write over an in-memory or file-backed buffer.
//!
//! A [`Cursor`] is the only thing the offset-chain evaluator and the field
//! codecs ever touch. Implementations never restore their position on
//! return — the state evaluator seeks freely, and callers sharing a cursor
//! across instances must treat each access as repositioning it.
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Capability-probed seek/read/write surface. Object-safe so the engine can
/// hold `&mut dyn Cursor` without knowing the concrete backing.
pub trait Cursor {
    fn tell(&mut self) -> io::Result<u64>;
    fn seek(&mut self, pos: u64) -> io::Result<u64>;
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
    fn readable(&self) -> bool {
        true
    }
    fn writable(&self) -> bool {
        true
    }
    fn seekable(&self) -> bool {
        true
    }

    /// Read exactly `buf.len()` bytes or fail with an `UnexpectedEof` I/O
    /// error. Most codecs want "all or nothing" reads; this is the common
    /// path through `Read::read` retried until full or exhausted.
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "cursor exhausted before the requested length was read",
                ));
            }
            filled += n;
        }
        Ok(())
    }
}

/// Read-only view over a borrowed byte slice. Backs `loads()` and any other
/// in-memory, non-owning decode path.
pub struct SliceCursor<'a> {
    inner: io::Cursor<&'a [u8]>,
}

impl<'a> SliceCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            inner: io::Cursor::new(buf),
        }
    }
}

impl Cursor for SliceCursor<'_> {
    fn tell(&mut self) -> io::Result<u64> {
        Ok(self.inner.position())
    }

    fn seek(&mut self, pos: u64) -> io::Result<u64> {
        self.inner.seek(SeekFrom::Start(pos))
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "cannot write through a read-only slice cursor",
        ))
    }

    fn writable(&self) -> bool {
        false
    }
}

/// Read-write owning cursor over a growable buffer. Backs `dumps()` and any
/// in-memory encode path.
pub struct VecCursor {
    inner: io::Cursor<Vec<u8>>,
}

impl VecCursor {
    pub fn new() -> Self {
        Self {
            inner: io::Cursor::new(Vec::new()),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl Default for VecCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor for VecCursor {
    fn tell(&mut self) -> io::Result<u64> {
        Ok(self.inner.position())
    }

    fn seek(&mut self, pos: u64) -> io::Result<u64> {
        self.inner.seek(SeekFrom::Start(pos))
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
}

/// Seekable, file-backed cursor for random access into on-disk records
/// without loading the whole file.
pub struct FileCursor {
    inner: File,
}

impl FileCursor {
    pub fn new(file: File) -> Self {
        Self { inner: file }
    }
}

impl Cursor for FileCursor {
    fn tell(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    fn seek(&mut self, pos: u64) -> io::Result<u64> {
        self.inner.seek(SeekFrom::Start(pos))
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
}

/// Offset-windowed view over a parent cursor, used to bound nested-object
/// reads. Its `seek`/`tell` are translated by a fixed base offset; it does
/// not bound the upper end of the window, trusting the inner codec to stop
/// at its own end.
pub struct SubCursor<'p> {
    parent: &'p mut dyn Cursor,
    base: u64,
}

impl<'p> SubCursor<'p> {
    /// `base` is the parent-relative offset this sub-cursor treats as zero.
    pub fn new(parent: &'p mut dyn Cursor, base: u64) -> Self {
        Self { parent, base }
    }
}

impl Cursor for SubCursor<'_> {
    fn tell(&mut self) -> io::Result<u64> {
        Ok(self.parent.tell()?.saturating_sub(self.base))
    }

    fn seek(&mut self, pos: u64) -> io::Result<u64> {
        let absolute = self.parent.seek(self.base + pos)?;
        Ok(absolute.saturating_sub(self.base))
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.parent.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.parent.write(buf)
    }

    fn readable(&self) -> bool {
        self.parent.readable()
    }

    fn writable(&self) -> bool {
        self.parent.writable()
    }

    fn seekable(&self) -> bool {
        self.parent.seekable()
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
