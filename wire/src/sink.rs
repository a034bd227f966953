//! Append-only byte sinks the emitter writes into.

use std::io::{self, Write};

/// An append-only consumer of encoded bytes.
///
/// The emitter never reads back, seeks, or rewrites what it has appended.
pub trait ByteSink {
    /// Appends `bytes` in order.
    fn put_slice(&mut self, bytes: &[u8]);

    /// Appends a single byte.
    fn put_u8(&mut self, byte: u8) {
        self.put_slice(&[byte]);
    }
}

impl ByteSink for Vec<u8> {
    fn put_slice(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn put_u8(&mut self, byte: u8) {
        self.push(byte);
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn put_slice(&mut self, bytes: &[u8]) {
        (**self).put_slice(bytes);
    }

    fn put_u8(&mut self, byte: u8) {
        (**self).put_u8(byte);
    }
}

/// A sink that only counts bytes.
///
/// Useful for sizing a nested message before emitting it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LenCounter {
    len: usize,
}

impl LenCounter {
    /// Creates a counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { len: 0 }
    }

    /// Returns the number of bytes appended so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing was appended.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl ByteSink for LenCounter {
    fn put_slice(&mut self, bytes: &[u8]) {
        self.len = self.len.saturating_add(bytes.len());
    }
}

/// Adapts an [`io::Write`] (file, socket, stdout) into a [`ByteSink`].
///
/// Emitting is infallible, so the first I/O error is latched: later writes
/// are dropped and [`finish`](Self::finish) reports the error.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    error: Option<io::Error>,
    bytes_written: u64,
}

impl<W: Write> IoSink<W> {
    /// Wraps a writer.
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            error: None,
            bytes_written: 0,
        }
    }

    /// Returns the number of bytes successfully handed to the writer.
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Returns `true` if a write has failed.
    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Returns a reference to the wrapped writer.
    pub const fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flushes the writer and returns it.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while writing, or the flush error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    fn put_slice(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        match self.inner.write_all(bytes) {
            Ok(()) => self.bytes_written += bytes.len() as u64,
            Err(err) => self.error = Some(err),
        }
    }
}
