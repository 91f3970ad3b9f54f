//! The diagnostic output stream and its scoped suppressor.
//!
//! Every byte of the output protocol goes through an [`OutputSink`] owned by
//! the batch driver. While a file is being checked the sink is suppressed:
//! writes land in an in-memory scratch buffer that is discarded when the
//! guard drops, so nothing the analyzer prints can corrupt the
//! NUL-delimited record stream.

use std::io::{self, Write};

/// Owns the stream diagnostics are written to.
pub struct OutputSink<W: Write> {
    out: W,
    scratch: Option<Vec<u8>>,
}

impl<W: Write> OutputSink<W> {
    pub fn new(out: W) -> Self {
        OutputSink { out, scratch: None }
    }

    /// Mute the sink until the returned guard drops.
    ///
    /// The guard is handed to the analyzer as its console; the live stream
    /// is restored exactly once, on every exit path, by the guard's `Drop`.
    pub fn suppress(&mut self) -> Suppressed<'_, W> {
        self.scratch = Some(Vec::new());
        Suppressed { sink: self }
    }

    pub fn is_suppressed(&self) -> bool {
        self.scratch.is_some()
    }

    /// Consume the sink, returning the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Write for OutputSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.scratch {
            Some(scratch) => scratch.write(buf),
            None => self.out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.scratch {
            Some(_) => Ok(()),
            None => self.out.flush(),
        }
    }
}

/// RAII guard returned by [`OutputSink::suppress`].
pub struct Suppressed<'a, W: Write> {
    sink: &'a mut OutputSink<W>,
}

impl<W: Write> Write for Suppressed<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

impl<W: Write> Drop for Suppressed<'_, W> {
    fn drop(&mut self) {
        self.sink.scratch = None;
    }
}
