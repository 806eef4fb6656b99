//! Byte sources a [`Scanner`](super::Scanner) can read from.

use alloc::vec::Vec;

/// Why a source could not supply the requested bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// The source ran out of bytes.
    Eof,

    /// The underlying reader failed.
    #[cfg(feature = "std")]
    Io(std::io::ErrorKind),
}

/// A forward-only supply of bytes.
///
/// The scanner needs three things: single bytes for varints, exact runs of
/// bytes for payloads, and (when the source knows it) the number of bytes
/// left, so that impossible length prefixes are rejected before any payload
/// is read.
pub trait Source {
    /// Read one byte, or `Ok(None)` if the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] if the underlying source fails.
    fn read_byte(&mut self) -> Result<Option<u8>, ReadError>;

    /// Append exactly `len` bytes to `buf`.
    ///
    /// On [`ReadError::Eof`] the bytes that were available may have been
    /// appended; the caller treats the read as failed either way.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Eof`] if fewer than `len` bytes remain.
    fn read_into(&mut self, len: usize, buf: &mut Vec<u8>) -> Result<(), ReadError>;

    /// Bytes known to remain, or `None` for sources that cannot tell.
    fn remaining(&self) -> Option<usize> {
        None
    }
}

impl Source for &[u8] {
    fn read_byte(&mut self) -> Result<Option<u8>, ReadError> {
        match self.split_first() {
            Some((&byte, rest)) => {
                *self = rest;
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }

    fn read_into(&mut self, len: usize, buf: &mut Vec<u8>) -> Result<(), ReadError> {
        let (head, rest) = self.split_at_checked(len).ok_or(ReadError::Eof)?;
        buf.extend_from_slice(head);
        *self = rest;
        Ok(())
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn read_byte(&mut self) -> Result<Option<u8>, ReadError> {
        (**self).read_byte()
    }

    fn read_into(&mut self, len: usize, buf: &mut Vec<u8>) -> Result<(), ReadError> {
        (**self).read_into(len, buf)
    }

    fn remaining(&self) -> Option<usize> {
        (**self).remaining()
    }
}

/// Adapts a [`std::io::Read`] into a [`Source`].
///
/// No buffering is added: wrap slow readers in a
/// [`BufReader`](std::io::BufReader) first, since varints are read a byte at
/// a time.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Reader<R> {
    /// Wrap a reader.
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Source for Reader<R> {
    fn read_byte(&mut self) -> Result<Option<u8>, ReadError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    let [b] = byte;
                    return Ok(Some(b));
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(ReadError::Io(e.kind())),
            }
        }
    }

    fn read_into(&mut self, len: usize, buf: &mut Vec<u8>) -> Result<(), ReadError> {
        use std::io::Read;

        // Grow with the data actually delivered rather than trusting `len`.
        let start = buf.len();
        let want = u64::try_from(len).map_err(|_| ReadError::Eof)?;
        (&mut self.inner)
            .take(want)
            .read_to_end(buf)
            .map_err(|e| ReadError::Io(e.kind()))?;

        if buf.len() - start < len {
            return Err(ReadError::Eof);
        }
        Ok(())
    }
}
