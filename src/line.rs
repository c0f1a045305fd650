//! # Line Assembly
//!
//! Receivers are polled one byte at a time. The [`LineAssembler`] collects
//! those bytes into lines and hands out each line once its line feed arrives.

use std::io::{self, Read};

use log::{trace, warn};

use crate::error::FrameError;

/// Byte value a [`ByteSource`] returns when it has nothing to offer right now.
pub const NO_DATA: u8 = 0xFF;

/// Byte value terminating a line.
pub const LINE_FEED: u8 = b'\n';

/// Default capacity of the line buffer, in bytes.
///
/// NMEA 0183 limits sentences to 82 characters, so this leaves plenty of room
/// for receivers that do not respect the limit.
pub const DEFAULT_LINE_CAPACITY: usize = 256;

/// A transport handing out received bytes one at a time.
///
/// Implementations return [`NO_DATA`] when no byte is currently available.
/// Any other value is a received byte. An `Err` is a failure of the transport
/// itself and is passed on to the caller of the line assembler.
pub trait ByteSource {
    /// The transport failure type.
    type Error;

    /// Reads the next byte, or [`NO_DATA`].
    fn read_byte(&mut self) -> Result<u8, Self::Error>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).read_byte()
    }
}

/// Adapts any [`Read`] implementation to a [`ByteSource`].
///
/// End of input, [`io::ErrorKind::WouldBlock`] and
/// [`io::ErrorKind::Interrupted`] are reported as [`NO_DATA`]; every other
/// I/O error is a transport failure.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::{ByteSource, IoSource, NO_DATA};
///
/// let mut source = IoSource::new(&b"$"[..]);
/// assert_eq!(source.read_byte().ok(), Some(b'$'));
/// assert_eq!(source.read_byte().ok(), Some(NO_DATA));
/// ```
#[derive(Debug)]
pub struct IoSource<R> {
    reader: R,
}

impl<R: Read> IoSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    type Error = io::Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte) {
            Ok(0) => Ok(NO_DATA),
            Ok(_) => Ok(byte[0]),
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
                Ok(NO_DATA)
            }
            Err(e) => Err(e),
        }
    }
}

/// A completed line, without its terminating line feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    bytes: &'a [u8],
    overflowed: bool,
}

impl<'a> Line<'a> {
    /// Returns the raw bytes of the line.
    ///
    /// For an overflowed line these are only the bytes that fit the buffer.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns `true` if the line did not fit the line buffer.
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Returns the line as text.
    ///
    /// Fails for overflowed lines and lines containing non-ASCII bytes.
    pub fn as_str(&self) -> Result<&'a str, FrameError> {
        if self.overflowed {
            return Err(FrameError::Overflow);
        }
        if !self.bytes.is_ascii() {
            return Err(FrameError::NonAscii);
        }
        std::str::from_utf8(self.bytes).map_err(|_| FrameError::NonAscii)
    }
}

/// Accumulates bytes from a [`ByteSource`] into lines.
///
/// Partial lines survive across calls: a call that runs out of data returns
/// [`nb::Error::WouldBlock`] and the next call picks up where it stopped.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::{IoSource, LineAssembler};
///
/// let mut assembler = LineAssembler::<256>::new();
/// let mut source = IoSource::new(&b"$GPGGA,1*68\n$GP"[..]);
///
/// let line = assembler.next_line(&mut source).unwrap();
/// assert_eq!(line.as_bytes(), b"$GPGGA,1*68");
///
/// // the rest of the second line has not arrived yet
/// assert!(matches!(assembler.next_line(&mut source), Err(nb::Error::WouldBlock)));
/// assert_eq!(assembler.pending(), b"$GP");
/// ```
#[derive(Debug, Default)]
pub struct LineAssembler<const N: usize = DEFAULT_LINE_CAPACITY> {
    buffer: heapless::Vec<u8, N>,
    overflowed: bool,
    complete: bool,
}

impl<const N: usize> LineAssembler<N> {
    pub fn new() -> Self {
        Self {
            buffer: heapless::Vec::new(),
            overflowed: false,
            complete: false,
        }
    }

    /// Returns the bytes of the line collected so far.
    pub fn pending(&self) -> &[u8] {
        if self.complete { &[] } else { &self.buffer }
    }

    /// Reads bytes until a line is complete or the source runs dry.
    ///
    /// # Errors
    ///
    /// - [`nb::Error::WouldBlock`] when the source returned [`NO_DATA`]; the
    ///   partial line is kept.
    /// - [`nb::Error::Other`] when the source failed.
    pub fn next_line<S>(&mut self, source: &mut S) -> nb::Result<Line<'_>, S::Error>
    where
        S: ByteSource + ?Sized,
    {
        if self.complete {
            self.buffer.clear();
            self.overflowed = false;
            self.complete = false;
        }

        loop {
            match source.read_byte().map_err(nb::Error::Other)? {
                NO_DATA => return Err(nb::Error::WouldBlock),
                LINE_FEED => break,
                byte => {
                    if self.buffer.push(byte).is_err() && !self.overflowed {
                        warn!("line exceeds {N} bytes, dropping it");
                        self.overflowed = true;
                    }
                }
            }
        }

        self.complete = true;
        trace!("line complete ({} bytes)", self.buffer.len());

        Ok(Line {
            bytes: &self.buffer,
            overflowed: self.overflowed,
        })
    }
}
