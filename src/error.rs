//! # Error Types
//!
//! This module defines the reasons a completed line can be rejected before any
//! of its fields reach the navigation state.
//!
//! Transport failures are not represented here: they belong to the
//! [`ByteSource`](crate::ByteSource) implementation and are handed back to the
//! caller untouched through [`nb::Error::Other`].

use thiserror::Error;

/// Represents all the ways a line can fail sentence framing.
///
/// A line that fails framing is discarded as a whole. None of these errors is
/// fatal: the decoder reports them through
/// [`Outcome::Discarded`](crate::Outcome::Discarded) and keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The line contains non-ASCII bytes.
    ///
    /// NMEA messages must be ASCII-only for proper parsing and checksum calculation.
    #[error("sentence contains non-ASCII bytes")]
    NonAscii,

    /// The line exceeded the line assembler capacity and was truncated.
    #[error("sentence exceeds the line buffer capacity")]
    Overflow,

    /// The line does not start with the `$` sentence delimiter.
    #[error("sentence does not start with '$'")]
    MissingStart,

    /// The line ends with a carriage return while the decoder forbids it.
    #[error("sentence ends with a forbidden carriage return")]
    LineEnding,

    /// No `*` introducing a checksum trailer was found.
    #[error("sentence has no checksum trailer")]
    MissingChecksum,

    /// The characters after the last `*` are not exactly two hex digits.
    #[error("checksum trailer is not two hex digits")]
    MalformedChecksum,

    /// The checksum of the sentence was corrupt or incorrect.
    ///
    /// Contains both the expected checksum (calculated from the message content)
    /// and the actual checksum found in the message.
    #[error("checksum mismatch: calculated {expected:02X}, found {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the message content
        expected: u8,
        /// The checksum found in the message
        found: u8,
    },
}
