//! # NMEA 0183 Sentence Framing
//!
//! This module validates the outer structure of NMEA 0183 sentences:
//! `$HHH,D1,D2,...,Dn*CC`
//!
//! The line feed terminating a sentence is consumed by the
//! [`LineAssembler`](crate::LineAssembler), so framing starts from the line
//! content. The framing rules are configurable to handle variations in:
//! - Checksum requirements (required or optional)
//! - Carriage return handling (tolerated or forbidden)

use nom::{
    AsChar, IResult, Parser, bytes::complete::take_while_m_n, character::complete::char,
    combinator::all_consuming, number::complete::hex_u32,
};

use crate::error::FrameError;

/// Defines how the decoder should handle NMEA message checksums.
///
/// NMEA 0183 messages can include a checksum in the format `*CC` where
/// CC is a two-digit hexadecimal value representing the XOR of all bytes in the
/// message content (excluding the '$' prefix and '*' delimiter).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    #[default]
    /// Checksum is required and must be present.
    ///
    /// A sentence without a `*CC` trailer is discarded. If a checksum is
    /// present, it is validated against the calculated checksum.
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// - If no checksum is present (`*CC` missing), the sentence is accepted
    /// - If a checksum is present, it must be valid or the sentence is discarded
    ///
    /// Use this mode with legacy equipment that does not always include checksums.
    Optional,
}

/// Defines how the decoder should handle a carriage return left at the end
/// of a line.
///
/// Receivers usually terminate sentences with `\r\n`. The line assembler
/// splits on `\n` only, so the `\r` is still part of the line content.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingMode {
    #[default]
    /// A single trailing `\r` is stripped before the sentence is validated.
    Tolerated,

    /// A trailing `\r` makes the sentence invalid.
    ///
    /// Use this mode with sources that are known to emit bare `\n` endings.
    Forbidden,
}

/// A line that passed framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// The full sentence, starting with `$` and including the `*CC` trailer
    /// when present. A tolerated trailing `\r` is not part of it.
    pub sentence: &'a str,
    /// Everything between the `$` and the `*` delimiter; the checksummed bytes.
    pub payload: &'a str,
    /// The checksum found in the trailer, [`None`] if the sentence had none.
    pub checksum: Option<u8>,
}

/// Validates the framing and checksum of a single line.
///
/// The checksum trailer is located by searching for the *last* `*` in the
/// line, which must be followed by exactly two hex digits.
///
/// # Arguments
///
/// * `line` - The line content, without the terminating `\n`
/// * `cc` - Checksum requirement:
///   - [`ChecksumMode::Required`]: lines without `*CC` are rejected
///   - [`ChecksumMode::Optional`]: lines without `*CC` are accepted
/// * `le` - Carriage return handling, see [`LineEndingMode`]
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::{ChecksumMode, FrameError, LineEndingMode, frame};
///
/// let framed = frame("$GPGGA,123456,data*41\r", ChecksumMode::Required, LineEndingMode::Tolerated);
/// assert_eq!(framed.map(|f| f.payload), Ok("GPGGA,123456,data"));
///
/// let framed = frame("$GPGGA,123456,data*42", ChecksumMode::Required, LineEndingMode::Tolerated);
/// assert_eq!(framed, Err(FrameError::ChecksumMismatch { expected: 0x41, found: 0x42 }));
/// ```
pub fn frame(line: &str, cc: ChecksumMode, le: LineEndingMode) -> Result<Frame<'_>, FrameError> {
    if !line.is_ascii() {
        return Err(FrameError::NonAscii);
    }

    let sentence = line_ending(line, le)?;

    let (rest, _) = char::<_, nom::error::Error<&str>>('$')
        .parse(sentence)
        .map_err(|_| FrameError::MissingStart)?;

    let (payload, found) = match rest.rfind('*') {
        Some(star) => {
            let (_, cc) = checksum_trailer(&rest[star + 1..])
                .map_err(|_| FrameError::MalformedChecksum)?;
            (&rest[..star], Some(cc))
        }
        None if cc == ChecksumMode::Required => return Err(FrameError::MissingChecksum),
        None => (rest, None),
    };

    let (payload, calculated) = checksum(payload);

    if let Some(found) = found
        && found != calculated
    {
        return Err(FrameError::ChecksumMismatch {
            expected: calculated,
            found,
        });
    }

    Ok(Frame {
        sentence,
        payload,
        checksum: found,
    })
}

/// Strips or rejects the carriage return left at the end of a line.
fn line_ending(line: &str, le: LineEndingMode) -> Result<&str, FrameError> {
    match (line.strip_suffix('\r'), le) {
        (Some(stripped), LineEndingMode::Tolerated) => Ok(stripped),
        (Some(_), LineEndingMode::Forbidden) => Err(FrameError::LineEnding),
        (None, _) => Ok(line),
    }
}

/// Parses the two hex digits that follow the `*` checksum delimiter.
///
/// Both upper and lower case digits are accepted. Anything other than exactly
/// two hex digits is an error.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::checksum_trailer;
///
/// assert_eq!(checksum_trailer("1F"), Ok(("", 0x1F)));
/// assert!(checksum_trailer("1F43").is_err());
/// assert!(checksum_trailer("1z").is_err());
/// ```
pub fn checksum_trailer(i: &str) -> IResult<&str, u8> {
    all_consuming(take_while_m_n(2, 2, AsChar::is_hex_digit))
        .and_then(hex_u32)
        .map(|cc| cc as u8)
        .parse(i)
}

/// Calculates the NMEA 0183 checksum for the given message content.
///
/// The NMEA 0183 checksum is calculated by performing an XOR (exclusive OR) operation
/// on all bytes in the message content. This includes everything between the '$' prefix
/// and the '*' checksum delimiter, but excludes both the '$' and '*' characters themselves.
///
/// # Arguments
///
/// * `input` - The message content to calculate checksum for (without '$' prefix or '*' delimiter)
///
/// # Returns
///
/// A tuple of (input, checksum) where:
/// - `input` is returned unchanged (zero-copy)
/// - `checksum` is the calculated XOR value as a u8
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::checksum;
///
/// // Calculate checksum for "GPGGA,123456,data"
/// let (_, cc) = checksum("GPGGA,123456,data");
/// assert_eq!(cc, 0x41);
/// ```
pub fn checksum(input: &str) -> (&str, u8) {
    let calculated_checksum = input
        .as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte);

    (input, calculated_checksum)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::format_checksum;
///
/// let checksum = 0x41;
/// assert_eq!(format_checksum(checksum), "41");
///
/// let checksum = 0x0A;
/// assert_eq!(format_checksum(checksum), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}
