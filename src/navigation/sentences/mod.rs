mod gga;
mod rmc;

use log::{debug, trace};
use nom::{
    IResult, Parser,
    bytes::complete::take,
    character::complete::char,
    combinator::all_consuming,
};

use crate::{
    ChecksumMode, Fields, FrameError, LineEndingMode,
    declination::{DeclinationModel, NoDeclination},
    frame,
    line::Line,
    navigation::{NavigationState, SharedNavigation},
};

/// Talker ID, the first two letters of a sentence identifier
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Talker {
    /// GP - GPS
    Gps,
    /// GL - GLONASS
    Glonass,
    /// GA - Galileo
    Galileo,
    /// GB or BD - BeiDou
    Beidou,
    /// GQ - QZSS
    Qzss,
    /// GN - Combined GNSS
    Combined,
}

impl Talker {
    /// Looks up a two-letter talker ID.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "GP" => Some(Self::Gps),
            "GL" => Some(Self::Glonass),
            "GA" => Some(Self::Galileo),
            "GB" | "BD" => Some(Self::Beidou),
            "GQ" => Some(Self::Qzss),
            "GN" => Some(Self::Combined),
            _ => None,
        }
    }
}

/// The sentence types folded into the navigation state
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceId {
    /// GGA - Global Positioning System Fix Data
    Gga,
    /// RMC - Recommended Minimum Navigation Information
    Rmc,
}

impl SentenceId {
    /// Looks up a three-letter sentence type.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "GGA" => Some(Self::Gga),
            "RMC" => Some(Self::Rmc),
            _ => None,
        }
    }
}

/// Splits a `$TTSSS` identifier field into its talker and sentence type.
///
/// Returns [`None`] for identifiers of any other shape and for unknown
/// talkers or sentence types, proprietary `$P...` sentences included.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::{SentenceId, Talker, identify};
///
/// assert_eq!(identify("$GNRMC"), Some((Talker::Combined, SentenceId::Rmc)));
/// assert_eq!(identify("$GPGSV"), None);
/// assert_eq!(identify("$PUBX"), None);
/// ```
pub fn identify(identifier: &str) -> Option<(Talker, SentenceId)> {
    let result: IResult<_, _> =
        all_consuming((char('$'), take(2u8), take(3u8))).parse(identifier);
    let (_, (_, talker, sentence)) = result.ok()?;

    Some((Talker::from_code(talker)?, SentenceId::from_code(sentence)?))
}

/// Decoder settings.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::{ChecksumMode, DecoderConfig, Talker};
///
/// // Only accept combined-constellation sentences, as emitted by multi-GNSS receivers
/// let config = DecoderConfig::default().with_talker(Talker::Combined);
/// assert_eq!(config.checksum, ChecksumMode::Required);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Checksum requirement
    pub checksum: ChecksumMode,
    /// Carriage return handling
    pub line_ending: LineEndingMode,
    /// Only decode sentences from this talker; [`None`] accepts every known talker
    pub talker: Option<Talker>,
}

impl DecoderConfig {
    pub fn with_checksum(self, checksum: ChecksumMode) -> Self {
        Self { checksum, ..self }
    }

    pub fn with_line_ending(self, line_ending: LineEndingMode) -> Self {
        Self {
            line_ending,
            ..self
        }
    }

    pub fn with_talker(self, talker: Talker) -> Self {
        Self {
            talker: Some(talker),
            ..self
        }
    }
}

/// What happened to a line handed to the [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The sentence passed framing and its fields were merged into the state.
    Applied {
        talker: Talker,
        sentence: SentenceId,
    },
    /// The sentence passed framing but is not decoded: an unknown sentence
    /// type, or a talker excluded by [`DecoderConfig::talker`].
    Ignored,
    /// The line failed framing. The state is unchanged.
    Discarded(FrameError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }
}

/// Validates sentences and dispatches them to the GGA and RMC decoders.
///
/// The decoder itself holds no navigation data: the [`NavigationState`] is
/// owned by the caller and passed to every call.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::{
///     Decoder, DecoderConfig, FixQuality, FrameError, NavigationState, Outcome, SentenceId, Talker,
/// };
///
/// let mut decoder = Decoder::new(DecoderConfig::default());
/// let mut state = NavigationState::new();
///
/// let outcome = decoder.decode(
///     "$GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*59",
///     &mut state,
/// );
/// assert_eq!(outcome, Outcome::Applied { talker: Talker::Combined, sentence: SentenceId::Gga });
/// assert_eq!(state.fix_quality, FixQuality::SinglePoint);
///
/// // a corrupted sentence leaves the state alone
/// let outcome = decoder.decode(
///     "$GNGGA,123519,4807.038,N,01131.000,E,0,08,0.9,545.4,M,46.9,M,,*59",
///     &mut state,
/// );
/// assert!(matches!(outcome, Outcome::Discarded(FrameError::ChecksumMismatch { .. })));
/// assert_eq!(state.fix_quality, FixQuality::SinglePoint);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Decoder<D = NoDeclination> {
    config: DecoderConfig,
    declination: D,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            declination: NoDeclination,
        }
    }
}

impl<D: DeclinationModel> Decoder<D> {
    /// Creates a decoder that updates the magnetic declination through `model`
    /// whenever a GGA sentence carries a full position.
    pub fn with_declination(config: DecoderConfig, model: D) -> Self {
        Self {
            config,
            declination: model,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes one line (without its line feed) into `state`.
    pub fn decode(&mut self, line: &str, state: &mut NavigationState) -> Outcome {
        let frame = match frame(line, self.config.checksum, self.config.line_ending) {
            Ok(frame) => frame,
            Err(e) => {
                debug!("discarding {line:?}: {e}");
                return Outcome::Discarded(e);
            }
        };

        let fields = Fields::split(frame.sentence);

        let Some((talker, sentence)) = identify(fields.identifier()) else {
            trace!("ignoring {} sentence", fields.identifier());
            return Outcome::Ignored;
        };

        if self.config.talker.is_some_and(|accepted| accepted != talker) {
            trace!("ignoring {} sentence from {talker:?}", fields.identifier());
            return Outcome::Ignored;
        }

        match sentence {
            SentenceId::Gga => gga::apply(&fields, state, &mut self.declination),
            SentenceId::Rmc => rmc::apply(&fields, state),
        }

        Outcome::Applied { talker, sentence }
    }

    /// Decodes a line produced by a [`LineAssembler`](crate::LineAssembler).
    ///
    /// Overflowed and non-ASCII lines are discarded.
    pub fn decode_line(&mut self, line: &Line<'_>, state: &mut NavigationState) -> Outcome {
        match line.as_str() {
            Ok(line) => self.decode(line, state),
            Err(e) => {
                debug!("discarding line: {e}");
                Outcome::Discarded(e)
            }
        }
    }

    /// Decodes one line into a shared state.
    ///
    /// The whole sentence is applied under the state's lock.
    pub fn decode_shared(&mut self, line: &str, shared: &SharedNavigation) -> Outcome {
        let mut outcome = Outcome::Ignored;
        shared.update(|state| {
            outcome = self.decode(line, state);
            outcome.is_applied()
        });
        outcome
    }
}
