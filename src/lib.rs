//! # NMEA 0183 Navigation State
//!
//! This library turns the byte stream of a satellite receiver into a
//! navigation state. Sentences have the format:
//! `$TTSSS,D1,D2,...,Dn*CC`
//!
//! Every line goes through the same steps:
//! - [`LineAssembler`] collects bytes from a [`ByteSource`] until a line feed
//! - [`frame`] checks the `$` start and the `*CC` checksum
//! - [`Fields`] splits the sentence on commas, keeping empty fields
//! - [`Decoder`] dispatches GGA and RMC sentences and merges their fields into
//!   a caller-owned [`NavigationState`]
//!
//! Fields are sticky: an empty or malformed field never overwrites a value
//! decoded earlier, and a sentence failing its checksum changes nothing.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_navstate::{Decoder, DecoderConfig, FixQuality, NavigationState};
//!
//! let mut decoder = Decoder::new(DecoderConfig::default());
//! let mut state = NavigationState::new();
//!
//! decoder.decode(
//!     "$GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*59",
//!     &mut state,
//! );
//!
//! assert_eq!(state.fix_quality, FixQuality::SinglePoint);
//! assert_eq!(state.altitude, Some(545.4));
//! ```

pub mod declination;
pub mod error;
mod fields;
mod line;
pub mod navigation;
mod nmea0183;
mod parse;
mod receiver;

pub use declination::{DeclinationModel, FixedDeclination, NoDeclination};
pub use error::FrameError;
pub use fields::Fields;
pub use line::{ByteSource, DEFAULT_LINE_CAPACITY, IoSource, LINE_FEED, Line, LineAssembler, NO_DATA};
pub use navigation::{
    FixQuality, NavigationMode, NavigationState, PositionStatus, SharedNavigation, Snapshot,
    UtcEpoch,
    sentences::{Decoder, DecoderConfig, Outcome, SentenceId, Talker, identify},
};
pub use nmea0183::*;
pub use parse::FieldParse;
pub use receiver::Receiver;
