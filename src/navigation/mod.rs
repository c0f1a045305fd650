//! # Navigation State
//!
//! The record of last-known fix data, updated sentence by sentence.

pub mod parse;
pub mod sentences;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use crate::FieldParse;

/// Declares a fieldless enum decoded from a receiver code through a lookup
/// table. Codes missing from the table map to the `#[default]` variant.
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $code:ty {
            $(
                $(#[$variant_meta:meta])*
                $($value:literal)|+ => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Looks up the variant for a receiver code.
            pub fn from_code(code: $code) -> Self {
                match code {
                    $($($value)|+ => Self::$variant,)*
                    _ => Self::default(),
                }
            }
        }
    };
}

code_enum! {
    /// Quality of the GPS fix, as reported by GGA
    pub enum FixQuality: u8 {
        /// 0 - Fix not available
        #[default]
        0 => Invalid,
        /// 1 - Single point (autonomous) fix
        1 => SinglePoint,
        /// 2 - Pseudorange differential fix
        2 => PseudorangeDifferential,
        /// 4 - Real Time Kinematic, fixed integers
        4 => RtkFixed,
        /// 5 - Real Time Kinematic, floating integers
        5 => RtkFloating,
        /// 6 - Estimated (dead reckoning)
        6 => DeadReckoning,
        /// 7 - Manual input mode
        7 => ManualInput,
        /// 8 - Simulation mode
        8 => Simulator,
        /// 9 - WAAS/SBAS fix
        9 => Waas,
    }
}

code_enum! {
    /// Status Mode Indicator, as reported by RMC
    pub enum PositionStatus: char {
        /// A - Valid
        'A' => Valid,
        /// V - Invalid
        #[default]
        'V' => Invalid,
    }
}

code_enum! {
    /// FAA Mode Indicator, as reported by RMC
    pub enum NavigationMode: char {
        /// N - Data not valid
        #[default]
        'N' => Invalid,
        /// A - Autonomous mode
        'A' => Autonomous,
        /// D - Differential mode
        'D' => Differential,
        /// E - Estimated (dead-reckoning) mode
        'E' => DeadReckoning,
    }
}

impl FieldParse for FixQuality {
    /// Any integer outside the table, negative or wider than a byte
    /// included, reads as [`FixQuality::Invalid`]. Non-numeric text is
    /// malformed.
    fn parse_field(field: &str) -> Option<Self> {
        i64::parse_field(field)
            .map(|code| u8::try_from(code).map_or(Self::Invalid, Self::from_code))
    }
}

impl FieldParse for PositionStatus {
    fn parse_field(field: &str) -> Option<Self> {
        Some(char::parse_field(field).map_or_else(Self::default, Self::from_code))
    }
}

impl FieldParse for NavigationMode {
    fn parse_field(field: &str) -> Option<Self> {
        Some(char::parse_field(field).map_or_else(Self::default, Self::from_code))
    }
}

/// A UTC instant as whole seconds since the Unix epoch plus a microsecond
/// fraction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcEpoch {
    /// Seconds since 1970-01-01T00:00:00Z
    pub seconds: i64,
    /// Sub-second part, in `0..1_000_000`
    pub microseconds: u32,
}

impl UtcEpoch {
    /// Combines a calendar date and a time of day, both in UTC.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_navstate::UtcEpoch;
    /// use time::{Date, Month, Time};
    ///
    /// let date = Date::from_calendar_date(1994, Month::March, 23).unwrap();
    /// let time = Time::from_hms_micro(12, 35, 19, 250_000).unwrap();
    ///
    /// let epoch = UtcEpoch::from_date_time(date, time);
    /// assert_eq!(epoch.seconds, 764_426_119);
    /// assert_eq!(epoch.microseconds, 250_000);
    /// ```
    pub fn from_date_time(date: Date, time: Time) -> Self {
        let datetime = PrimitiveDateTime::new(date, time).assume_utc();
        Self {
            seconds: datetime.unix_timestamp(),
            microseconds: datetime.microsecond(),
        }
    }

    /// Converts back to a calendar date and time.
    ///
    /// Returns [`None`] if the instant is outside the range supported by
    /// [`OffsetDateTime`].
    pub fn to_datetime(self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.seconds)
            .ok()?
            .replace_microsecond(self.microseconds)
            .ok()
    }

    /// Returns the UTC calendar date of this instant.
    pub fn date(self) -> Option<Date> {
        self.to_datetime().map(OffsetDateTime::date)
    }
}

/// The last-known fix data.
///
/// Decoders only overwrite a field when the owning sentence passed its
/// checksum and the source field is present and well-formed, so a value never
/// reverts to unknown because of a sparse or malformed sentence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct NavigationState {
    /// Latitude in decimal degrees, north positive
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, east positive
    pub longitude: Option<f64>,
    /// GPS Quality Indicator
    pub fix_quality: FixQuality,
    /// Number of satellites in use
    pub num_satellites: Option<u8>,
    /// Horizontal Dilution of Precision
    pub horizontal_dilution: Option<f64>,
    /// Altitude above/below mean sea level (geoid) in meters
    pub altitude: Option<f64>,
    /// Geoidal separation in meters, the difference between the WGS-84 earth ellipsoid and mean sea level (geoid)
    pub geoid_undulation: Option<f64>,
    /// Fix time and date in UTC
    pub utc: Option<UtcEpoch>,
    /// Status Mode Indicator
    pub position_status: PositionStatus,
    /// FAA Mode Indicator
    pub navigation_mode: NavigationMode,
    /// Speed over ground in knots
    pub speed_over_ground: Option<f64>,
    /// Course over ground in degrees
    pub course_over_ground: Option<f64>,
    /// Magnetic declination in degrees at the last position, east positive
    pub magnetic_declination: Option<f64>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with a known magnetic declination, used until the
    /// first position fix replaces it.
    pub fn with_declination(declination: f64) -> Self {
        Self {
            magnetic_declination: Some(declination),
            ..Self::default()
        }
    }
}

/// A consistent copy of a [`SharedNavigation`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub state: NavigationState,
    /// Number of sentences applied to the state so far
    pub version: u64,
}

/// A [`NavigationState`] shared between one decoding thread and any number of
/// readers.
///
/// A sentence is applied under the lock as a whole, so a [`Snapshot`] never
/// shows a half-applied sentence (a latitude without its longitude).
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::{Decoder, DecoderConfig, SharedNavigation};
///
/// let shared = SharedNavigation::default();
/// let reader = shared.clone();
///
/// let mut decoder = Decoder::new(DecoderConfig::default());
/// decoder.decode_shared(
///     "$GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*59",
///     &shared,
/// );
///
/// let snapshot = reader.snapshot();
/// assert_eq!(snapshot.version, 1);
/// assert_eq!(snapshot.state.num_satellites, Some(8));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedNavigation {
    inner: Arc<Mutex<Snapshot>>,
}

impl SharedNavigation {
    pub fn new(state: NavigationState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Snapshot { state, version: 0 })),
        }
    }

    /// Returns a copy of the current state and its version.
    pub fn snapshot(&self) -> Snapshot {
        *self.lock()
    }

    /// Runs `f` on the state under the lock.
    ///
    /// The version is bumped when `f` returns `true`.
    pub fn update(&self, f: impl FnOnce(&mut NavigationState) -> bool) -> bool {
        let mut guard = self.lock();
        let changed = f(&mut guard.state);
        if changed {
            guard.version += 1;
        }
        changed
    }

    // A panic while holding the lock cannot leave the state worse than a
    // malformed sentence would, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
