//! # Magnetic Declination
//!
//! The geomagnetic model is not part of this crate. Decoders call it through
//! [`DeclinationModel`] whenever a sentence yields a fresh position.

use time::Date;

/// Computes the magnetic declination at a position and date.
///
/// Closures taking `(latitude, longitude, date)` and returning degrees
/// implement this trait, so a model can be plugged in directly:
///
/// ```rust
/// use nmea0183_navstate::{Decoder, DecoderConfig};
/// use time::Date;
///
/// let model = |latitude: f64, _longitude: f64, _date: Date| latitude / 10.0;
/// let decoder = Decoder::with_declination(DecoderConfig::default(), model);
/// ```
pub trait DeclinationModel {
    /// Returns the declination in degrees, east positive, or [`None`] when
    /// the model has no value for this position.
    ///
    /// Latitude and longitude are in decimal degrees, north and east positive.
    fn declination(&mut self, latitude: f64, longitude: f64, date: Date) -> Option<f64>;
}

impl<F> DeclinationModel for F
where
    F: FnMut(f64, f64, Date) -> f64,
{
    fn declination(&mut self, latitude: f64, longitude: f64, date: Date) -> Option<f64> {
        Some(self(latitude, longitude, date))
    }
}

/// A model without any data. The declination in the navigation state is left
/// as it is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoDeclination;

impl DeclinationModel for NoDeclination {
    fn declination(&mut self, _: f64, _: f64, _: Date) -> Option<f64> {
        None
    }
}

/// The same declination everywhere, for receivers that never leave a small
/// area.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FixedDeclination(pub f64);

impl DeclinationModel for FixedDeclination {
    fn declination(&mut self, _: f64, _: f64, _: Date) -> Option<f64> {
        Some(self.0)
    }
}
