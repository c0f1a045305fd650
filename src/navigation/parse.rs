//! Conversions from NMEA field text to navigation quantities.

use nom::{
    AsChar, IResult, Parser,
    bytes::complete::take_while_m_n,
    character::complete::{char, digit1},
    combinator::{all_consuming, opt},
    sequence::preceded,
};
use time::{Date, Month, Time};

use crate::FieldParse;

/// Converts an NMEA `DDDMM.mmmm` value to decimal degrees.
///
/// `degrees = floor(value / 100)` and the remainder is the minutes.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::navigation::parse::degrees_minutes;
///
/// assert!((degrees_minutes(4807.038) - 48.1173).abs() < 1e-9);
/// ```
pub fn degrees_minutes(value: f64) -> f64 {
    let degrees = (value / 100.0).floor();
    let minutes = value - degrees * 100.0;
    degrees + minutes / 60.0
}

/// Parses a latitude magnitude and its `N`/`S` hemisphere letter.
///
/// Only `S` negates the value. Magnitudes with minutes outside `0..60` or a
/// result beyond 90 degrees are rejected.
pub fn latitude(magnitude: &str, hemisphere: &str) -> Option<f64> {
    coordinate(magnitude, hemisphere == "S", 90.0)
}

/// Parses a longitude magnitude and its `E`/`W` hemisphere letter.
///
/// Only `W` negates the value. Magnitudes with minutes outside `0..60` or a
/// result beyond 180 degrees are rejected.
pub fn longitude(magnitude: &str, hemisphere: &str) -> Option<f64> {
    coordinate(magnitude, hemisphere == "W", 180.0)
}

fn coordinate(magnitude: &str, negate: bool, limit: f64) -> Option<f64> {
    let value = f64::parse_field(magnitude).filter(|value| *value >= 0.0)?;

    let minutes = value - (value / 100.0).floor() * 100.0;
    if minutes >= 60.0 {
        return None;
    }

    let decimal = degrees_minutes(value);
    if decimal > limit {
        return None;
    }

    Some(if negate { -decimal } else { decimal })
}

/// Parses an NMEA `hhmmss.sss` UTC time of day.
///
/// The integer part is split into hours, minutes and seconds by successive
/// division by 10⁴ and 10²; the fraction is kept to microsecond resolution.
/// A leap second (`ss` = 60) is held at the last microsecond of second 59.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::navigation::parse::utc_time;
/// use time::Time;
///
/// assert_eq!(utc_time("123519.25"), Time::from_hms_micro(12, 35, 19, 250_000).ok());
/// assert_eq!(utc_time("126019"), None);
/// ```
pub fn utc_time(field: &str) -> Option<Time> {
    let result: IResult<_, _> =
        all_consuming((digit1, opt(preceded(char('.'), digit1)))).parse(field);
    let (_, (whole, fraction)) = result.ok()?;

    let whole = u32::parse_field(whole)?;
    let hours = u8::try_from(whole / 10_000).ok()?;
    let minutes = ((whole / 100) % 100) as u8;
    let (seconds, microseconds) = match (whole % 100) as u8 {
        60 => (59, 999_999),
        seconds => (seconds, fraction.map_or(0, fraction_micros)),
    };

    Time::from_hms_micro(hours, minutes, seconds, microseconds).ok()
}

/// Reads up to six fractional digits as microseconds.
fn fraction_micros(digits: &str) -> u32 {
    digits
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(6)
        .fold(0, |micros, digit| micros * 10 + u32::from(digit - b'0'))
}

/// Parses an NMEA `ddmmyy` UTC date.
///
/// Two-digit years from 83 to 99 are read as 1983 to 1999, every other year
/// as 20yy.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::navigation::parse::utc_date;
/// use time::{Date, Month};
///
/// assert_eq!(utc_date("230394"), Date::from_calendar_date(1994, Month::March, 23).ok());
/// assert_eq!(utc_date("091224"), Date::from_calendar_date(2024, Month::December, 9).ok());
/// assert_eq!(utc_date("320394"), None);
/// ```
pub fn utc_date(field: &str) -> Option<Date> {
    let result: IResult<_, _> =
        all_consuming((two_digits, two_digits, two_digits)).parse(field);
    let (_, (day, month, year)) = result.ok()?;

    let month = Month::try_from(month).ok()?;
    let year = match year {
        83..=99 => 1900 + i32::from(year),
        _ => 2000 + i32::from(year),
    };

    Date::from_calendar_date(year, month, day).ok()
}

fn two_digits(i: &str) -> IResult<&str, u8> {
    take_while_m_n(2, 2, AsChar::is_dec_digit)
        .map(|digits: &str| {
            digits
                .bytes()
                .fold(0, |value, digit| value * 10 + (digit - b'0'))
        })
        .parse(i)
}
