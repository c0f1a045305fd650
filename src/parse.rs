use nom::{
    IResult, Parser,
    character::complete::anychar,
    combinator::all_consuming,
};

/// Trait for parsing a single NMEA 0183 sentence field.
///
/// A field is the text between two commas. Unlike a sentence-level parser, a
/// field parser either consumes the whole field or fails: `"12x"` is not a
/// `u8`. A failure is reported as [`None`] so that decoders can treat a
/// malformed field exactly like an absent one.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::FieldParse;
///
/// assert_eq!(u8::parse_field("08"), Some(8));
/// assert_eq!(u8::parse_field("8a"), None);
/// assert_eq!(f64::parse_field("545.4"), Some(545.4));
/// assert_eq!(char::parse_field("A"), Some('A'));
/// ```
///
/// # Implementing for Custom Types
///
/// ```rust
/// use nmea0183_navstate::FieldParse;
///
/// struct Knots(f64);
///
/// impl FieldParse for Knots {
///     fn parse_field(field: &str) -> Option<Self> {
///         f64::parse_field(field).filter(|v| *v >= 0.0).map(Knots)
///     }
/// }
///
/// assert!(Knots::parse_field("-1.0").is_none());
/// ```
pub trait FieldParse: Sized {
    /// Parses the complete field, returning [`None`] if it is malformed.
    fn parse_field(field: &str) -> Option<Self>;
}

macro_rules! impl_ints_type {
    ($($t:tt),*) => ($(
        impl FieldParse for $t {
            fn parse_field(field: &str) -> Option<Self> {
                let result: IResult<_, _> =
                    all_consuming(nom::character::complete::$t).parse(field);
                result.ok().map(|(_, value)| value)
            }
        }
    )*)
}

impl_ints_type!(u8, u16, u32, i32, i64);

macro_rules! impl_float_type {
    ($($t:ty, $p:ident),*) => ($(
        impl FieldParse for $t {
            fn parse_field(field: &str) -> Option<Self> {
                let result: IResult<_, _> =
                    all_consuming(nom::number::complete::$p).parse(field);
                result
                    .ok()
                    .map(|(_, value)| value)
                    .filter(|value: &$t| value.is_finite())
            }
        }
    )*)
}

impl_float_type!(f32, float, f64, double);

impl FieldParse for char {
    fn parse_field(field: &str) -> Option<Self> {
        let result: IResult<_, _> = all_consuming(anychar).parse(field);
        result.ok().map(|(_, value)| value)
    }
}
