//! # Field Splitting
//!
//! A validated sentence is split on `,` into an ordered list of fields. Empty
//! fields between consecutive commas are preserved, and the `*CC` checksum
//! trailer stays attached to the last field.

use log::debug;

use crate::FieldParse;

/// The fields of one sentence, borrowed from the sentence text.
///
/// Field `0` is the identifier, `$` included. Every accessor is bounds-checked
/// so that sentences with fewer fields than a decoder expects read as absent
/// fields instead of panicking.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::Fields;
///
/// let fields = Fields::split("$GNRMC,123519,A,,,,,,,230394,,,A*62");
/// assert_eq!(fields.identifier(), "$GNRMC");
/// assert_eq!(fields.get(3), Some(""));
/// assert_eq!(fields.get(12), Some("A*62"));
/// assert_eq!(fields.value(12), Some("A"));
/// assert_eq!(fields.get(13), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    /// Splits `sentence` on every `,`.
    pub fn split(sentence: &'a str) -> Self {
        Self {
            fields: sentence.split(',').collect(),
        }
    }

    /// Returns the number of fields, the identifier included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if there are no fields.
    ///
    /// Splitting always yields at least one (possibly empty) field, so this
    /// only holds for a default-constructed value.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the identifier field, e.g. `$GNGGA`.
    pub fn identifier(&self) -> &'a str {
        self.fields.first().copied().unwrap_or_default()
    }

    /// Returns the raw field at `index`, checksum trailer included.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Returns the field at `index` with any `*CC` checksum suffix removed.
    pub fn value(&self, index: usize) -> Option<&'a str> {
        self.get(index)
            .map(|field| field.rsplit_once('*').map_or(field, |(value, _)| value))
    }

    /// Returns the field at `index` if it is present and not empty.
    pub fn non_empty(&self, index: usize) -> Option<&'a str> {
        self.value(index).filter(|field| !field.is_empty())
    }

    /// Parses the field at `index`.
    ///
    /// Returns [`None`] when the field is missing, empty or malformed. A
    /// malformed field is logged; decoders keep the previous value for it.
    pub fn parse<T: FieldParse>(&self, index: usize) -> Option<T> {
        let field = self.non_empty(index)?;
        let value = T::parse_field(field);
        if value.is_none() {
            debug!(
                "{}: field {index} ({field:?}) is malformed, keeping the previous value",
                self.identifier()
            );
        }
        value
    }

    /// Returns an iterator over the raw fields.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.fields.iter().copied()
    }
}

impl Default for Fields<'_> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}
