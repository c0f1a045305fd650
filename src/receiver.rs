//! # Receiver
//!
//! One polling step: pull bytes until a line completes, then decode it.

use crate::{
    ByteSource, DEFAULT_LINE_CAPACITY, DeclinationModel, Decoder, DecoderConfig, LineAssembler,
    NavigationState, NoDeclination, Outcome, SharedNavigation,
};

/// Couples a [`LineAssembler`] with a [`Decoder`].
///
/// The receiver does not loop on its own: every call to [`Receiver::poll`]
/// reads until one line is complete or the source runs dry, and returns.
/// Retrying, sleeping between polls and giving up on transport failures are
/// up to the caller.
///
/// # Examples
///
/// ```rust
/// use nmea0183_navstate::{IoSource, NavigationState, Outcome, Receiver, DecoderConfig};
///
/// let input = b"$GNRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,,,A*62\r\n";
/// let mut source = IoSource::new(&input[..]);
/// let mut receiver = Receiver::new(DecoderConfig::default());
/// let mut state = NavigationState::new();
///
/// loop {
///     match receiver.poll(&mut source, &mut state) {
///         Ok(outcome) => assert!(outcome.is_applied()),
///         Err(nb::Error::WouldBlock) => break,
///         Err(nb::Error::Other(e)) => panic!("transport failed: {e}"),
///     }
/// }
///
/// assert_eq!(state.speed_over_ground, Some(22.4));
/// ```
#[derive(Debug, Default)]
pub struct Receiver<D = NoDeclination, const N: usize = DEFAULT_LINE_CAPACITY> {
    assembler: LineAssembler<N>,
    decoder: Decoder<D>,
}

impl Receiver {
    pub fn new(config: DecoderConfig) -> Self {
        Self::with_decoder(Decoder::new(config))
    }
}

impl<D: DeclinationModel, const N: usize> Receiver<D, N> {
    pub fn with_decoder(decoder: Decoder<D>) -> Self {
        Self {
            assembler: LineAssembler::new(),
            decoder,
        }
    }

    pub fn decoder(&self) -> &Decoder<D> {
        &self.decoder
    }

    /// Returns the bytes of the line collected so far.
    pub fn pending(&self) -> &[u8] {
        self.assembler.pending()
    }

    /// Reads the next complete line from `source` and decodes it into `state`.
    ///
    /// # Errors
    ///
    /// - [`nb::Error::WouldBlock`] when no complete line is available yet.
    /// - [`nb::Error::Other`] when the source failed.
    pub fn poll<S>(&mut self, source: &mut S, state: &mut NavigationState) -> nb::Result<Outcome, S::Error>
    where
        S: ByteSource + ?Sized,
    {
        let line = self.assembler.next_line(source)?;
        Ok(self.decoder.decode_line(&line, state))
    }

    /// Like [`Receiver::poll`], for a state shared with readers.
    pub fn poll_shared<S>(
        &mut self,
        source: &mut S,
        shared: &SharedNavigation,
    ) -> nb::Result<Outcome, S::Error>
    where
        S: ByteSource + ?Sized,
    {
        let line = self.assembler.next_line(source)?;
        let decoder = &mut self.decoder;

        let mut outcome = Outcome::Ignored;
        shared.update(|state| {
            outcome = decoder.decode_line(&line, state);
            outcome.is_applied()
        });
        Ok(outcome)
    }
}
