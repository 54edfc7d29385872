use super::records::{GgaData, RmcData};
use super::{checksum, gga, rmc, Error, NmeaBuf};

// "$xxxxx\r\n" is the shortest frame worth looking at.
const MIN_SENTENCE_LEN: usize = 8;

/// Incremental NMEA-0183 sentence decoder.
///
/// Feed it one byte at a time with [`encode`](Self::encode), straight
/// from a UART interrupt handler or a serial read loop.
/// The parser frames `$...\r\n` sentences in a fixed 82-byte buffer,
/// verifies the checksum, decodes GxRMC/GxGGA payloads and hands each
/// freshly decoded record to the matching callback by value. The last
/// record of either kind stays readable through
/// [`rmc`](Self::rmc)/[`gga`](Self::gga).
///
/// Not reentrant: a callback must not feed bytes back into the parser
/// that invoked it.
pub struct NmeaParser<R, G>
where
    R: FnMut(RmcData),
    G: FnMut(GgaData),
{
    buf: NmeaBuf,
    rmc: RmcData,
    gga: GgaData,
    error: Option<Error>,
    on_rmc: R,
    on_gga: G,
}

impl NmeaParser<fn(RmcData), fn(GgaData)> {
    /// Parser without update callbacks, for accessor-only use.
    pub fn new() -> Self {
        Self::with_callbacks(|_| {}, |_| {})
    }
}

impl Default for NmeaParser<fn(RmcData), fn(GgaData)> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, G> NmeaParser<R, G>
where
    R: FnMut(RmcData),
    G: FnMut(GgaData),
{
    pub fn with_callbacks(on_rmc: R, on_gga: G) -> Self {
        Self {
            buf: NmeaBuf::default(),
            rmc: RmcData::INVALID,
            gga: GgaData::INVALID,
            error: None,
            on_rmc,
            on_gga,
        }
    }

    /// Consumes one byte of the input stream.
    pub fn encode(&mut self, c: u8) {
        // '$' opens a sentence; whatever was buffered is a fragment we
        // started reading mid-stream, or line noise. Starting over here
        // is also what resynchronizes after corruption.
        if c == b'$' {
            self.buf.clear();
        }

        // A full buffer drops bytes rather than erroring: an over-long
        // "sentence" can only be garbage.
        let _ = self.buf.try_push(c);

        if !self.is_complete() {
            if self.buf.len() == self.buf.capacity() {
                self.buf.clear();
            }
            return;
        }

        if !checksum::is_checksum_ok(&self.buf) {
            self.error = Some(Error::Checksum);
            self.buf.clear();
            return;
        }

        self.dispatch();
        self.buf.clear();
    }

    /// Feeds a whole slice through [`encode`](Self::encode).
    pub fn encode_bytes(&mut self, bytes: &[u8]) {
        for &c in bytes {
            self.encode(c);
        }
    }

    /// Last decoded RMC record ([`RmcData::INVALID`] until one arrives).
    pub fn rmc(&self) -> &RmcData {
        &self.rmc
    }

    /// Last decoded GGA record ([`GgaData::INVALID`] until one arrives).
    pub fn gga(&self) -> &GgaData {
        &self.gga
    }

    /// Last decode error. Sticky: stays set across later successful
    /// decodes until [`clear_error`](Self::clear_error).
    pub fn error(&self) -> Option<Error> {
        self.error
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn is_complete(&self) -> bool {
        self.buf.len() >= MIN_SENTENCE_LEN
            && self.buf[0] == b'$'
            && self.buf.ends_with(b"\r\n")
    }

    // Decodes each sentence type against a scratch copy of its record,
    // so a failed decode never leaves a half-written record behind. A
    // sentence of neither type is not an error, just somebody else's
    // traffic.
    fn dispatch(&mut self) {
        let sentence: &[u8] = &self.buf;

        if rmc::is_gx_rmc(sentence) {
            let mut data = self.rmc;
            match rmc::parse(sentence, &mut data) {
                Ok(()) => {
                    self.rmc = data;
                    (self.on_rmc)(data);
                }
                Err(e) => self.error = Some(e),
            }
        } else if gga::is_gx_gga(sentence) {
            let mut data = self.gga;
            gga::parse(sentence, &mut data);
            self.gga = data;
            (self.on_gga)(data);
        }
    }
}
