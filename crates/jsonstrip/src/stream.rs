use crate::{ScanState, StripError, StripOptions, scanner::Scanner};

/// Strips comments from input that arrives in chunks.
///
/// Chunks may split a UTF-8 code point, a comment marker, or an escape
/// sequence anywhere; the concatenated output equals what [`strip`](crate::strip)
/// returns for the concatenated input.
///
/// Errors are sticky: once a chunk fails, every later call returns the same
/// error.
///
/// ```rust
/// use jsonstrip::{ScanState, StreamingStripper};
///
/// let mut stripper = StreamingStripper::default();
/// let mut out = Vec::new();
/// let chunks: [&[u8]; 3] = [b"{\"a\": 1 /", b"* note */}", b" // bye"];
/// for chunk in chunks {
///     out.extend_from_slice(stripper.feed(chunk).unwrap());
/// }
/// assert_eq!(stripper.finish(), Ok(ScanState::LineComment));
/// assert_eq!(out, b"{\"a\": 1 } ");
/// ```
#[derive(Debug, Clone)]
pub struct StreamingStripper {
    scanner: Scanner,
    failed: Option<StripError>,
}

impl Default for StreamingStripper {
    fn default() -> Self {
        Self::new(StripOptions::default())
    }
}

impl StreamingStripper {
    /// Creates a stripper. [`StripOptions::mode`] is ignored: output is
    /// always handed back per chunk.
    #[must_use]
    pub fn new(options: StripOptions) -> Self {
        Self {
            scanner: Scanner::new(options, 0),
            failed: None,
        }
    }

    /// Scans one chunk and returns the stripped bytes it produced.
    ///
    /// The returned slice borrows an internal buffer that is reused by the
    /// next call. It may be shorter than the chunk by more than the comments
    /// it contained: a trailing `/` or a partial code point is held until the
    /// next chunk decides it.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<&[u8], StripError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        self.scanner.clear_output();
        if let Err(err) = self.scanner.feed(chunk) {
            self.failed = Some(err.clone());
            return Err(err);
        }
        Ok(self.scanner.output())
    }

    /// Ends the input and returns the state it ended in.
    ///
    /// Anything other than [`ScanState::Normal`] means the input stopped inside
    /// a string or comment (or right after a lone `/`, which is dropped). That
    /// is not an error; callers that care can check the returned state.
    pub fn finish(mut self) -> Result<ScanState, StripError> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        self.scanner.finish()
    }

    /// The current scanner state.
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.scanner.state()
    }

    /// `(byte index, line, column)` of the next code point to be decoded.
    #[must_use]
    pub fn position(&self) -> (usize, usize, usize) {
        self.scanner.position()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn output_is_per_chunk() {
        let mut s = StreamingStripper::default();
        assert_eq!(s.feed(b"[1,").unwrap(), b"[1,");
        assert_eq!(s.feed(b"2/").unwrap(), b"2");
        assert_eq!(s.state(), ScanState::TestComment);
        assert_eq!(s.feed(b"/x\n]").unwrap(), b"\n]");
        assert_eq!(s.position(), (9, 2, 2));
        assert_eq!(s.finish(), Ok(ScanState::Normal));
    }

    #[test]
    fn slash_released_in_next_chunk() {
        let mut s = StreamingStripper::default();
        assert_eq!(s.feed(b"4/").unwrap(), b"4");
        assert_eq!(s.feed(b"2").unwrap(), b"/2");
    }

    #[test]
    fn errors_are_sticky() {
        let mut s = StreamingStripper::default();
        let mut out = Vec::new();
        out.extend_from_slice(s.feed(b"[\"a\"").unwrap());
        let err = s.feed(b", \xC3\x28]").unwrap_err();
        assert_eq!(err.index, 6);
        assert_eq!(err.offending_byte(), Some(0xC3));
        assert_eq!(s.feed(b"]").unwrap_err(), err);
        assert_eq!(s.finish().unwrap_err(), err);
        assert_eq!(out, b"[\"a\"");
    }

    #[test]
    fn stray_byte_ending_a_chunk_fails_that_chunk() {
        let mut s = StreamingStripper::default();
        let err = s.feed(b"[1,\x80").unwrap_err();
        assert_eq!(err.index, 3);
        assert_eq!(err.offending_byte(), Some(0x80));

        let mut s = StreamingStripper::default();
        let err = s.feed(b"{\"a\":\xFF").unwrap_err();
        assert_eq!(err.index, 5);
        assert_eq!(err.offending_byte(), Some(0xFF));
        assert_eq!(s.finish().unwrap_err(), err);
    }
}
