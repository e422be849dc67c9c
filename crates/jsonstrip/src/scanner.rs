//! Scanner: drives the transition table over UTF-8 input.
//!
//! The scanner owns everything that outlives a single code point: the active
//! [`ScanState`], the one-slot [`Lookahead`] for a deferred `/`, the output
//! buffer, and the position counters used in error reports.
//!
//! Input may arrive in several pieces. A code point split across two pieces
//! is kept in a small carry (at most three bytes, the longest incomplete UTF-8
//! prefix) and finished by the next piece, so chunked and one-shot scans agree
//! byte for byte, errors included.
//!
//! Invariants
//! - The lookahead is occupied exactly while the state is
//!   [`ScanState::TestComment`]. A transition that contradicts this is
//!   reported as [`ErrorSource::Internal`] instead of silently mis-scanning.
//! - Every emitted code point was consumed from the input first, so the output
//!   never outgrows the input.

use alloc::vec::Vec;

use crate::{
    StripOptions,
    error::{ErrorSource, StripError},
    lookahead::Lookahead,
    state::{Emission, ScanState},
};

const MAX_UTF8_LEN: usize = 4;

#[derive(Debug, Clone)]
pub(crate) struct Scanner {
    state: ScanState,
    lookahead: Lookahead,
    out: Vec<u8>,

    carry: [u8; MAX_UTF8_LEN],
    carry_len: usize,

    /// Byte offset of the next code point to decode (the carry start while the
    /// carry is non-empty).
    index: usize,
    line: usize,
    column: usize,

    #[cfg(any(test, feature = "fuzzing"))]
    panic_on_error: bool,
}

impl Scanner {
    #[cfg_attr(not(any(test, feature = "fuzzing")), allow(unused_variables))]
    pub(crate) fn new(options: StripOptions, capacity: usize) -> Self {
        Self {
            state: ScanState::Normal,
            lookahead: Lookahead::default(),
            out: Vec::with_capacity(capacity),
            carry: [0; MAX_UTF8_LEN],
            carry_len: 0,
            index: 0,
            line: 1,
            column: 1,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: options.panic_on_error,
        }
    }

    pub(crate) fn state(&self) -> ScanState {
        self.state
    }

    /// `(byte index, line, column)` of the next undecoded code point.
    pub(crate) fn position(&self) -> (usize, usize, usize) {
        (self.index, self.line, self.column)
    }

    pub(crate) fn output(&self) -> &[u8] {
        &self.out
    }

    pub(crate) fn clear_output(&mut self) {
        self.out.clear();
    }

    pub(crate) fn into_output(self) -> Vec<u8> {
        self.out
    }

    /// Scans `chunk`, appending whatever it produces to the output.
    pub(crate) fn feed(&mut self, chunk: &[u8]) -> Result<(), StripError> {
        let mut chunk = chunk;
        if self.carry_len > 0 {
            chunk = self.complete_carry(chunk)?;
        }

        let mut pos = 0;
        while pos < chunk.len() {
            let rest = &chunk[pos..];
            match bstr::decode_utf8(rest) {
                (Some(ch), len) => {
                    self.scan_char(ch, len)?;
                    pos += len;
                }
                // The start of a code point that continues in the next chunk.
                (None, len) if len == rest.len() && is_truncated(rest) => {
                    self.carry[..len].copy_from_slice(rest);
                    self.carry_len = len;
                    break;
                }
                (None, _) => return Err(self.error(ErrorSource::Encoding(rest[0]))),
            }
        }
        Ok(())
    }

    /// Ends the scan. Returns the state the input ended in; a pending `/` is
    /// dropped and an unterminated string or comment is not an error.
    pub(crate) fn finish(&mut self) -> Result<ScanState, StripError> {
        if self.carry_len > 0 {
            return Err(self.error(ErrorSource::Encoding(self.carry[0])));
        }
        if self.state != ScanState::Normal {
            tracing::debug!(
                state = ?self.state,
                index = self.index,
                "input ended before the scanner returned to normal state"
            );
        }
        self.lookahead.take();
        Ok(self.state)
    }

    /// Copies the output over the front of `storage` and pads the remainder
    /// with spaces. Returns the number of stripped bytes written.
    pub(crate) fn write_back(&self, storage: &mut [u8]) -> Result<usize, StripError> {
        self.check_fits(storage.len())?;
        let len = self.out.len();
        let (head, tail) = storage.split_at_mut(len);
        head.copy_from_slice(&self.out);
        tail.fill(b' ');
        Ok(len)
    }

    pub(crate) fn check_fits(&self, storage_len: usize) -> Result<(), StripError> {
        if self.out.len() > storage_len {
            return Err(self.internal("stripped output is longer than its input"));
        }
        Ok(())
    }

    /// The output as text. Only whole code points are ever emitted, so this
    /// fails only if that no longer holds.
    pub(crate) fn output_str(&self) -> Result<&str, StripError> {
        core::str::from_utf8(&self.out)
            .map_err(|_| self.internal("stripped output is not valid UTF-8"))
    }

    fn complete_carry<'c>(&mut self, chunk: &'c [u8]) -> Result<&'c [u8], StripError> {
        let have = self.carry_len;
        let take = chunk.len().min(MAX_UTF8_LEN - have);
        let mut buf = self.carry;
        buf[have..have + take].copy_from_slice(&chunk[..take]);
        let window = &buf[..have + take];

        match bstr::decode_utf8(window) {
            (Some(ch), len) => {
                self.carry_len = 0;
                self.scan_char(ch, len)?;
                Ok(&chunk[len - have..])
            }
            (None, len) if len == window.len() && is_truncated(window) => {
                self.carry = buf;
                self.carry_len = len;
                Ok(&chunk[take..])
            }
            (None, _) => Err(self.error(ErrorSource::Encoding(window[0]))),
        }
    }

    fn scan_char(&mut self, ch: char, len: usize) -> Result<(), StripError> {
        let (next, emission) = self.state.step(ch);
        match emission {
            Emission::Nothing => {}
            Emission::Char(c) => self.push_char(c),
            Emission::Defer(c) => {
                if !self.lookahead.hold(c) {
                    return Err(self.internal("deferred a code point while another is pending"));
                }
            }
            Emission::Release(c) => {
                let Some(pending) = self.lookahead.take() else {
                    return Err(self.internal("released a deferred code point but none is pending"));
                };
                self.push_char(pending);
                self.push_char(c);
            }
            Emission::Discard => {
                if self.lookahead.take().is_none() {
                    return Err(self.internal("discarded a deferred code point but none is pending"));
                }
            }
        }

        if next.in_comment() != self.state.in_comment() {
            tracing::trace!(index = self.index, entering = next.in_comment(), "comment boundary");
        }
        self.state = next;
        self.advance(ch, len);
        Ok(())
    }

    fn push_char(&mut self, ch: char) {
        let mut tmp = [0u8; MAX_UTF8_LEN];
        self.out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
    }

    fn advance(&mut self, ch: char, len: usize) {
        self.index += len;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn internal(&self, reason: &'static str) -> StripError {
        self.error(ErrorSource::Internal {
            state: self.state,
            reason,
        })
    }

    #[cold]
    fn error(&self, source: ErrorSource) -> StripError {
        let err = StripError {
            source,
            index: self.index,
            line: self.line,
            column: self.column,
        };
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.panic_on_error, "{err}");
        err
    }
}

/// Whether `bytes` is a UTF-8 prefix that only lacks its trailing bytes, as
/// opposed to a byte that can never begin a code point.
fn is_truncated(bytes: &[u8]) -> bool {
    core::str::from_utf8(bytes).is_err_and(|e| e.valid_up_to() == 0 && e.error_len().is_none())
}
