//! Quote-aware removal of `//` and `/* */` comments from JSON text.
//!
//! The payload is scanned once, one UTF-8 code point at a time, by a small
//! state machine ([`ScanState`]). Comment markers inside string literals are
//! left alone, escape sequences are copied through verbatim, and the newline
//! that ends a `//` comment is kept. Newlines inside `/* */` comments are
//! removed with the rest of the comment.
//!
//! Nothing else about the JSON is checked. Unterminated strings or comments at
//! the end of input are not errors: the scan simply stops. The only failures
//! are invalid UTF-8 and an internal consistency check.
//!
//! ```rust
//! let src = br#"{
//!     "url": "http://example.com", // homepage
//!     /* retries */ "n": 3
//! }"#;
//! let out = jsonstrip::strip(src).unwrap();
//! assert_eq!(
//!     out,
//!     b"{\n    \"url\": \"http://example.com\", \n     \"n\": 3\n}"
//! );
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod lookahead;
mod options;
mod scanner;
mod state;
mod stream;


use alloc::{string::String, vec::Vec};

pub use error::{ErrorSource, StripError};
pub use options::{OutputMode, StripOptions};
pub use state::{Emission, ScanState};
pub use stream::StreamingStripper;

use crate::scanner::Scanner;

/// The outcome of [`strip_json_comments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stripped {
    /// [`OutputMode::Copy`]: the stripped payload. The input is unchanged.
    Copied(Vec<u8>),
    /// [`OutputMode::InPlace`]: the input now starts with `len` stripped bytes
    /// and the rest of it is spaces.
    InPlace {
        /// Length of the stripped payload.
        len: usize,
    },
}

/// Strips comments from `input`, either into a new buffer or over `input`
/// itself, depending on the output mode.
///
/// `options` accepts a [`StripOptions`], an [`OutputMode`], or a `bool`
/// (`true` meaning in place).
///
/// On error nothing is written to `input`, in either mode.
pub fn strip_json_comments(
    input: &mut [u8],
    options: impl Into<StripOptions>,
) -> Result<Stripped, StripError> {
    let options = options.into();
    let scanner = scan(input, options)?;
    match options.mode {
        OutputMode::Copy => Ok(Stripped::Copied(scanner.into_output())),
        OutputMode::InPlace => scanner
            .write_back(input)
            .map(|len| Stripped::InPlace { len }),
    }
}

/// Strips comments into a new buffer.
///
/// ```rust
/// assert_eq!(
///     jsonstrip::strip(br#"/* c1 */{"a":1}/* c2 */"#).unwrap(),
///     br#"{"a":1}"#
/// );
/// ```
pub fn strip(input: &[u8]) -> Result<Vec<u8>, StripError> {
    scan(input, StripOptions::default()).map(Scanner::into_output)
}

/// Strips comments over `input` and pads the freed tail with spaces.
///
/// Returns the length of the stripped payload; `input.len()` is unchanged.
pub fn strip_in_place(input: &mut [u8]) -> Result<usize, StripError> {
    let scanner = scan(input, OutputMode::InPlace.into())?;
    scanner.write_back(input)
}

/// Strips comments from a `String` in place, keeping its length.
///
/// Only whole code points and spaces are written, so the result is always
/// valid UTF-8.
pub fn strip_str_in_place(text: &mut String) -> Result<(), StripError> {
    let scanner = scan(text.as_bytes(), OutputMode::InPlace.into())?;
    let len = text.len();
    scanner.check_fits(len)?;
    let stripped = scanner.output_str()?;
    text.clear();
    text.push_str(stripped);
    text.extend(core::iter::repeat_n(' ', len - stripped.len()));
    Ok(())
}

fn scan(input: &[u8], options: StripOptions) -> Result<Scanner, StripError> {
    tracing::debug!(len = input.len(), mode = ?options.mode, "stripping JSON comments");
    let mut scanner = Scanner::new(options, input.len());
    scanner.feed(input)?;
    scanner.finish()?;
    tracing::debug!(
        input_len = input.len(),
        output_len = scanner.output().len(),
        "stripped JSON comments"
    );
    Ok(scanner)
}
