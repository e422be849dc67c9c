use thiserror::Error;

use crate::ScanState;

/// Failure to strip comments from a payload.
///
/// `index` is the byte offset into the whole input (across all chunks fed to
/// a [`StreamingStripper`](crate::StreamingStripper)); `line` and `column`
/// are 1-based and count code points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to remove JSON comment: {source} at index {index} ({line}:{column})")]
pub struct StripError {
    pub(crate) source: ErrorSource,
    /// Byte offset of the offending position.
    pub index: usize,
    /// Line of the offending position.
    pub line: usize,
    /// Column of the offending position.
    pub column: usize,
}

/// The kind of failure behind a [`StripError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorSource {
    /// The bytes at the position do not form a UTF-8 scalar value.
    #[error("invalid Unicode encoding byte {0:#04x}")]
    Encoding(u8),
    /// The scanner's state and its pending code point disagree.
    #[error("scanner reached an inconsistent state {state:?}: {reason}")]
    Internal {
        /// State the scanner was in.
        state: ScanState,
        /// What disagreed.
        reason: &'static str,
    },
}

impl StripError {
    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource {
        &self.source
    }

    /// The first byte that failed to decode, for encoding errors.
    #[must_use]
    pub fn offending_byte(&self) -> Option<u8> {
        match self.source {
            ErrorSource::Encoding(byte) => Some(byte),
            ErrorSource::Internal { .. } => None,
        }
    }
}
