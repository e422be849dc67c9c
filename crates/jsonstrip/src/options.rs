/// Where the stripped payload ends up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputMode {
    /// Return a freshly allocated buffer and leave the input untouched.
    #[default]
    Copy,
    /// Overwrite the front of the input storage and pad the rest with
    /// spaces.
    InPlace,
}

impl From<bool> for OutputMode {
    /// `true` selects [`OutputMode::InPlace`].
    fn from(in_place: bool) -> Self {
        if in_place { Self::InPlace } else { Self::Copy }
    }
}

/// Configuration options for comment stripping.
///
/// # Examples
///
/// ```rust
/// use jsonstrip::{OutputMode, StripOptions, Stripped, strip_json_comments};
///
/// let mut payload = br#"{"a": 1} // note"#.to_vec();
/// let options = StripOptions {
///     mode: OutputMode::InPlace,
///     ..Default::default()
/// };
/// let result = strip_json_comments(&mut payload, options).unwrap();
/// assert_eq!(result, Stripped::InPlace { len: 9 });
/// assert_eq!(payload, b"{\"a\": 1}        ");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StripOptions {
    /// Whether to return a new buffer or rewrite the input.
    ///
    /// # Default
    ///
    /// [`OutputMode::Copy`]
    pub mode: OutputMode,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on errors instead of returning them.
    ///
    /// Enabled only in test and fuzzing builds to produce backtraces.
    pub panic_on_error: bool,
}

impl From<OutputMode> for StripOptions {
    fn from(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

impl From<bool> for StripOptions {
    fn from(in_place: bool) -> Self {
        OutputMode::from(in_place).into()
    }
}
