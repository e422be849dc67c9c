//! The comment scanner's state set and its transition table.
//!
//! [`ScanState::step`] is a pure function of the current state and one decoded
//! code point. It never touches the output: it only reports an [`Emission`]
//! that the scanner applies. Every `(state, char)` pair is covered by the
//! `match`, so adding a state without deciding its transitions fails to
//! compile.

/// Where the scanner is relative to strings and comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScanState {
    /// Outside any string, comment, or pending comment marker.
    #[default]
    Normal,
    /// Inside a string literal.
    InQuote,
    /// The previous code point inside a string was `\`.
    Escape,
    /// Saw a single `/` outside a string; the next code point decides whether
    /// it opens a comment.
    TestComment,
    /// Inside a `//` comment, up to the next newline.
    LineComment,
    /// Inside a `/* */` comment.
    BlockComment,
    /// Saw `*` inside a block comment; a `/` now closes it.
    TestEndBlockComment,
}

/// What a single transition writes to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Nothing is written.
    Nothing,
    /// The code point is written as is.
    Char(char),
    /// The code point is held back until the next transition decides its
    /// fate.
    Defer(char),
    /// The held code point is written, followed by this one.
    Release(char),
    /// The held code point is dropped.
    Discard,
}

impl ScanState {
    /// Computes the next state and the emission for code point `ch`.
    #[must_use]
    pub const fn step(self, ch: char) -> (Self, Emission) {
        use Emission::{Char, Defer, Discard, Nothing, Release};
        use ScanState::{
            BlockComment, Escape, InQuote, LineComment, Normal, TestComment, TestEndBlockComment,
        };

        match (self, ch) {
            (Normal, '/') => (TestComment, Defer(ch)),
            (Normal, '"') => (InQuote, Char(ch)),
            (Normal, _) => (Normal, Char(ch)),

            (InQuote, '\\') => (Escape, Char(ch)),
            (InQuote, '"') => (Normal, Char(ch)),
            (InQuote, _) => (InQuote, Char(ch)),

            // Escape payloads are copied verbatim, never decoded.
            (Escape, _) => (InQuote, Char(ch)),

            (TestComment, '/') => (LineComment, Discard),
            (TestComment, '*') => (BlockComment, Discard),
            (TestComment, '"') => (InQuote, Release(ch)),
            (TestComment, _) => (Normal, Release(ch)),

            (LineComment, '\n') => (Normal, Char(ch)),
            (LineComment, _) => (LineComment, Nothing),

            (BlockComment, '*') => (TestEndBlockComment, Nothing),
            (BlockComment, _) => (BlockComment, Nothing),

            (TestEndBlockComment, '/') => (Normal, Nothing),
            (TestEndBlockComment, '*') => (TestEndBlockComment, Nothing),
            (TestEndBlockComment, _) => (BlockComment, Nothing),
        }
    }

    /// Whether the scanner is inside a `//` or `/* */` comment.
    #[must_use]
    pub const fn in_comment(self) -> bool {
        matches!(
            self,
            Self::LineComment | Self::BlockComment | Self::TestEndBlockComment
        )
    }

    /// Whether the scanner is inside a string literal.
    #[must_use]
    pub const fn in_string(self) -> bool {
        matches!(self, Self::InQuote | Self::Escape)
    }
}

#[cfg(test)]
#[allow(clippy::enum_glob_use)]
mod tests {
    use rstest::rstest;

    use super::{Emission::*, ScanState::*, *};

    #[rstest]
    #[case::slash_defers(Normal, '/', TestComment, Defer('/'))]
    #[case::quote_opens_string(Normal, '"', InQuote, Char('"'))]
    #[case::plain(Normal, 'x', Normal, Char('x'))]
    #[case::star_outside_comment(Normal, '*', Normal, Char('*'))]
    #[case::backslash_escapes(InQuote, '\\', Escape, Char('\\'))]
    #[case::quote_closes_string(InQuote, '"', Normal, Char('"'))]
    #[case::slash_in_string(InQuote, '/', InQuote, Char('/'))]
    #[case::escaped_quote(Escape, '"', InQuote, Char('"'))]
    #[case::escaped_backslash(Escape, '\\', InQuote, Char('\\'))]
    #[case::escaped_slash(Escape, '/', InQuote, Char('/'))]
    #[case::line_comment_opens(TestComment, '/', LineComment, Discard)]
    #[case::block_comment_opens(TestComment, '*', BlockComment, Discard)]
    #[case::slash_before_string(TestComment, '"', InQuote, Release('"'))]
    #[case::lone_slash(TestComment, '1', Normal, Release('1'))]
    #[case::slash_before_newline(TestComment, '\n', Normal, Release('\n'))]
    #[case::newline_ends_line_comment(LineComment, '\n', Normal, Char('\n'))]
    #[case::line_comment_body(LineComment, '"', LineComment, Nothing)]
    #[case::carriage_return_in_line_comment(LineComment, '\r', LineComment, Nothing)]
    #[case::star_in_block(BlockComment, '*', TestEndBlockComment, Nothing)]
    #[case::newline_in_block(BlockComment, '\n', BlockComment, Nothing)]
    #[case::block_closes(TestEndBlockComment, '/', Normal, Nothing)]
    #[case::star_run(TestEndBlockComment, '*', TestEndBlockComment, Nothing)]
    #[case::star_then_other(TestEndBlockComment, 'a', BlockComment, Nothing)]
    fn transition_table(
        #[case] from: ScanState,
        #[case] ch: char,
        #[case] to: ScanState,
        #[case] emission: Emission,
    ) {
        assert_eq!(from.step(ch), (to, emission));
    }

    #[test]
    fn only_normal_defers_and_only_test_comment_resolves() {
        let states = [
            Normal,
            InQuote,
            Escape,
            TestComment,
            LineComment,
            BlockComment,
            TestEndBlockComment,
        ];
        for state in states {
            for ch in ['/', '*', '"', '\\', '\n', 'a', 'é', '😀'] {
                let (_, emission) = state.step(ch);
                match emission {
                    Defer(_) => assert_eq!(state, Normal),
                    Release(_) | Discard => assert_eq!(state, TestComment),
                    Char(c) => assert_eq!(c, ch),
                    Nothing => assert!(state.in_comment()),
                }
            }
        }
    }

    #[test]
    fn classification() {
        assert!(InQuote.in_string());
        assert!(Escape.in_string());
        assert!(!TestComment.in_string());
        assert!(LineComment.in_comment());
        assert!(TestEndBlockComment.in_comment());
        assert!(!TestComment.in_comment());
        assert_eq!(ScanState::default(), Normal);
    }
}
