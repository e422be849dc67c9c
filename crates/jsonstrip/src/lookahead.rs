/// A single held-back code point.
///
/// `None`  ➜  nothing is pending
/// `Some`  ➜  a `/` was seen outside a string and we do not know yet whether
/// it opens a comment
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub(crate) struct Lookahead(Option<char>);

impl Lookahead {
    /// Holds `ch`. Returns `false` (and keeps the old value) when a code point
    /// is already pending.
    pub(crate) fn hold(&mut self, ch: char) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(ch);
        true
    }

    /// Removes and returns the pending code point.
    pub(crate) fn take(&mut self) -> Option<char> {
        self.0.take()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}
