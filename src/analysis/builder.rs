//! A string builder whose most recent writes can be taken back.

/// A string builder that stages writes before committing them.
///
/// [`write`](Self::write) appends to a pending buffer; [`reverse`](Self::reverse)
/// and [`clear`](Self::clear) discard pending writes; [`flush`](Self::flush)
/// commits them. Committed text can no longer be discarded.
///
/// ```
/// use thesaurize::analysis::builder::ReversibleStringBuilder;
///
/// let mut builder = ReversibleStringBuilder::new();
/// builder.write("hello ");
/// builder.flush();
/// builder.write("cruel ");
/// builder.write("world");
/// builder.reverse(2);
///
/// assert_eq!(builder.finish(), "hello ");
/// ```
#[derive(Debug, Default, Clone)]
pub struct ReversibleStringBuilder {
    committed: String,
    pending: Vec<String>,
    pending_len: usize,
}

impl ReversibleStringBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with room for `capacity` committed bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        ReversibleStringBuilder {
            committed: String::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// Stage `s` without committing it. Returns the total length afterwards.
    pub fn write<S: Into<String>>(&mut self, s: S) -> usize {
        let s = s.into();
        self.pending_len += s.len();
        self.pending.push(s);
        self.len()
    }

    /// Length of committed plus pending text, in bytes.
    pub fn len(&self) -> usize {
        self.committed.len() + self.pending_len
    }

    /// Whether nothing has been written or staged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the pending text, in bytes.
    pub fn pending_len(&self) -> usize {
        self.pending_len
    }

    /// Number of staged writes since the last flush.
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Discard the last `n` staged writes. Asking for more than are pending
    /// discards all of them.
    pub fn reverse(&mut self, n: usize) {
        let keep = self.pending.len().saturating_sub(n);
        for discarded in self.pending.drain(keep..) {
            self.pending_len -= discarded.len();
        }
    }

    /// Discard every staged write.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.pending_len = 0;
    }

    /// Commit every staged write.
    pub fn flush(&mut self) {
        for s in self.pending.drain(..) {
            self.committed.push_str(&s);
        }
        self.pending_len = 0;
    }

    /// Flush and return the built string.
    pub fn finish(mut self) -> String {
        self.flush();
        self.committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let mut builder = ReversibleStringBuilder::new();
        builder.write("hello ");
        builder.write("world");

        assert_eq!(builder.len(), 11);
        assert_eq!(builder.finish(), "hello world");
    }

    #[test]
    fn test_reverse() {
        let mut builder = ReversibleStringBuilder::new();
        for s in ["hello ", "world. ", "how ", "are ", "you?"] {
            builder.write(s);
        }

        builder.reverse(3);

        assert_eq!(builder.len(), 13);
        assert_eq!(builder.pending_writes(), 2);
        assert_eq!(builder.finish(), "hello world. ");
    }

    #[test]
    fn test_clear() {
        let mut builder = ReversibleStringBuilder::new();
        builder.write("hello ");
        builder.write("world");

        builder.clear();

        assert!(builder.is_empty());
        assert_eq!(builder.finish(), "");
    }

    #[test]
    fn test_flushed_text_survives_reverse() {
        let mut builder = ReversibleStringBuilder::new();
        builder.write("hello ");
        builder.write("world ");
        builder.flush();

        builder.write("more text");
        assert_eq!(builder.len(), 21);
        assert_eq!(builder.pending_len(), 9);

        builder.reverse(10);
        assert_eq!(builder.len(), 12);
        assert_eq!(builder.finish(), "hello world ");
    }
}
