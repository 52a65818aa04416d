/// Tracks whether a value was modified since a consumer last looked at it.
///
/// Producers call [`Change::mark`] whenever they modify the tracked value. A single consumer (for
/// example the renderer uploading a matrix to the GPU) calls [`Change::take`], which reports a
/// pending change exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Change {
    /// Nothing changed since the last [`Change::take`].
    #[default]
    Clean,
    /// The value was modified and nobody has observed the modification yet.
    Dirty,
}

impl Change {
    pub fn mark(&mut self) {
        *self = Change::Dirty;
    }

    /// Returns whether there was a pending change, and resets to [`Change::Clean`].
    pub fn take(&mut self) -> bool {
        std::mem::take(self) == Change::Dirty
    }

    pub fn is_dirty(&self) -> bool {
        *self == Change::Dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_reports_once() {
        let mut change = Change::default();
        assert!(!change.take());

        change.mark();
        change.mark();
        assert!(change.is_dirty());
        assert!(change.take());
        assert!(!change.take());
        assert_eq!(change, Change::Clean);
    }
}
