/// The separator used when none (or an empty one) is configured.
pub const DEFAULT_SEPARATOR: &str = ".";


/// A key path split into its segments.
///
/// Splitting never produces zero segments: an empty path is a single empty segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyPath<'p> {
    segments: Vec<&'p str>,
}

impl<'p> KeyPath<'p> {
    pub fn parse(path: &'p str, separator: &str) -> Self {
        Self {
            segments: path.split(separator).collect(),
        }
    }

    pub fn segments(&self) -> &[&'p str] {
        &self.segments
    }

    /// Returns the final segment and all segments before it.
    pub fn split_last(&self) -> Option<(&'p str, &[&'p str])> {
        self.segments
            .split_last()
            .map(|(last, parents)| (*last, parents))
    }

    #[inline]
    pub fn last_index(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}


/// Returns `separator`, or [`DEFAULT_SEPARATOR`] if it is empty.
pub(crate) fn normalize_separator(separator: &str) -> String {
    if separator.is_empty() {
        DEFAULT_SEPARATOR.to_string()
    } else {
        separator.to_string()
    }
}
