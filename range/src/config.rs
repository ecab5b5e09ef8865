#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Whether `!=` becomes the two segments around the value. Some scans gain nothing from a range that
    /// covers almost the whole index, so callers may prefer to leave `!=` to the residual filter.
    pub convert_not_equal: bool,
    /// Upper bound on the segment count of any combined range. AND over IN-lists multiplies segment counts;
    /// a range past this size is abandoned. `None` disables the check.
    pub max_segments: Option<usize>,
}

impl AnalyzerConfig {
    pub const DEFAULT_MAX_SEGMENTS: usize = 256;
    /// IN-lists longer than this multiple of `max_segments` are refused before sorting, duplicates or not.
    pub const LIST_SLACK: usize = 4;

    pub fn new(convert_not_equal: bool, max_segments: Option<usize>) -> Self { Self { convert_not_equal, max_segments } }

    /// No limit on the number of segments
    pub fn unbounded() -> Self { Self::new(true, None) }

    pub fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = Some(max_segments);
        self
    }

    pub fn with_not_equal(mut self, convert_not_equal: bool) -> Self {
        self.convert_not_equal = convert_not_equal;
        self
    }

    pub(crate) fn within_limit(&self, segment_count: usize) -> bool { self.max_segments.map_or(true, |max| segment_count <= max) }

    pub(crate) fn admits_list(&self, length: usize) -> bool {
        self.max_segments.map_or(true, |max| length <= max.saturating_mul(Self::LIST_SLACK))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self { Self::new(true, Some(Self::DEFAULT_MAX_SEGMENTS)) }
}
