/// Precomputed newline offsets so byte-offset → (line, column) lookups are a
/// binary search instead of a linear rescan per token (as a naive
/// `source[..offset].lines().count()` approach would be).
pub struct LineIndex {
    /// Byte offset of each `\n` in the source.
    newline_offsets: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let newline_offsets = source
            .bytes()
            .enumerate()
            .filter_map(|(i, b)| (b == b'\n').then_some(i))
            .collect();
        Self { newline_offsets }
    }

    /// 1-based (line, column) for a byte offset into the indexed source.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.newline_offsets.partition_point(|&nl| nl < offset);
        let line_start = if line == 0 { 0 } else { self.newline_offsets[line - 1] + 1 };
        (line + 1, offset - line_start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_first_column() {
        let idx = LineIndex::new("abc\ndef");
        assert_eq!(idx.line_col(0), (1, 1));
    }

    #[test]
    fn after_newline_advances_line() {
        let idx = LineIndex::new("abc\ndef");
        assert_eq!(idx.line_col(4), (2, 1));
        assert_eq!(idx.line_col(6), (2, 3));
    }

    #[test]
    fn multiple_newlines() {
        let idx = LineIndex::new("a\nb\nc\nd");
        assert_eq!(idx.line_col(6), (4, 1));
    }
}
