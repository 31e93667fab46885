/// Byte offset to 1-based line/column conversion for a single source text.
///
/// Columns count characters, so a diagnostic after a multi-byte character
/// still points at the right place in an editor.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(content.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of the first character of a 1-based line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1).and_then(|idx| self.line_starts.get(idx).copied())
    }

    /// Convert a byte offset to a 1-based (line, column) pair
    pub fn line_col(&self, content: &str, offset: usize) -> (usize, usize) {
        let offset = offset.min(content.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let start = self.line_starts[line_idx];
        let column = content
            .get(start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - start);
        (line_idx + 1, column + 1)
    }
}
