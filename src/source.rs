//! Source files handed to the extractor and locations inside them.

use std::fmt;

/// A scanned source file: path relative to its root plus the raw bytes.
///
/// Content is kept as bytes so that invalid UTF-8 can be reported per call
/// site instead of rejecting the whole file up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub content: Vec<u8>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Build a line index for offset lookups in this file.
    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.content)
    }

    /// Resolve a byte offset into a location with the surrounding source line.
    pub fn location_at(&self, index: &LineIndex, offset: usize) -> SourceLocation {
        let line = index.line_of(offset);
        let line_start = index.line_start(line);
        let line_end = self.content[line_start..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|p| line_start + p)
            .unwrap_or(self.content.len());

        let line_bytes = &self.content[line_start..line_end];
        let source_line = String::from_utf8_lossy(line_bytes)
            .trim_end_matches('\r')
            .to_string();
        let prefix = String::from_utf8_lossy(&self.content[line_start..offset.min(line_end)]);
        let col = prefix.chars().count() + 1;

        SourceLocation {
            file_path: self.path.clone(),
            line,
            col,
            source_line,
        }
    }
}

/// Byte offsets where each line starts.
///
/// Line 1 starts at offset 0, line 2 after the first `\n`, and so on.
#[derive(Debug, Clone)]
pub struct LineIndex {
    offsets: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &[u8]) -> Self {
        let mut offsets = vec![0];
        for (i, b) in content.iter().enumerate() {
            if *b == b'\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    /// 1-based line number containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }

    fn line_start(&self, line: usize) -> usize {
        self.offsets[line - 1]
    }
}

/// Where a call site was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file_path: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub col: usize,
    pub source_line: String,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.col)
    }
}
