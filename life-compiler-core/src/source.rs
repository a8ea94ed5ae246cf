// Source positions, ranges, and per-file line indexing for the compiler's
// diagnostic machinery.
//
// A `SourceMap` owns one file's text and a precomputed line-start index so
// byte offsets collected while parsing can be turned into human-readable
// line/column positions without rescanning the source.

use serde::{Deserialize, Serialize};

/// A 1-indexed line/column position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position at the very start of a file.
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// A span between two positions; `start <= end` always holds for ranges
/// produced by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "range start must not be after its end");
        Self { start, end }
    }

    /// A zero-width range at a single position, used for insertion-point
    /// diagnostics (e.g. "expected ';' here").
    pub fn point(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn merge(self, other: Range) -> Range {
        Range {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

impl Default for Range {
    fn default() -> Self {
        Range::point(Position::default())
    }
}

/// A file's source text plus a precomputed line-start index, owned by the
/// `DiagnosticEngine` that reports on it (see `diagnostic::DiagnosticEngine`).
#[derive(Debug, Clone)]
pub struct SourceMap {
    filename: String,
    source: String,
    /// Byte offset of the start of each line; element 0 is always 0.
    line_starts: Vec<u32>,
}

impl SourceMap {
    /// Builds a line index in one pass over the bytes. Line terminators
    /// recognized: `\n`, `\r\n`, `\r`. A byte immediately following a
    /// terminator starts the next line.
    pub fn new(filename: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();
        let mut i = 0usize;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    line_starts.push((i + 1) as u32);
                    i += 1;
                }
                b'\r' => {
                    let next = i + 1;
                    if next < bytes.len() && bytes[next] == b'\n' {
                        line_starts.push((next + 1) as u32);
                        i += 2;
                    } else {
                        line_starts.push(next as u32);
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }
        Self {
            filename: filename.into(),
            source,
            line_starts,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the text of line `n` (1-indexed), exclusive of its
    /// terminator; empty if `n` is out of range.
    pub fn get_line(&self, n: u32) -> &str {
        if n == 0 || (n as usize) > self.line_starts.len() {
            return "";
        }
        let idx = (n - 1) as usize;
        let start = self.line_starts[idx] as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&next| {
                let mut e = next as usize;
                if e > start && self.source.as_bytes().get(e - 1) == Some(&b'\n') {
                    e -= 1;
                }
                if e > start && self.source.as_bytes().get(e - 1) == Some(&b'\r') {
                    e -= 1;
                }
                e
            })
            .unwrap_or(self.source.len());
        &self.source[start..end]
    }

    /// Converts a byte offset to a `Position` via binary search on the line
    /// index. Column is counted in bytes from the line start, matching the
    /// parser's own incremental tracking (continuation bytes each count as
    /// one column; see `parser::scan`).
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        Position {
            line: (line_idx + 1) as u32,
            column: offset - line_start + 1,
        }
    }
}
