// Diagnostic system for the life compiler front end.
//
// A `DiagnosticEngine` owns one file's `SourceMap` plus a mutable, ordered
// sequence of `Diagnostic`s appended to it while parsing or loading modules.
// It never mutates the source text it was built from; the parser holds a
// borrow of that text and must not outlive the engine that owns it.

pub mod format;
pub mod sink;

use crate::source::{Range, SourceMap};
use serde::{Deserialize, Serialize};

pub use sink::{CollectingSink, CountingSink, DiagnosticSink, NullSink};

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
    Note,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
        }
    }
}

/// A single diagnostic message, with any nested notes rendered indented
/// beneath it (see `format::render`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: Level,
    pub range: Range,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, range: Range) -> Self {
        Self {
            level: Level::Error,
            range,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>, range: Range) -> Self {
        Self {
            level: Level::Warning,
            range,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn note(message: impl Into<String>, range: Range) -> Self {
        Self {
            level: Level::Note,
            range,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: Diagnostic) -> Self {
        self.notes.push(note);
        self
    }
}

/// Owns a file's `SourceMap` and the diagnostics accumulated against it.
///
/// `parse_module` returns one of these on failure; on success no errors
/// were recorded (though warnings may have been).
#[derive(Debug)]
pub struct DiagnosticEngine {
    source_map: SourceMap,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticEngine {
    pub fn new(filename: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            source_map: SourceMap::new(filename, source),
            diagnostics: Vec::new(),
        }
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    pub fn add_error(&mut self, range: Range, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(message, range));
    }

    pub fn add_warning(&mut self, range: Range, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(message, range));
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Merges another engine's diagnostics into this one. Used by the
    /// module loader, which runs one engine per file but reports failures
    /// against the whole module.
    pub fn merge(&mut self, other: DiagnosticEngine) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Renders every diagnostic (clang/gcc style: `file:line:col: level:
    /// message`, a source excerpt, then any notes indented two spaces) to
    /// `out`.
    pub fn print(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        for diagnostic in &self.diagnostics {
            format::render(out, &self.source_map, diagnostic, 0)?;
        }
        Ok(())
    }

    /// Serializes the diagnostics as JSON, for hosts that want structured
    /// output instead of the text rendering above.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.diagnostics).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Position;

    #[test]
    fn engine_tracks_errors() {
        let mut engine = DiagnosticEngine::new("t.life", "let x = 1;");
        assert!(!engine.has_errors());
        engine.add_error(Range::point(Position::new(1, 1)), "oops");
        assert!(engine.has_errors());
        assert_eq!(engine.error_count(), 1);
    }

    #[test]
    fn warnings_do_not_count_as_errors() {
        let mut engine = DiagnosticEngine::new("t.life", "x");
        engine.add_warning(Range::point(Position::new(1, 1)), "unused");
        assert!(!engine.has_errors());
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn merge_concatenates_diagnostics() {
        let mut a = DiagnosticEngine::new("a.life", "a");
        a.add_error(Range::point(Position::new(1, 1)), "bad a");
        let mut b = DiagnosticEngine::new("b.life", "b");
        b.add_error(Range::point(Position::new(1, 1)), "bad b");
        a.merge(b);
        assert_eq!(a.len(), 2);
    }
}
