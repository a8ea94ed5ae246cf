// Diagnostic sink abstraction for output-agnostic diagnostic collection.
//
// The DiagnosticSink trait decouples diagnostic emission from consumption.
// `DiagnosticEngine` is the primary collector used by the parser and module
// loader; these sinks exist for callers that want a lighter-weight
// alternative (validation-only passes, tests) without pulling in a
// `SourceMap`.

use super::{Diagnostic, Level};

/// A sink that receives diagnostics as they're emitted.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
    fn has_errors(&self) -> bool;
    fn error_count(&self) -> usize;
}

/// Collects all diagnostics into a vector. The default sink for batch use.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.level == Level::Error {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    fn error_count(&self) -> usize {
        self.error_count
    }
}

/// Counts diagnostics by level without storing them. Useful for quick
/// validation passes where the full diagnostic text isn't needed.
#[derive(Debug, Default)]
pub struct CountingSink {
    error_count: usize,
    warning_count: usize,
    note_count: usize,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn note_count(&self) -> usize {
        self.note_count
    }

    pub fn total_count(&self) -> usize {
        self.error_count + self.warning_count + self.note_count
    }
}

impl DiagnosticSink for CountingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            Level::Error => self.error_count += 1,
            Level::Warning => self.warning_count += 1,
            Level::Note => self.note_count += 1,
        }
    }

    fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    fn error_count(&self) -> usize {
        self.error_count
    }
}

/// Discards all diagnostics. Useful for tests that only care whether
/// parsing succeeded.
#[derive(Debug, Default)]
pub struct NullSink {
    error_count: usize,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for NullSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.level == Level::Error {
            self.error_count += 1;
        }
    }

    fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    fn error_count(&self) -> usize {
        self.error_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Position, Range};

    fn make_error() -> Diagnostic {
        Diagnostic::error("test error", Range::point(Position::new(1, 1)))
    }

    fn make_warning() -> Diagnostic {
        Diagnostic::warning("test warning", Range::point(Position::new(1, 1)))
    }

    #[test]
    fn collecting_sink_tracks_errors_and_keeps_all() {
        let mut sink = CollectingSink::new();
        assert!(!sink.has_errors());

        sink.emit(make_error());
        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.diagnostics().len(), 1);

        sink.emit(make_warning());
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.diagnostics().len(), 2);
    }

    #[test]
    fn counting_sink_tallies_by_level() {
        let mut sink = CountingSink::new();
        sink.emit(make_error());
        sink.emit(make_error());
        sink.emit(make_warning());

        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 2);
        assert_eq!(sink.warning_count(), 1);
        assert_eq!(sink.total_count(), 3);
    }

    #[test]
    fn null_sink_discards_but_still_counts_errors() {
        let mut sink = NullSink::new();
        sink.emit(make_error());
        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 1);
    }
}
