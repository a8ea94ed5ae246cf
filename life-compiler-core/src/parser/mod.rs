// Scannerless recursive-descent parser for the `life` language.
//
// There is no separate tokenization pass producing a `Vec<Token>`. A
// `Parser` scans one lookahead token on demand (`scan::scan_token`) and
// caches it in `current`; `advance` discards it and scans the next. Every
// production that needs more than one token of lookahead (struct-literal
// vs. call vs. field access, qualified-call vs. variable, trait-impl vs.
// plain impl) takes a `Checkpoint` before committing and `restore`s it on a
// failed guess; see `expr::parse_primary` for the main example.
//
// Parsing productions return `Option<T>`: `None` means a diagnostic was
// appended and the caller should either propagate or, if it took a
// checkpoint, backtrack and try an alternative.

pub mod expr;
pub mod item;
pub mod pattern;
mod scan;
pub mod stmt;
pub mod token;
pub mod types;

use crate::ast::Module;
use crate::diagnostic::{Diagnostic, DiagnosticEngine, Level};
use crate::source::Range;
pub use token::{Token, TokenKind};

pub struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    offset: usize,
    line: u32,
    column: u32,
    current: Token<'a>,
    diagnostics: Vec<Diagnostic>,
}

/// A saved scan position, used to backtrack a failed tentative parse.
///
/// `offset`/`line`/`column` are the scanner cursor *after* `current`; the
/// position `current` was itself scanned from is already behind us, so a
/// restore must put `current` straight back rather than re-scanning from
/// `offset` (that would scan the token following the checkpointed one and
/// silently drop `current`).
#[derive(Clone, Copy)]
pub struct Checkpoint<'a> {
    offset: usize,
    line: u32,
    column: u32,
    current: Token<'a>,
    diagnostics_len: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut parser = Self {
            source,
            bytes: source.as_bytes(),
            offset: 0,
            line: 1,
            column: 1,
            current: Token {
                kind: TokenKind::Eof,
                text: "",
                range: Range::point(crate::source::Position::start()),
            },
            diagnostics: Vec::new(),
        };
        parser.current = parser.scan_token();
        parser
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub(crate) fn current(&self) -> Token<'a> {
        self.current
    }

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub(crate) fn at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Advances past the current token, scanning the next lookahead token.
    pub(crate) fn advance(&mut self) -> Token<'a> {
        let token = self.current;
        self.current = self.scan_token();
        token
    }

    pub(crate) fn consume(&mut self, kind: TokenKind) -> Option<Token<'a>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Option<Token<'a>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error_expected(kind.display_name());
            None
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Option<String> {
        if self.check(TokenKind::Identifier) {
            Some(self.advance().text.to_string())
        } else {
            self.error_expected("identifier");
            None
        }
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint<'a> {
        Checkpoint {
            offset: self.offset,
            line: self.line,
            column: self.column,
            current: self.current,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    /// Rewinds to `cp`, discarding any diagnostics appended since: a
    /// failed tentative parse must not leave traces.
    pub(crate) fn restore(&mut self, cp: Checkpoint<'a>) {
        self.offset = cp.offset;
        self.line = cp.line;
        self.column = cp.column;
        self.current = cp.current;
        self.diagnostics.truncate(cp.diagnostics_len);
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let range = self.current.range;
        self.error_at(range, message);
    }

    pub(crate) fn error_at(&mut self, range: Range, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(message, range));
    }

    pub(crate) fn error_expected(&mut self, what: &str) {
        let got = self.current.kind.display_name();
        self.error(format!("expected {what}, found {got}"));
    }
}

/// Parses one module's worth of source text (the concatenation of one
/// file's contents, or one merged file in the module-loader sense).
///
/// On success, no errors were recorded. On failure, the returned engine
/// contains at least one error and owns the source text it diagnoses
/// against.
pub fn parse_module(
    filename: impl Into<String>,
    source: impl Into<String>,
) -> Result<Module, DiagnosticEngine> {
    let filename = filename.into();
    let source = source.into();

    let (module, diagnostics) = {
        let mut parser = Parser::new(&source);
        let module = parser.parse_module();
        (module, parser.into_diagnostics())
    };

    let has_errors = diagnostics.iter().any(|d| d.level == Level::Error);
    match module {
        Some(module) if !has_errors => Ok(module),
        _ => {
            let mut engine = DiagnosticEngine::new(filename, source);
            for diagnostic in diagnostics {
                engine.add(diagnostic);
            }
            if !engine.has_errors() {
                engine.add_error(Range::default(), "parsing failed with no specific diagnostic");
            }
            Err(engine)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_module_parses_to_no_items() {
        let module = parse_module("t.life", "").unwrap();
        assert!(module.items.is_empty());
        assert!(module.imports.is_empty());
    }

    #[test]
    fn garbage_at_module_scope_is_an_error() {
        let err = parse_module("t.life", "1 + 2;").unwrap_err();
        assert!(err.has_errors());
    }
}
