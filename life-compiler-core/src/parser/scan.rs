// Character-level scanning for the scannerless parser. There is no
// separate tokenization pass: `Parser::scan_token` is invoked on demand to
// produce the single cached lookahead token each time the parser advances
// (see `parser::mod`'s `advance`/`checkpoint`/`restore`).

use super::token::{Token, TokenKind};
use super::Parser;
use crate::source::{Position, Range};

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Parser<'a> {
    pub(super) fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.offset).copied()
    }

    fn peek_byte_at(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.offset + n).copied()
    }

    /// Consumes one byte, updating `(offset, line, column)`: `\n` resets
    /// column and bumps line; `\r` does the same and additionally swallows a
    /// following `\n` without a second line increment; every other byte
    /// (including UTF-8 continuation bytes) advances column by one.
    fn bump_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.offset += 1;
        match b {
            b'\r' => {
                self.line += 1;
                self.column = 1;
                if self.peek_byte() == Some(b'\n') {
                    self.offset += 1;
                }
            }
            b'\n' => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }
        Some(b)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek_byte() {
                Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') => {
                    self.bump_byte();
                }
                Some(b'/') if self.peek_byte_at(1) == Some(b'/') => {
                    while !matches!(self.peek_byte(), None | Some(b'\n') | Some(b'\r')) {
                        self.bump_byte();
                    }
                }
                Some(b'/') if self.peek_byte_at(1) == Some(b'*') => {
                    let start = self.position();
                    self.bump_byte();
                    self.bump_byte();
                    let mut depth = 1u32;
                    loop {
                        match self.peek_byte() {
                            None => {
                                self.error_at(
                                    Range::point(self.position()),
                                    "unterminated block comment",
                                );
                                let _ = start;
                                break;
                            }
                            Some(b'*') if self.peek_byte_at(1) == Some(b'/') => {
                                self.bump_byte();
                                self.bump_byte();
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            Some(b'/') if self.peek_byte_at(1) == Some(b'*') => {
                                self.bump_byte();
                                self.bump_byte();
                                depth += 1;
                            }
                            Some(_) => {
                                self.bump_byte();
                            }
                        }
                    }
                }
                _ => break,
            }
        }
    }

    pub(super) fn scan_token(&mut self) -> Token<'a> {
        self.skip_trivia();
        let start = self.position();
        let start_offset = self.offset;

        let kind = match self.peek_byte() {
            None => TokenKind::Eof,
            Some(b) if is_ident_start(b) => return self.scan_identifier_or_keyword(start, start_offset),
            Some(b) if b.is_ascii_digit() => return self.scan_number(start, start_offset),
            Some(b'"') => return self.scan_string(start, start_offset),
            Some(b'\'') => return self.scan_char(start, start_offset),
            Some(b'(') => {
                self.bump_byte();
                TokenKind::LParen
            }
            Some(b')') => {
                self.bump_byte();
                TokenKind::RParen
            }
            Some(b'{') => {
                self.bump_byte();
                TokenKind::LBrace
            }
            Some(b'}') => {
                self.bump_byte();
                TokenKind::RBrace
            }
            Some(b'[') => {
                self.bump_byte();
                TokenKind::LBracket
            }
            Some(b']') => {
                self.bump_byte();
                TokenKind::RBracket
            }
            Some(b':') => {
                self.bump_byte();
                TokenKind::Colon
            }
            Some(b',') => {
                self.bump_byte();
                TokenKind::Comma
            }
            Some(b';') => {
                self.bump_byte();
                TokenKind::Semi
            }
            Some(b'~') => {
                self.bump_byte();
                TokenKind::Tilde
            }
            Some(b'+') => {
                self.bump_byte();
                TokenKind::Plus
            }
            Some(b'-') => {
                self.bump_byte();
                TokenKind::Minus
            }
            Some(b'*') => {
                self.bump_byte();
                TokenKind::Star
            }
            Some(b'/') => {
                self.bump_byte();
                TokenKind::Slash
            }
            Some(b'%') => {
                self.bump_byte();
                TokenKind::Percent
            }
            Some(b'.') => {
                self.bump_byte();
                if self.peek_byte() == Some(b'.') {
                    self.bump_byte();
                    if self.peek_byte() == Some(b'=') {
                        self.bump_byte();
                        TokenKind::DotDotEq
                    } else {
                        TokenKind::DotDot
                    }
                } else {
                    TokenKind::Dot
                }
            }
            Some(b'=') => {
                self.bump_byte();
                if self.peek_byte() == Some(b'=') {
                    self.bump_byte();
                    TokenKind::EqEq
                } else if self.peek_byte() == Some(b'>') {
                    self.bump_byte();
                    TokenKind::FatArrow
                } else {
                    TokenKind::Eq
                }
            }
            Some(b'!') => {
                self.bump_byte();
                if self.peek_byte() == Some(b'=') {
                    self.bump_byte();
                    TokenKind::Ne
                } else {
                    TokenKind::Bang
                }
            }
            Some(b'<') => {
                self.bump_byte();
                if self.peek_byte() == Some(b'=') {
                    self.bump_byte();
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            Some(b'>') => {
                self.bump_byte();
                if self.peek_byte() == Some(b'=') {
                    self.bump_byte();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            Some(b'&') => {
                self.bump_byte();
                if self.peek_byte() == Some(b'&') {
                    self.bump_byte();
                    TokenKind::AmpAmp
                } else {
                    self.error_at(Range::new(start, self.position()), "unexpected character '&'");
                    return self.scan_token();
                }
            }
            Some(b'|') => {
                self.bump_byte();
                if self.peek_byte() == Some(b'|') {
                    self.bump_byte();
                    TokenKind::PipePipe
                } else {
                    self.error_at(Range::new(start, self.position()), "unexpected character '|'");
                    return self.scan_token();
                }
            }
            Some(other) => {
                self.bump_byte();
                self.error_at(
                    Range::new(start, self.position()),
                    format!("unexpected character {:?}", other as char),
                );
                return self.scan_token();
            }
        };

        Token {
            kind,
            text: &self.source[start_offset..self.offset],
            range: Range::new(start, self.position()),
        }
    }

    fn scan_identifier_or_keyword(&mut self, start: Position, start_offset: usize) -> Token<'a> {
        while matches!(self.peek_byte(), Some(b) if is_ident_continue(b)) {
            self.bump_byte();
        }
        let text = &self.source[start_offset..self.offset];
        let kind = TokenKind::keyword_from_str(text).unwrap_or(TokenKind::Identifier);
        Token {
            kind,
            text,
            range: Range::new(start, self.position()),
        }
    }

    fn scan_number(&mut self, start: Position, start_offset: usize) -> Token<'a> {
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit() || b == b'_') {
            self.bump_byte();
        }
        let int_digits_end_offset = self.offset;
        let int_digits_end_pos = self.position();

        let looks_like_float = (self.peek_byte() == Some(b'.') && self.peek_byte_at(1) != Some(b'.'))
            || matches!(self.peek_byte(), Some(b'e') | Some(b'E'));

        if looks_like_float {
            if self.peek_byte() == Some(b'.') {
                self.bump_byte();
                while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit() || b == b'_') {
                    self.bump_byte();
                }
            }
            if matches!(self.peek_byte(), Some(b'e') | Some(b'E')) {
                self.bump_byte();
                if matches!(self.peek_byte(), Some(b'+') | Some(b'-')) {
                    self.bump_byte();
                }
                let exp_start = self.offset;
                while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
                    self.bump_byte();
                }
                if self.offset == exp_start {
                    let range = Range::new(start, self.position());
                    self.error_at(range, "invalid float literal: missing exponent digits");
                }
            }
            self.scan_float_suffix(start);
            return Token {
                kind: TokenKind::Float,
                text: &self.source[start_offset..self.offset],
                range: Range::new(start, self.position()),
            };
        }

        let digits = &self.source[start_offset..int_digits_end_offset];
        if digits.len() > 1 && digits.starts_with('0') {
            self.error_at(
                Range::new(start, int_digits_end_pos),
                "invalid integer: leading zero not allowed (except standalone '0')",
            );
        }
        if digits.ends_with('_') {
            self.error_at(
                Range::new(start, int_digits_end_pos),
                "invalid integer: trailing underscore not allowed",
            );
        }
        self.scan_int_suffix(start);
        Token {
            kind: TokenKind::Integer,
            text: &self.source[start_offset..self.offset],
            range: Range::new(start, self.position()),
        }
    }

    fn scan_int_suffix(&mut self, start: Position) {
        if matches!(self.peek_byte(), Some(b'I') | Some(b'U')) {
            self.bump_byte();
            let digits_start = self.offset;
            while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
                self.bump_byte();
            }
            if self.offset == digits_start {
                let range = Range::new(start, self.position());
                self.error_at(range, "invalid integer suffix: expected digits after 'I'/'U'");
            }
        }
    }

    fn scan_float_suffix(&mut self, start: Position) {
        if self.peek_byte() == Some(b'F') {
            self.bump_byte();
            let digits_start = self.offset;
            while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
                self.bump_byte();
            }
            if self.offset == digits_start {
                let range = Range::new(start, self.position());
                self.error_at(range, "invalid float suffix: expected digits after 'F'");
            }
        }
    }

    fn scan_string(&mut self, start: Position, start_offset: usize) -> Token<'a> {
        self.bump_byte();
        loop {
            match self.peek_byte() {
                None => {
                    self.error_at(Range::new(start, self.position()), "unterminated string literal");
                    break;
                }
                Some(b'"') => {
                    self.bump_byte();
                    break;
                }
                Some(b'\\') => {
                    self.bump_byte();
                    self.scan_escape(start);
                }
                Some(b'\n') | Some(b'\r') => {
                    self.error_at(Range::new(start, self.position()), "unterminated string literal");
                    break;
                }
                Some(_) => {
                    self.bump_byte();
                }
            }
        }
        Token {
            kind: TokenKind::Str,
            text: &self.source[start_offset..self.offset],
            range: Range::new(start, self.position()),
        }
    }

    fn scan_char(&mut self, start: Position, start_offset: usize) -> Token<'a> {
        self.bump_byte();
        match self.peek_byte() {
            Some(b'\\') => {
                self.bump_byte();
                self.scan_escape(start);
            }
            Some(b'\'') | None => {
                self.error_at(Range::new(start, self.position()), "empty or unterminated char literal");
            }
            Some(_) => {
                if let Some(ch) = self.source[self.offset..].chars().next() {
                    for _ in 0..ch.len_utf8() {
                        self.bump_byte();
                    }
                }
            }
        }
        if self.peek_byte() == Some(b'\'') {
            self.bump_byte();
        } else {
            self.error_at(Range::new(start, self.position()), "unterminated char literal");
        }
        Token {
            kind: TokenKind::Char,
            text: &self.source[start_offset..self.offset],
            range: Range::new(start, self.position()),
        }
    }

    fn scan_escape(&mut self, start: Position) {
        match self.peek_byte() {
            Some(b'n') | Some(b't') | Some(b'r') | Some(b'\\') | Some(b'"') | Some(b'\'') => {
                self.bump_byte();
            }
            Some(b'x') => {
                self.bump_byte();
                for _ in 0..2 {
                    match self.peek_byte() {
                        Some(b) if b.is_ascii_hexdigit() => {
                            self.bump_byte();
                        }
                        _ => {
                            self.error_at(
                                Range::new(start, self.position()),
                                "invalid \\x escape: expected two hex digits",
                            );
                            return;
                        }
                    }
                }
            }
            Some(b'u') => {
                self.bump_byte();
                if self.peek_byte() != Some(b'{') {
                    self.error_at(Range::new(start, self.position()), "invalid \\u escape: expected '{'");
                    return;
                }
                self.bump_byte();
                let mut count = 0;
                while matches!(self.peek_byte(), Some(b) if b.is_ascii_hexdigit()) {
                    self.bump_byte();
                    count += 1;
                }
                if !(1..=6).contains(&count) {
                    self.error_at(
                        Range::new(start, self.position()),
                        "invalid \\u escape: expected 1-6 hex digits",
                    );
                }
                if self.peek_byte() == Some(b'}') {
                    self.bump_byte();
                } else {
                    self.error_at(Range::new(start, self.position()), "invalid \\u escape: expected '}'");
                }
            }
            _ => {
                self.error_at(Range::new(start, self.position()), "invalid escape sequence");
                if self.peek_byte().is_some() {
                    self.bump_byte();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut parser = Parser::new(source);
        let mut out = Vec::new();
        loop {
            let kind = parser.current_kind();
            out.push(kind);
            if kind == TokenKind::Eof {
                break;
            }
            parser.advance();
        }
        out
    }

    #[test]
    fn skips_line_and_nested_block_comments() {
        let toks = kinds("// hi\nfn /* outer /* inner */ still */ f");
        assert_eq!(toks, vec![TokenKind::Fn, TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn recognizes_keywords_only_at_word_boundary() {
        let toks = kinds("fn fnx");
        assert_eq!(toks, vec![TokenKind::Fn, TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn distinguishes_range_from_minus() {
        let toks = kinds("a..b a - b a..=b");
        assert_eq!(
            toks,
            vec![
                TokenKind::Identifier,
                TokenKind::DotDot,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Minus,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::DotDotEq,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn leading_zero_integer_is_an_error() {
        let parser = Parser::new("01");
        assert_eq!(parser.current_kind(), TokenKind::Integer);
        assert!(parser.has_errors());
    }

    #[test]
    fn float_requires_digit_or_exponent() {
        let mut parser = Parser::new("1.5 2e10 3.0F32");
        assert_eq!(parser.current_kind(), TokenKind::Float);
        parser.advance();
        assert_eq!(parser.current_kind(), TokenKind::Float);
        parser.advance();
        assert_eq!(parser.current_kind(), TokenKind::Float);
        assert!(!parser.has_errors());
    }

    #[test]
    fn crlf_only_advances_line_once() {
        let mut parser = Parser::new("a\r\nb");
        parser.advance();
        assert_eq!(parser.current().range.start.line, 2);
        assert_eq!(parser.current().range.start.column, 1);
    }
}
