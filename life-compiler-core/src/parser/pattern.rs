// Pattern parsing, used by `let`, `match` arms, and `for` loops.

use super::token::TokenKind;
use super::Parser;
use crate::ast::{Expr, FieldPattern, Pattern, UnaryOp};

impl<'a> Parser<'a> {
    pub(super) fn parse_pattern(&mut self) -> Option<Pattern> {
        match self.current_kind() {
            TokenKind::Identifier => self.parse_identifier_pattern(),
            TokenKind::LParen => self.parse_tuple_pattern(),
            TokenKind::Integer
            | TokenKind::Float
            | TokenKind::Str
            | TokenKind::Char
            | TokenKind::Minus => self.parse_literal_pattern(),
            _ => {
                self.error_expected("pattern");
                None
            }
        }
    }

    /// An uppercase-leading identifier is a nominal type path: `Type(...)`
    /// is an enum/tuple pattern, `Type { ... }` a struct pattern, and a bare
    /// `Type` a unit enum variant. Anything else is a binding (`_` parses as
    /// `Wildcard`, everything else as `Simple`).
    fn parse_identifier_pattern(&mut self) -> Option<Pattern> {
        let starts_uppercase = self
            .current()
            .text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase());
        if starts_uppercase {
            let type_name = self.parse_type_name()?;
            if self.consume(TokenKind::LParen).is_some() {
                let mut sub_patterns = Vec::new();
                if !self.check(TokenKind::RParen) {
                    sub_patterns.push(self.parse_pattern()?);
                    while self.consume(TokenKind::Comma).is_some() {
                        if self.check(TokenKind::RParen) {
                            break;
                        }
                        sub_patterns.push(self.parse_pattern()?);
                    }
                }
                self.expect(TokenKind::RParen)?;
                return Some(Pattern::Enum {
                    type_name,
                    sub_patterns,
                });
            }
            if self.consume(TokenKind::LBrace).is_some() {
                let mut fields = Vec::new();
                while !self.check(TokenKind::RBrace) && !self.at_end() {
                    let name = self.expect_identifier()?;
                    self.expect(TokenKind::Colon)?;
                    let pattern = self.parse_pattern()?;
                    fields.push(FieldPattern { name, pattern });
                    if self.consume(TokenKind::Comma).is_none() {
                        break;
                    }
                }
                self.expect(TokenKind::RBrace)?;
                return Some(Pattern::Struct { type_name, fields });
            }
            return Some(Pattern::Enum {
                type_name,
                sub_patterns: Vec::new(),
            });
        }

        let name = self.expect_identifier()?;
        if name == "_" {
            return Some(Pattern::Wildcard);
        }
        Some(Pattern::Simple(name))
    }

    fn parse_tuple_pattern(&mut self) -> Option<Pattern> {
        self.expect(TokenKind::LParen)?;
        let mut elements = Vec::new();
        if !self.check(TokenKind::RParen) {
            elements.push(self.parse_pattern()?);
            while self.consume(TokenKind::Comma).is_some() {
                if self.check(TokenKind::RParen) {
                    break;
                }
                elements.push(self.parse_pattern()?);
            }
        }
        self.expect(TokenKind::RParen)?;
        Some(Pattern::Tuple(elements))
    }

    fn parse_literal_pattern(&mut self) -> Option<Pattern> {
        if self.consume(TokenKind::Minus).is_some() {
            let operand = self.parse_numeric_literal()?;
            return Some(Pattern::Literal(Box::new(Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            })));
        }
        let expr = match self.current_kind() {
            TokenKind::Integer => self.parse_integer_literal()?,
            TokenKind::Float => self.parse_float_literal()?,
            TokenKind::Str => self.parse_string_literal()?,
            TokenKind::Char => self.parse_char_literal()?,
            _ => {
                self.error_expected("literal pattern");
                return None;
            }
        };
        Some(Pattern::Literal(Box::new(expr)))
    }

    fn parse_numeric_literal(&mut self) -> Option<Expr> {
        match self.current_kind() {
            TokenKind::Integer => self.parse_integer_literal(),
            TokenKind::Float => self.parse_float_literal(),
            _ => {
                self.error_expected("numeric literal");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Pattern {
        let mut parser = Parser::new(source);
        parser.parse_pattern().expect("pattern should parse")
    }

    #[test]
    fn underscore_is_wildcard() {
        assert!(matches!(parse("_"), Pattern::Wildcard));
    }

    #[test]
    fn lowercase_identifier_is_a_binding() {
        match parse("x") {
            Pattern::Simple(name) => assert_eq!(name, "x"),
            other => panic!("expected simple binding, got {other:?}"),
        }
    }

    #[test]
    fn negative_integer_literal_pattern() {
        match parse("-1") {
            Pattern::Literal(expr) => assert!(matches!(*expr, Expr::Unary { .. })),
            other => panic!("expected literal pattern, got {other:?}"),
        }
    }

    #[test]
    fn unit_enum_variant_pattern() {
        match parse("None") {
            Pattern::Enum { sub_patterns, .. } => assert!(sub_patterns.is_empty()),
            other => panic!("expected unit enum pattern, got {other:?}"),
        }
    }

    #[test]
    fn tuple_enum_variant_pattern() {
        match parse("Some(x)") {
            Pattern::Enum { sub_patterns, .. } => assert_eq!(sub_patterns.len(), 1),
            other => panic!("expected tuple enum pattern, got {other:?}"),
        }
    }

    #[test]
    fn struct_pattern_binds_named_fields() {
        match parse("Point { x: a, y: b }") {
            Pattern::Struct { fields, .. } => assert_eq!(fields.len(), 2),
            other => panic!("expected struct pattern, got {other:?}"),
        }
    }

    #[test]
    fn tuple_pattern_of_bindings() {
        match parse("(a, b, _)") {
            Pattern::Tuple(elements) => assert_eq!(elements.len(), 3),
            other => panic!("expected tuple pattern, got {other:?}"),
        }
    }
}
