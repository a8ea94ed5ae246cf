// Type name parsing.

use super::token::TokenKind;
use super::Parser;
use crate::ast::{PathType, TypeName, TypeNameSegment, WhereBound, WhereClause};

impl<'a> Parser<'a> {
    /// `fn(...):T` is a function type; `()` is the unit path segment;
    /// everything else is a dotted, possibly-generic nominal path.
    pub(super) fn parse_type_name(&mut self) -> Option<TypeName> {
        if self.check(TokenKind::Fn) {
            return self.parse_function_type();
        }
        if self.check(TokenKind::LParen) {
            let cp = self.checkpoint();
            self.advance();
            if self.check(TokenKind::RParen) {
                self.advance();
                return Some(TypeName::simple("()"));
            }
            self.restore(cp);
        }
        self.parse_path_type()
    }

    fn parse_function_type(&mut self) -> Option<TypeName> {
        self.expect(TokenKind::Fn)?;
        self.expect(TokenKind::LParen)?;
        let mut param_types = Vec::new();
        if !self.check(TokenKind::RParen) {
            param_types.push(self.parse_type_name()?);
            while self.consume(TokenKind::Comma).is_some() {
                if self.check(TokenKind::RParen) {
                    break;
                }
                param_types.push(self.parse_type_name()?);
            }
        }
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Colon)?;
        let return_type = Box::new(self.parse_type_name()?);
        Some(TypeName::Function {
            param_types,
            return_type,
        })
    }

    fn parse_path_type(&mut self) -> Option<TypeName> {
        let mut segments = vec![self.parse_type_name_segment()?];
        while self.check(TokenKind::Dot) {
            let cp = self.checkpoint();
            self.advance();
            match self.parse_type_name_segment() {
                Some(segment) => segments.push(segment),
                None => {
                    self.restore(cp);
                    break;
                }
            }
        }
        Some(TypeName::Path(PathType { segments }))
    }

    fn parse_type_name_segment(&mut self) -> Option<TypeNameSegment> {
        let name = self.expect_identifier()?;
        let type_params = self.parse_type_args_opt()?;
        Some(TypeNameSegment { name, type_params })
    }

    /// `<T, U, ...>`, or an empty list if no `<` follows.
    pub(super) fn parse_type_args_opt(&mut self) -> Option<Vec<TypeName>> {
        if !self.check(TokenKind::Lt) {
            return Some(Vec::new());
        }
        self.advance();
        let mut args = vec![self.parse_type_name()?];
        while self.consume(TokenKind::Comma).is_some() {
            if self.check(TokenKind::Gt) {
                break;
            }
            args.push(self.parse_type_name()?);
        }
        self.expect(TokenKind::Gt)?;
        Some(args)
    }

    /// `<T, U, ...>` as a list of bare type-parameter names (no bounds;
    /// bounds live in the trailing `where` clause).
    pub(super) fn parse_type_params_opt(&mut self) -> Option<Vec<String>> {
        if !self.check(TokenKind::Lt) {
            return Some(Vec::new());
        }
        self.advance();
        let mut params = vec![self.expect_identifier()?];
        while self.consume(TokenKind::Comma).is_some() {
            if self.check(TokenKind::Gt) {
                break;
            }
            params.push(self.expect_identifier()?);
        }
        self.expect(TokenKind::Gt)?;
        Some(params)
    }

    /// `where T: Bound1 + Bound2, U: Bound3`, or `None` if absent.
    pub(super) fn parse_where_clause_opt(&mut self) -> Option<Option<WhereClause>> {
        if self.consume(TokenKind::Where).is_none() {
            return Some(None);
        }
        let mut bounds = vec![self.parse_where_bound()?];
        while self.consume(TokenKind::Comma).is_some() {
            bounds.push(self.parse_where_bound()?);
        }
        Some(Some(WhereClause { bounds }))
    }

    fn parse_where_bound(&mut self) -> Option<WhereBound> {
        let type_param = self.expect_identifier()?;
        self.expect(TokenKind::Colon)?;
        let mut bounds = vec![self.parse_type_name()?];
        while self.consume(TokenKind::Plus).is_some() {
            bounds.push(self.parse_type_name()?);
        }
        Some(WhereBound { type_param, bounds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_type(source: &str) -> TypeName {
        let mut parser = Parser::new(source);
        parser.parse_type_name().expect("type should parse")
    }

    #[test]
    fn parses_dotted_generic_path() {
        let ty = parse_type("Std.Collections.Vec<I32>");
        match ty {
            TypeName::Path(path) => {
                assert_eq!(path.segments.len(), 3);
                assert_eq!(path.segments[2].name, "Vec");
                assert_eq!(path.segments[2].type_params.len(), 1);
            }
            _ => panic!("expected path type"),
        }
    }

    #[test]
    fn parses_function_type() {
        let ty = parse_type("fn(I32, I32): Bool");
        match ty {
            TypeName::Function {
                param_types,
                return_type,
            } => {
                assert_eq!(param_types.len(), 2);
                assert!(matches!(*return_type, TypeName::Path(_)));
            }
            _ => panic!("expected function type"),
        }
    }

    #[test]
    fn parses_unit_type() {
        let ty = parse_type("()");
        assert!(matches!(ty, TypeName::Path(_)));
    }
}
