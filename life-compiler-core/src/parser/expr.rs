// Expression parsing.
//
// Binary operators are a fixed 6-level, left-associative precedence table
// climbed with a single `parse_binary_expr(min_prec)` function. Unary
// operators bind tighter than any binary operator and are right-associative.
// Range (`..`/`..=`) sits between binary expressions and assignment;
// assignment itself is right-associative and is the only non-climbing case,
// handled by trying a non-assignment expression and then checking for a
// bare `=`.
//
// Primary-expression parsing is where most of the lookahead lives: an
// identifier might start a variable, a qualified function call, or (if it
// begins with an uppercase letter and is followed by `{`) a struct literal.
// `parse_identifier_expr` resolves this with checkpoint/restore rather than
// unbounded lookahead.

use super::token::TokenKind;
use super::Parser;
use crate::ast::{
    BinaryOp, Expr, FieldInit, FloatSuffix, IntSuffix, Literal, MatchArm, TypeName, UnaryOp,
    VarName, VarNameSegment,
};

impl<'a> Parser<'a> {
    pub(super) fn parse_expr(&mut self) -> Option<Expr> {
        let expr = self.parse_range_expr()?;
        if self.check(TokenKind::Eq) {
            self.advance();
            // Right-associative: recurse into parse_expr, not parse_range_expr.
            let value = self.parse_expr()?;
            return Some(Expr::Assignment {
                target: Box::new(expr),
                value: Box::new(value),
            });
        }
        Some(expr)
    }

    fn parse_range_expr(&mut self) -> Option<Expr> {
        let start = self.parse_binary_expr(1)?;
        if self.check(TokenKind::DotDot) || self.check(TokenKind::DotDotEq) {
            let inclusive = self.check(TokenKind::DotDotEq);
            self.advance();
            let end = self.parse_binary_expr(1)?;
            return Some(Expr::Range {
                start: Box::new(start),
                end: Box::new(end),
                inclusive,
            });
        }
        Some(start)
    }

    /// Precedence-climbing over the fixed 6-level table, all left-associative:
    /// `||` (1) < `&&` (2) < `==`/`!=` (3) < `<`/`>`/`<=`/`>=` (4) < `+`/`-` (5)
    /// < `*`/`/`/`%` (6).
    fn parse_binary_expr(&mut self, min_prec: u8) -> Option<Expr> {
        let mut lhs = self.parse_unary_expr()?;
        while let Some((op, prec)) = self.peek_binary_op() {
            if prec < min_prec {
                break;
            }
            self.advance();
            let rhs = self.parse_binary_expr(prec + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Some(lhs)
    }

    fn peek_binary_op(&self) -> Option<(BinaryOp, u8)> {
        Some(match self.current_kind() {
            TokenKind::PipePipe => (BinaryOp::Or, 1),
            TokenKind::AmpAmp => (BinaryOp::And, 2),
            TokenKind::EqEq => (BinaryOp::Eq, 3),
            TokenKind::Ne => (BinaryOp::Ne, 3),
            TokenKind::Lt => (BinaryOp::Lt, 4),
            TokenKind::Gt => (BinaryOp::Gt, 4),
            TokenKind::Le => (BinaryOp::Le, 4),
            TokenKind::Ge => (BinaryOp::Ge, 4),
            TokenKind::Plus => (BinaryOp::Add, 5),
            TokenKind::Minus => (BinaryOp::Sub, 5),
            TokenKind::Star => (BinaryOp::Mul, 6),
            TokenKind::Slash => (BinaryOp::Div, 6),
            TokenKind::Percent => (BinaryOp::Mod, 6),
            _ => return None,
        })
    }

    fn parse_unary_expr(&mut self) -> Option<Expr> {
        let op = match self.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Pos),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary_expr()?;
            return Some(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.parse_postfix_expr()
    }

    /// `.field`, `.method(args)` (desugared to `method(receiver, args)`), or
    /// an un-suffixed primary expression.
    fn parse_postfix_expr(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary_expr()?;
        loop {
            if !self.check(TokenKind::Dot) {
                break;
            }
            self.advance();
            let field = self.expect_identifier()?;
            if self.check(TokenKind::LParen) {
                self.advance();
                let mut args = self.parse_call_args()?;
                self.expect(TokenKind::RParen)?;
                args.insert(0, expr);
                expr = Expr::FuncCall {
                    name: VarName::simple(field),
                    args,
                };
            } else {
                expr = Expr::FieldAccess {
                    object: Box::new(expr),
                    field,
                };
            }
        }
        Some(expr)
    }

    fn parse_primary_expr(&mut self) -> Option<Expr> {
        match self.current_kind() {
            TokenKind::If => self.parse_if_expr(),
            TokenKind::While => self.parse_while_expr(),
            TokenKind::For => self.parse_for_expr(),
            TokenKind::Match => self.parse_match_expr(),
            TokenKind::LBrace => self.parse_block().map(Expr::Block),
            TokenKind::Integer => self.parse_integer_literal(),
            TokenKind::Float => self.parse_float_literal(),
            TokenKind::Str => self.parse_string_literal(),
            TokenKind::Char => self.parse_char_literal(),
            TokenKind::LParen => self.parse_paren_or_unit_expr(),
            TokenKind::Identifier => self.parse_identifier_expr(),
            _ => {
                self.error_expected("expression");
                None
            }
        }
    }

    fn parse_if_expr(&mut self) -> Option<Expr> {
        self.expect(TokenKind::If)?;
        let condition = Box::new(self.parse_expr()?);
        let then_block = self.parse_block()?;
        let mut else_ifs = Vec::new();
        let mut else_block = None;
        while self.consume(TokenKind::Else).is_some() {
            if self.consume(TokenKind::If).is_some() {
                let cond = self.parse_expr()?;
                let block = self.parse_block()?;
                else_ifs.push((cond, block));
            } else {
                else_block = Some(self.parse_block()?);
                break;
            }
        }
        Some(Expr::If {
            condition,
            then_block,
            else_ifs,
            else_block,
        })
    }

    fn parse_while_expr(&mut self) -> Option<Expr> {
        self.expect(TokenKind::While)?;
        let condition = Box::new(self.parse_expr()?);
        let body = self.parse_block()?;
        Some(Expr::While { condition, body })
    }

    fn parse_for_expr(&mut self) -> Option<Expr> {
        self.expect(TokenKind::For)?;
        let pattern = self.parse_pattern()?;
        self.expect(TokenKind::In)?;
        let iterator = Box::new(self.parse_expr()?);
        let body = self.parse_block()?;
        Some(Expr::For {
            pattern,
            iterator,
            body,
        })
    }

    fn parse_match_expr(&mut self) -> Option<Expr> {
        self.expect(TokenKind::Match)?;
        let scrutinee = Box::new(self.parse_expr()?);
        self.expect(TokenKind::LBrace)?;
        let mut arms = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            let pattern = self.parse_pattern()?;
            let guard = if self.consume(TokenKind::If).is_some() {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.expect(TokenKind::FatArrow)?;
            let result = self.parse_expr()?;
            arms.push(MatchArm {
                pattern,
                guard,
                result,
            });
            if self.consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Some(Expr::Match { scrutinee, arms })
    }

    fn parse_paren_or_unit_expr(&mut self) -> Option<Expr> {
        self.expect(TokenKind::LParen)?;
        if self.consume(TokenKind::RParen).is_some() {
            return Some(Expr::Literal(Literal::Unit));
        }
        let expr = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Some(expr)
    }

    pub(super) fn parse_integer_literal(&mut self) -> Option<Expr> {
        let token = self.advance();
        let (digits, suffix) = split_int_suffix(token.text);
        Some(Expr::Literal(Literal::Integer {
            digits: digits.to_string(),
            suffix,
        }))
    }

    pub(super) fn parse_float_literal(&mut self) -> Option<Expr> {
        let token = self.advance();
        let (digits, suffix) = split_float_suffix(token.text);
        Some(Expr::Literal(Literal::Float {
            digits: digits.to_string(),
            suffix,
        }))
    }

    pub(super) fn parse_string_literal(&mut self) -> Option<Expr> {
        let token = self.advance();
        Some(Expr::Literal(Literal::String(token.text.to_string())))
    }

    pub(super) fn parse_char_literal(&mut self) -> Option<Expr> {
        let token = self.advance();
        Some(Expr::Literal(Literal::Char(token.text.to_string())))
    }

    /// Disambiguates, in order: a struct literal (`Point { ... }`, detected
    /// by parsing a type name and checking for a following `{`), a qualified
    /// function call (an identifier chain of three or more segments ending
    /// at `(`), or, falling back from both, a single-segment variable
    /// name. A two-segment chain ending at `(` (`obj.method(`) is *not*
    /// treated as qualified here: it falls through so `parse_postfix_expr`
    /// builds a `FieldAccess` and desugars the call into a method call.
    /// Plain dotted field access (`a.b.c`, no call) is likewise left to
    /// `parse_postfix_expr`.
    fn parse_identifier_expr(&mut self) -> Option<Expr> {
        let starts_uppercase = self
            .current()
            .text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase());
        if starts_uppercase {
            let cp = self.checkpoint();
            if let Some(type_name) = self.parse_type_name() {
                if self.check(TokenKind::LBrace) {
                    return self.parse_struct_literal_body(type_name);
                }
            }
            self.restore(cp);
        }

        // A chain of exactly two segments ending at `(` (`point.distance(`)
        // is a method call: leave it to the postfix loop, which turns the
        // single dot into a `FieldAccess` and then desugars the call. A bare
        // name (`make(`) is a plain call; three or more segments
        // (`Std.Math.max(`) is a qualified call, parsed whole here so the
        // module path survives in `VarName`.
        let cp = self.checkpoint();
        let chain = self.scan_var_name_chain();
        if chain.len() != 2 && !chain.is_empty() && self.check(TokenKind::LParen) {
            self.advance();
            let args = self.parse_call_args()?;
            self.expect(TokenKind::RParen)?;
            return Some(Expr::FuncCall {
                name: VarName { segments: chain },
                args,
            });
        }
        self.restore(cp);

        let name = self.expect_identifier()?;
        let type_params = self.try_scan_type_args_lookahead();
        Some(Expr::Var(VarName {
            segments: vec![VarNameSegment { name, type_params }],
        }))
    }

    fn parse_struct_literal_body(&mut self, type_name: TypeName) -> Option<Expr> {
        self.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            let name = self.expect_identifier()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_expr()?;
            fields.push(FieldInit { name, value });
            if self.consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Some(Expr::StructLiteral { type_name, fields })
    }

    /// Walks as far as it can through `identifier<...>? ( . identifier<...>? )*`,
    /// stopping (without consuming the trailing dot) the first time a `.` is
    /// not followed by another identifier. Used only as call-vs-variable
    /// lookahead; the caller restores to the start on a non-call outcome.
    fn scan_var_name_chain(&mut self) -> Vec<VarNameSegment> {
        let mut segments = Vec::new();
        let Some(first) = self.try_scan_var_name_segment() else {
            return segments;
        };
        segments.push(first);
        loop {
            let cp = self.checkpoint();
            if self.consume(TokenKind::Dot).is_none() {
                break;
            }
            match self.try_scan_var_name_segment() {
                Some(segment) => segments.push(segment),
                None => {
                    self.restore(cp);
                    break;
                }
            }
        }
        segments
    }

    fn try_scan_var_name_segment(&mut self) -> Option<VarNameSegment> {
        if !self.check(TokenKind::Identifier) {
            return None;
        }
        let name = self.advance().text.to_string();
        let type_params = self.try_scan_type_args_lookahead();
        Some(VarNameSegment { name, type_params })
    }

    /// `<T, U>` is ambiguous with a `<` comparison in expression position.
    /// Tentatively parses it as type arguments and restores on failure,
    /// leaving the `<` for the binary-operator parser to pick up.
    fn try_scan_type_args_lookahead(&mut self) -> Vec<TypeName> {
        if !self.check(TokenKind::Lt) {
            return Vec::new();
        }
        let cp = self.checkpoint();
        match self.parse_type_args_opt() {
            Some(args) => args,
            None => {
                self.restore(cp);
                Vec::new()
            }
        }
    }

    pub(super) fn parse_call_args(&mut self) -> Option<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check(TokenKind::RParen) {
            return Some(args);
        }
        args.push(self.parse_expr()?);
        while self.consume(TokenKind::Comma).is_some() {
            if self.check(TokenKind::RParen) {
                break;
            }
            args.push(self.parse_expr()?);
        }
        Some(args)
    }
}

fn split_int_suffix(text: &str) -> (&str, Option<IntSuffix>) {
    match text.find(['I', 'U']) {
        Some(pos) => {
            let (digits, suffix_str) = text.split_at(pos);
            let suffix = match suffix_str {
                "I8" => Some(IntSuffix::I8),
                "I16" => Some(IntSuffix::I16),
                "I32" => Some(IntSuffix::I32),
                "I64" => Some(IntSuffix::I64),
                "U8" => Some(IntSuffix::U8),
                "U16" => Some(IntSuffix::U16),
                "U32" => Some(IntSuffix::U32),
                "U64" => Some(IntSuffix::U64),
                _ => None,
            };
            (digits, suffix)
        }
        None => (text, None),
    }
}

fn split_float_suffix(text: &str) -> (&str, Option<FloatSuffix>) {
    match text.find('F') {
        Some(pos) => {
            let (digits, suffix_str) = text.split_at(pos);
            let suffix = match suffix_str {
                "F32" => Some(FloatSuffix::F32),
                "F64" => Some(FloatSuffix::F64),
                _ => None,
            };
            (digits, suffix)
        }
        None => (text, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Expr {
        let mut parser = Parser::new(source);
        parser.parse_expr().expect("expression should parse")
    }

    #[test]
    fn precedence_climbs_multiplication_over_addition() {
        let expr = parse("1 + 2 * 3");
        match expr {
            Expr::Binary {
                op: BinaryOp::Add,
                rhs,
                ..
            } => assert!(matches!(*rhs, Expr::Binary { op: BinaryOp::Mul, .. })),
            other => panic!("expected top-level add, got {other:?}"),
        }
    }

    #[test]
    fn binary_operators_are_left_associative() {
        let expr = parse("1 - 2 - 3");
        match expr {
            Expr::Binary {
                op: BinaryOp::Sub,
                lhs,
                ..
            } => assert!(matches!(*lhs, Expr::Binary { op: BinaryOp::Sub, .. })),
            other => panic!("expected left-nested sub, got {other:?}"),
        }
    }

    #[test]
    fn unary_minus_binds_tighter_than_binary_plus() {
        let expr = parse("-1 + 2");
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn method_call_desugars_to_function_call_with_receiver_first() {
        let expr = parse("point.distance(other)");
        match expr {
            Expr::FuncCall { name, args } => {
                assert_eq!(name.segments[0].name, "distance");
                assert_eq!(args.len(), 2);
                assert!(matches!(args[0], Expr::Var(_)));
            }
            other => panic!("expected desugared method call, got {other:?}"),
        }
    }

    #[test]
    fn dotted_field_access_chain_without_parens() {
        let expr = parse("a.b.c");
        match expr {
            Expr::FieldAccess { object, field } => {
                assert_eq!(field, "c");
                assert!(matches!(*object, Expr::FieldAccess { .. }));
            }
            other => panic!("expected nested field access, got {other:?}"),
        }
    }

    #[test]
    fn uppercase_identifier_followed_by_brace_is_struct_literal() {
        let expr = parse("Point { x: 1, y: 2 }");
        match expr {
            Expr::StructLiteral { fields, .. } => assert_eq!(fields.len(), 2),
            other => panic!("expected struct literal, got {other:?}"),
        }
    }

    #[test]
    fn qualified_call_keeps_full_dotted_chain() {
        let expr = parse("Std.Math.max(1, 2)");
        match expr {
            Expr::FuncCall { name, args } => {
                assert_eq!(name.segments.len(), 3);
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected qualified call, got {other:?}"),
        }
    }

    #[test]
    fn generic_call_type_args_are_not_confused_with_comparison() {
        let expr = parse("make<I32>(1)");
        match expr {
            Expr::FuncCall { name, .. } => assert_eq!(name.segments[0].type_params.len(), 1),
            other => panic!("expected generic call, got {other:?}"),
        }
    }

    #[test]
    fn inclusive_range_is_distinguished_from_exclusive() {
        let expr = parse("0..=9");
        assert!(matches!(expr, Expr::Range { inclusive: true, .. }));
    }

    #[test]
    fn assignment_is_right_associative() {
        let expr = parse("a = b = 1");
        match expr {
            Expr::Assignment { value, .. } => {
                assert!(matches!(*value, Expr::Assignment { .. }))
            }
            other => panic!("expected nested assignment, got {other:?}"),
        }
    }

    #[test]
    fn unit_and_parenthesized_expressions() {
        assert!(matches!(parse("()"), Expr::Literal(Literal::Unit)));
        assert!(matches!(parse("(1 + 2)"), Expr::Binary { .. }));
    }
}
