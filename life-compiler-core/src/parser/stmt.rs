// Statement and block parsing.
//
// A block is `{ statement* trailing_expr? }` where `trailing_expr` has no
// terminating `;` and is the block's value. The parsing loop below decides,
// for each non-keyword-led statement, whether what it just parsed is
// followed by `;` (a statement) or by `}` (the trailing expression); there's
// no separate lookahead pass, the decision falls out of what token comes
// next.

use super::token::TokenKind;
use super::Parser;
use crate::ast::{Block, Expr, Stmt};

impl<'a> Parser<'a> {
    pub(super) fn parse_block(&mut self) -> Option<Block> {
        self.expect(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        let mut trailing_expr = None;

        while !self.check(TokenKind::RBrace) && !self.at_end() {
            match self.current_kind() {
                TokenKind::Let => statements.push(self.parse_let_stmt()?),
                TokenKind::Return => statements.push(self.parse_return_stmt()?),
                TokenKind::Break => statements.push(self.parse_break_stmt()?),
                TokenKind::Continue => statements.push(self.parse_continue_stmt()?),
                TokenKind::LBrace => statements.push(Stmt::Block(self.parse_block()?)),
                kind if kind.is_item_start() => {
                    let item = self.parse_item()?;
                    statements.push(Stmt::Item(Box::new(item)));
                }
                TokenKind::If | TokenKind::While | TokenKind::For | TokenKind::Match => {
                    let expr = self.parse_expr()?;
                    if self.check(TokenKind::RBrace) {
                        trailing_expr = Some(Box::new(expr));
                        break;
                    }
                    self.consume(TokenKind::Semi);
                    statements.push(stmt_from_expr(expr));
                }
                _ => {
                    let expr = self.parse_expr()?;
                    if self.consume(TokenKind::Semi).is_some() {
                        statements.push(stmt_from_expr(expr));
                    } else if self.check(TokenKind::RBrace) {
                        trailing_expr = Some(Box::new(expr));
                        break;
                    } else {
                        self.error_expected("';' or '}'");
                        statements.push(stmt_from_expr(expr));
                    }
                }
            }
        }

        self.expect(TokenKind::RBrace)?;
        Some(Block {
            statements,
            trailing_expr,
        })
    }

    fn parse_let_stmt(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::Let)?;
        let is_mut = self.consume(TokenKind::Mut).is_some();
        let pattern = self.parse_pattern()?;
        let type_annotation = if self.consume(TokenKind::Colon).is_some() {
            Some(self.parse_type_name()?)
        } else {
            None
        };
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semi)?;
        Some(Stmt::Let {
            is_mut,
            pattern,
            type_annotation,
            value,
        })
    }

    fn parse_return_stmt(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::Return)?;
        let expr = self.parse_optional_tail_expr()?;
        self.expect(TokenKind::Semi)?;
        Some(Stmt::Return(expr))
    }

    fn parse_break_stmt(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::Break)?;
        let expr = self.parse_optional_tail_expr()?;
        self.expect(TokenKind::Semi)?;
        Some(Stmt::Break(expr))
    }

    fn parse_continue_stmt(&mut self) -> Option<Stmt> {
        self.expect(TokenKind::Continue)?;
        self.expect(TokenKind::Semi)?;
        Some(Stmt::Continue)
    }

    fn parse_optional_tail_expr(&mut self) -> Option<Option<Expr>> {
        if self.check(TokenKind::Semi) {
            Some(None)
        } else {
            Some(Some(self.parse_expr()?))
        }
    }
}

/// A bare call with no further postfix is the `FuncCallStatement` form;
/// everything else is a plain `ExprStatement`.
fn stmt_from_expr(expr: Expr) -> Stmt {
    match expr {
        Expr::FuncCall { name, args } => Stmt::FuncCallStatement { name, args },
        other => Stmt::ExprStatement(other),
    }
}
