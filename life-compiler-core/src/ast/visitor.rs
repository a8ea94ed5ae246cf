// AST visitor for the `life` front end.
//
// Implement this trait to walk the tree produced by the parser (for a
// pretty-printer, a later compilation phase, or a test helper that counts
// node kinds). All methods have default implementations that recurse into
// child nodes, so overriding one method is enough to hook a single node
// kind without reimplementing traversal for the rest of the tree.

use super::*;

pub trait Visitor {
    fn visit_module(&mut self, module: &Module) {
        for import in &module.imports {
            self.visit_import(import);
        }
        for item in &module.items {
            self.visit_item(item);
        }
    }

    fn visit_import(&mut self, _import: &ImportStatement) {}

    fn visit_item(&mut self, item: &Item) {
        match item {
            Item::FuncDef(f) => self.visit_func_def(f),
            Item::StructDef(s) => self.visit_struct_def(s),
            Item::EnumDef(e) => self.visit_enum_def(e),
            Item::TraitDef(t) => self.visit_trait_def(t),
            Item::ImplBlock(i) => self.visit_impl_block(i),
            Item::TraitImpl(i) => self.visit_trait_impl(i),
            Item::TypeAlias(_) => {}
        }
    }

    fn visit_func_def(&mut self, func: &FuncDef) {
        if let Some(body) = &func.body {
            self.visit_block(body);
        }
    }

    fn visit_struct_def(&mut self, _struct_def: &StructDef) {}

    fn visit_enum_def(&mut self, _enum_def: &EnumDef) {}

    fn visit_trait_def(&mut self, trait_def: &TraitDef) {
        for method in &trait_def.methods {
            self.visit_func_def(method);
        }
    }

    fn visit_impl_block(&mut self, impl_block: &ImplBlock) {
        for method in &impl_block.methods {
            self.visit_func_def(method);
        }
    }

    fn visit_trait_impl(&mut self, trait_impl: &TraitImpl) {
        for method in &trait_impl.methods {
            self.visit_func_def(method);
        }
    }

    fn visit_block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.visit_stmt(stmt);
        }
        if let Some(expr) = &block.trailing_expr {
            self.visit_expr(expr);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let { pattern, value, .. } => {
                self.visit_pattern(pattern);
                self.visit_expr(value);
            }
            Stmt::Return(expr) | Stmt::Break(expr) => {
                if let Some(expr) = expr {
                    self.visit_expr(expr);
                }
            }
            Stmt::Continue => {}
            Stmt::ExprStatement(expr) => self.visit_expr(expr),
            Stmt::FuncCallStatement { args, .. } => {
                for arg in args {
                    self.visit_expr(arg);
                }
            }
            Stmt::Block(block) => self.visit_block(block),
            Stmt::Item(item) => self.visit_item(item),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) | Expr::Var(_) => {}
            Expr::StructLiteral { fields, .. } => {
                for field in fields {
                    self.visit_expr(&field.value);
                }
            }
            Expr::FieldAccess { object, .. } => self.visit_expr(object),
            Expr::FuncCall { args, .. } => {
                for arg in args {
                    self.visit_expr(arg);
                }
            }
            Expr::Unary { operand, .. } => self.visit_expr(operand),
            Expr::Binary { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            Expr::Range { start, end, .. } => {
                self.visit_expr(start);
                self.visit_expr(end);
            }
            Expr::Assignment { target, value } => {
                self.visit_expr(target);
                self.visit_expr(value);
            }
            Expr::If {
                condition,
                then_block,
                else_ifs,
                else_block,
            } => {
                self.visit_expr(condition);
                self.visit_block(then_block);
                for (cond, block) in else_ifs {
                    self.visit_expr(cond);
                    self.visit_block(block);
                }
                if let Some(block) = else_block {
                    self.visit_block(block);
                }
            }
            Expr::While { condition, body } => {
                self.visit_expr(condition);
                self.visit_block(body);
            }
            Expr::For {
                pattern,
                iterator,
                body,
            } => {
                self.visit_pattern(pattern);
                self.visit_expr(iterator);
                self.visit_block(body);
            }
            Expr::Match { scrutinee, arms } => {
                self.visit_expr(scrutinee);
                for arm in arms {
                    self.visit_pattern(&arm.pattern);
                    if let Some(guard) = &arm.guard {
                        self.visit_expr(guard);
                    }
                    self.visit_expr(&arm.result);
                }
            }
            Expr::Block(block) => self.visit_block(block),
        }
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Wildcard | Pattern::Simple(_) => {}
            Pattern::Literal(expr) => self.visit_expr(expr),
            Pattern::Tuple(elements) => {
                for element in elements {
                    self.visit_pattern(element);
                }
            }
            Pattern::Enum { sub_patterns, .. } => {
                for sub in sub_patterns {
                    self.visit_pattern(sub);
                }
            }
            Pattern::Struct { fields, .. } => {
                for field in fields {
                    self.visit_pattern(&field.pattern);
                }
            }
        }
    }
}
