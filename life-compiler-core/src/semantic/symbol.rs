// Symbol table for later compiler passes: a scope chain of name -> Symbol
// maps, kept separate for the value namespace (functions and variables
// share one) and the type namespace.

use std::collections::HashMap;

use super::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Type,
    Trait,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: Type,
    pub generic_params: Vec<String>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, ty: Type) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            generic_params: Vec::new(),
        }
    }

    pub fn with_generic_params(mut self, params: Vec<String>) -> Self {
        self.generic_params = params;
        self
    }
}

/// One level of the scope chain. `values` holds the shared
/// function/variable namespace; `types` holds struct/enum/trait names.
#[derive(Debug, Default)]
struct Scope {
    values: HashMap<String, Symbol>,
    types: HashMap<String, Symbol>,
}

/// A stack of scopes, innermost last. Lookup walks from the top of the
/// stack outward, matching lexical shadowing: a `let` in a block scope
/// hides a same-named function-parameter binding, which hides a module-level
/// item.
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { scopes: vec![Scope::default()] }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "cannot pop the root scope");
        self.scopes.pop();
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn current_mut(&mut self) -> &mut Scope {
        self.scopes.last_mut().expect("scope stack is never empty")
    }

    /// Binds a value-namespace symbol (`Variable`/`Function`) in the
    /// innermost scope, overwriting any existing binding of that name in
    /// the same scope (shadowing within a scope is legal; the caller is
    /// responsible for diagnosing true duplicate-in-one-scope errors before
    /// calling this, if the language forbids them there).
    pub fn declare_value(&mut self, symbol: Symbol) {
        self.current_mut().values.insert(symbol.name.clone(), symbol);
    }

    pub fn declare_type(&mut self, symbol: Symbol) {
        self.current_mut().types.insert(symbol.name.clone(), symbol);
    }

    /// Looks up a value-namespace name (variable or function), walking
    /// outward from the innermost scope.
    pub fn lookup_value(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|s| s.values.get(name))
    }

    /// Looks up a type-namespace name (struct/enum/trait), walking outward
    /// from the innermost scope.
    pub fn lookup_type(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|s| s.types.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scope_shadows_outer() {
        let mut table = SymbolTable::new();
        table.declare_value(Symbol::new("x", SymbolKind::Variable, Type::Unit));
        table.push_scope();
        table.declare_value(Symbol::new(
            "x",
            SymbolKind::Variable,
            Type::Primitive(super::super::types::PrimitiveKind::I32),
        ));
        assert_eq!(table.lookup_value("x").unwrap().ty, Type::Primitive(super::super::types::PrimitiveKind::I32));
        table.pop_scope();
        assert_eq!(table.lookup_value("x").unwrap().ty, Type::Unit);
    }

    #[test]
    fn values_and_types_are_separate_namespaces() {
        let mut table = SymbolTable::new();
        table.declare_value(Symbol::new("Point", SymbolKind::Function, Type::Unit));
        assert!(table.lookup_type("Point").is_none());
        assert!(table.lookup_value("Point").is_some());
    }

    #[test]
    fn lookup_outside_any_scope_is_absent() {
        let table = SymbolTable::new();
        assert!(table.lookup_value("nope").is_none());
    }
}
