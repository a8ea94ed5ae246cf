// Cross-module name resolution. `SemanticContext` owns every loaded module
// by dotted path and answers type/function/variable lookups given a
// current-module context and that module's imports. It never mutates its
// module map once `load_modules` returns: writable only during loading,
// immutable for every lookup after.

use std::path::Path;

use indexmap::IndexMap;

use crate::ast::{FuncDef, Item, Module, TypeName};
use crate::diagnostic::DiagnosticEngine;

use super::module_loader;

#[derive(Debug, Default)]
pub struct SemanticContext {
    modules: IndexMap<String, Module>,
}

impl SemanticContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovers and loads every module under `src_root`, leaving whatever
    /// modules loaded before a failure in place.
    pub fn load_modules(&mut self, src_root: &Path) -> Result<(), DiagnosticEngine> {
        let descriptors = module_loader::discover_modules(src_root).map_err(|e| {
            let mut engine = DiagnosticEngine::new(src_root.to_string_lossy().into_owned(), String::new());
            engine.add_error(crate::source::Range::default(), e.to_string());
            engine
        })?;

        for descriptor in &descriptors {
            if descriptor.path.is_empty() {
                // Rejected (symlinked) module directory: skip it silently.
                continue;
            }
            let module = module_loader::load_module(descriptor)?;
            self.modules.insert(descriptor.path_string(), module);
        }
        Ok(())
    }

    pub fn get_module(&self, path: &str) -> Option<&Module> {
        self.modules.get(path)
    }

    /// Every loaded module's dotted path, in discovery order.
    pub fn module_paths(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    fn is_type_def(item: &Item) -> bool {
        matches!(
            item,
            Item::StructDef(_) | Item::EnumDef(_) | Item::TraitDef(_) | Item::TypeAlias(_)
        )
    }

    pub fn find_type_def(&self, module_path: &str, type_name: &str) -> Option<&Item> {
        let module = self.get_module(module_path)?;
        module
            .items
            .iter()
            .find(|item| Self::is_type_def(item) && item.name() == Some(type_name))
    }

    pub fn find_func_def(&self, module_path: &str, func_name: &str) -> Option<&FuncDef> {
        let module = self.get_module(module_path)?;
        module.items.iter().find_map(|item| match item {
            Item::FuncDef(f) if f.decl.name == func_name => Some(f),
            _ => None,
        })
    }

    /// Scans `ImplBlock`/`TraitImpl` items bound to `type_name` for a method
    /// named `method_name`.
    pub fn find_method_def(&self, module_path: &str, type_name: &str, method_name: &str) -> Option<&FuncDef> {
        let module = self.get_module(module_path)?;
        module.items.iter().find_map(|item| match item {
            Item::ImplBlock(block) if type_name_matches(&block.type_name, type_name) => {
                block.methods.iter().find(|m| m.decl.name == method_name)
            }
            Item::TraitImpl(impl_) if type_name_matches(&impl_.type_name, type_name) => {
                impl_.methods.iter().find(|m| m.decl.name == method_name)
            }
            _ => None,
        })
    }

    /// Resolves a type name used in `current_module`: two-or-more segments
    /// are a module path plus symbol and require `is_pub`; one segment
    /// checks local items first, then imports by alias or name, again
    /// requiring `is_pub` on the imported item.
    pub fn resolve_type_name(&self, current_module: &str, name: &TypeName) -> Option<(String, &Item)> {
        let path = match name {
            TypeName::Path(p) => p,
            TypeName::Function { .. } => return None,
        };
        let segments: Vec<&str> = path.segments.iter().map(|s| s.name.as_str()).collect();
        if segments.is_empty() {
            return None;
        }

        if segments.len() >= 2 {
            let (module_path, symbol) = segments.split_at(segments.len() - 1);
            let module_path = module_path.join(".");
            let item = self.find_type_def(&module_path, symbol[0])?;
            return item.is_pub().then_some((module_path, item));
        }

        let symbol = segments[0];
        if let Some(item) = self.find_type_def(current_module, symbol) {
            return Some((current_module.to_string(), item));
        }

        let module = self.get_module(current_module)?;
        for import in &module.imports {
            for use_item in &import.items {
                if use_item.bound_name() == symbol {
                    let imported_module = import.module_path.join(".");
                    if let Some(item) = self.find_type_def(&imported_module, &use_item.name) {
                        if item.is_pub() {
                            return Some((imported_module, item));
                        }
                    }
                }
            }
        }
        None
    }

    /// Resolves a value (variable or function) name used in
    /// `current_module`, analogous to `resolve_type_name` but over the
    /// value namespace: same algorithm, different `find_*` scan.
    pub fn resolve_var_name(
        &self,
        current_module: &str,
        name: &crate::ast::VarName,
    ) -> Option<(String, &FuncDef)> {
        let segments: Vec<&str> = name.segments.iter().map(|s| s.name.as_str()).collect();
        if segments.is_empty() {
            return None;
        }

        if segments.len() >= 2 {
            let (module_path, symbol) = segments.split_at(segments.len() - 1);
            let module_path = module_path.join(".");
            let func = self.find_func_def(&module_path, symbol[0])?;
            return func.is_pub.then_some((module_path, func));
        }

        let symbol = segments[0];
        if let Some(func) = self.find_func_def(current_module, symbol) {
            return Some((current_module.to_string(), func));
        }

        let module = self.get_module(current_module)?;
        for import in &module.imports {
            for use_item in &import.items {
                if use_item.bound_name() == symbol {
                    let imported_module = import.module_path.join(".");
                    if let Some(func) = self.find_func_def(&imported_module, &use_item.name) {
                        if func.is_pub {
                            return Some((imported_module, func));
                        }
                    }
                }
            }
        }
        None
    }
}

fn type_name_matches(name: &TypeName, expected: &str) -> bool {
    match name {
        TypeName::Path(p) => p.segments.last().map(|s| s.name.as_str()) == Some(expected),
        TypeName::Function { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FuncDecl, ImportItem, ImportStatement, StructDef, StructField};

    fn pub_struct(name: &str) -> Item {
        Item::StructDef(StructDef {
            is_pub: true,
            name: name.to_string(),
            type_params: Vec::new(),
            fields: vec![StructField {
                name: "value".to_string(),
                type_annotation: TypeName::simple("String"),
                is_pub: true,
            }],
            where_clause: None,
        })
    }

    fn local_struct(name: &str) -> Item {
        Item::StructDef(StructDef {
            is_pub: false,
            name: name.to_string(),
            type_params: Vec::new(),
            fields: Vec::new(),
            where_clause: None,
        })
    }

    fn func(name: &str, is_pub: bool) -> FuncDef {
        FuncDef {
            is_pub,
            decl: FuncDecl {
                name: name.to_string(),
                type_params: Vec::new(),
                func_params: Vec::new(),
                return_type: TypeName::simple("I32"),
                where_clause: None,
            },
            body: None,
        }
    }

    #[test]
    fn local_definition_wins_over_import_of_same_name() {
        let mut ctx = SemanticContext::new();
        let mut main = Module::default();
        main.imports.push(ImportStatement {
            module_path: vec!["Geometry".to_string()],
            items: vec![ImportItem { name: "Point".to_string(), alias: None }],
        });
        main.items.push(local_struct("Point"));
        ctx.modules.insert("Main".to_string(), main);

        let mut geometry = Module::default();
        geometry.items.push(pub_struct("Point"));
        ctx.modules.insert("Geometry".to_string(), geometry);

        let (module, _) = ctx
            .resolve_type_name("Main", &TypeName::simple("Point"))
            .expect("Point should resolve");
        assert_eq!(module, "Main");
    }

    #[test]
    fn fully_qualified_lookup_requires_pub() {
        let mut ctx = SemanticContext::new();
        let mut geometry = Module::default();
        geometry.items.push(local_struct("Hidden"));
        ctx.modules.insert("Geometry".to_string(), geometry);

        let qualified = TypeName::Path(crate::ast::PathType {
            segments: vec![
                crate::ast::TypeNameSegment { name: "Geometry".to_string(), type_params: Vec::new() },
                crate::ast::TypeNameSegment { name: "Hidden".to_string(), type_params: Vec::new() },
            ],
        });
        assert!(ctx.resolve_type_name("Main", &qualified).is_none());
    }

    #[test]
    fn imported_function_resolves_through_alias() {
        let mut ctx = SemanticContext::new();
        let mut main = Module::default();
        main.imports.push(ImportStatement {
            module_path: vec!["Math".to_string()],
            items: vec![ImportItem { name: "square".to_string(), alias: Some("sq".to_string()) }],
        });
        ctx.modules.insert("Main".to_string(), main);

        let mut math = Module::default();
        math.items.push(Item::FuncDef(func("square", true)));
        ctx.modules.insert("Math".to_string(), math);

        let (module, found) = ctx
            .resolve_var_name("Main", &crate::ast::VarName::simple("sq"))
            .expect("sq should resolve via alias");
        assert_eq!(module, "Math");
        assert_eq!(found.decl.name, "square");
    }

    #[test]
    fn non_pub_import_target_does_not_resolve() {
        let mut ctx = SemanticContext::new();
        let mut main = Module::default();
        main.imports.push(ImportStatement {
            module_path: vec!["Math".to_string()],
            items: vec![ImportItem { name: "internal".to_string(), alias: None }],
        });
        ctx.modules.insert("Main".to_string(), main);

        let mut math = Module::default();
        math.items.push(Item::FuncDef(func("internal", false)));
        ctx.modules.insert("Math".to_string(), math);

        assert!(ctx
            .resolve_var_name("Main", &crate::ast::VarName::simple("internal"))
            .is_none());
    }

    #[test]
    fn find_method_def_scans_impl_blocks() {
        let mut ctx = SemanticContext::new();
        let mut geometry = Module::default();
        geometry.items.push(Item::ImplBlock(crate::ast::ImplBlock {
            is_pub: false,
            type_name: TypeName::simple("Point"),
            type_params: Vec::new(),
            methods: vec![func("distance", true)],
            where_clause: None,
        }));
        ctx.modules.insert("Geometry".to_string(), geometry);

        let method = ctx
            .find_method_def("Geometry", "Point", "distance")
            .expect("distance method should be found");
        assert_eq!(method.decl.name, "distance");
    }
}
