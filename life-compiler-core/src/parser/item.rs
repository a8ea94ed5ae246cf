// Item and module parsing: top-level functions, structs, enums, traits,
// impls, type aliases, and imports.
//
// A module is a sequence of imports followed by a sequence of items; every
// item may carry a leading `pub`. `impl` is the one item form needing a
// one-token decision after its type: a following `for` makes it a trait
// implementation, its absence a plain impl block, both parsed by
// continuing straight through since the grammar is unambiguous once the
// first type name is in hand.

use super::token::TokenKind;
use super::Parser;
use crate::ast::{
    EnumDef, EnumVariant, FuncDecl, FuncDef, FuncParam, ImplBlock, ImportItem, ImportStatement,
    Item, Module, StructDef, StructField, TraitDef, TraitImpl, TypeAlias,
};

impl<'a> Parser<'a> {
    pub(super) fn parse_module(&mut self) -> Option<Module> {
        let mut imports = Vec::new();
        while self.check(TokenKind::Import) {
            imports.push(self.parse_import()?);
        }
        let mut items = Vec::new();
        while !self.at_end() {
            if !self.current_kind().is_item_start() {
                self.error_expected("item");
                return None;
            }
            items.push(self.parse_item()?);
        }
        Some(Module { imports, items })
    }

    fn parse_import(&mut self) -> Option<ImportStatement> {
        self.expect(TokenKind::Import)?;
        let mut module_path = vec![self.expect_identifier()?];
        loop {
            let cp = self.checkpoint();
            if self.consume(TokenKind::Dot).is_none() {
                break;
            }
            if self.check(TokenKind::LBrace) {
                break;
            }
            match self.expect_identifier() {
                Some(name) => module_path.push(name),
                None => {
                    self.restore(cp);
                    break;
                }
            }
        }
        self.expect(TokenKind::LBrace)?;
        let mut items = Vec::new();
        if !self.check(TokenKind::RBrace) {
            items.push(self.parse_import_item()?);
            while self.consume(TokenKind::Comma).is_some() {
                if self.check(TokenKind::RBrace) {
                    break;
                }
                items.push(self.parse_import_item()?);
            }
        }
        self.expect(TokenKind::RBrace)?;
        self.expect(TokenKind::Semi)?;
        Some(ImportStatement { module_path, items })
    }

    fn parse_import_item(&mut self) -> Option<ImportItem> {
        let name = self.expect_identifier()?;
        let alias = if self.consume(TokenKind::As).is_some() {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        Some(ImportItem { name, alias })
    }

    pub(super) fn parse_item(&mut self) -> Option<Item> {
        let is_pub = self.consume(TokenKind::Pub).is_some();
        match self.current_kind() {
            TokenKind::Fn => self.parse_func_item(is_pub).map(Item::FuncDef),
            TokenKind::Struct => self.parse_struct_def(is_pub).map(Item::StructDef),
            TokenKind::Enum => self.parse_enum_def(is_pub).map(Item::EnumDef),
            TokenKind::Trait => self.parse_trait_def(is_pub).map(Item::TraitDef),
            TokenKind::Impl => self.parse_impl_or_trait_impl(is_pub),
            TokenKind::Type => self.parse_type_alias(is_pub).map(Item::TypeAlias),
            _ => {
                self.error_expected("item");
                None
            }
        }
    }

    fn parse_func_decl(&mut self) -> Option<FuncDecl> {
        self.expect(TokenKind::Fn)?;
        let name = self.expect_identifier()?;
        let type_params = self.parse_type_params_opt()?;
        self.expect(TokenKind::LParen)?;
        let func_params = self.parse_func_params()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Colon)?;
        let return_type = self.parse_type_name()?;
        let where_clause = self.parse_where_clause_opt()?;
        Some(FuncDecl {
            name,
            type_params,
            func_params,
            return_type,
            where_clause,
        })
    }

    fn parse_func_params(&mut self) -> Option<Vec<FuncParam>> {
        let mut params = Vec::new();
        if self.check(TokenKind::RParen) {
            return Some(params);
        }
        params.push(self.parse_func_param()?);
        while self.consume(TokenKind::Comma).is_some() {
            if self.check(TokenKind::RParen) {
                break;
            }
            params.push(self.parse_func_param()?);
        }
        Some(params)
    }

    fn parse_func_param(&mut self) -> Option<FuncParam> {
        let is_mut = self.consume(TokenKind::Mut).is_some();
        let name = self.expect_identifier()?;
        let type_annotation = if self.consume(TokenKind::Colon).is_some() {
            Some(self.parse_type_name()?)
        } else {
            None
        };
        Some(FuncParam {
            is_mut,
            name,
            type_annotation,
        })
    }

    /// A `fn` item with a required body: module-level functions, and
    /// methods inside an `impl`/trait-impl block (trait *declarations* are
    /// the one place a body is optional; see `parse_trait_method`).
    fn parse_func_item(&mut self, is_pub: bool) -> Option<FuncDef> {
        let decl = self.parse_func_decl()?;
        let body = Some(self.parse_block()?);
        Some(FuncDef {
            is_pub,
            decl,
            body,
        })
    }

    fn parse_impl_method(&mut self) -> Option<FuncDef> {
        let is_pub = self.consume(TokenKind::Pub).is_some();
        self.parse_func_item(is_pub)
    }

    fn parse_trait_method(&mut self) -> Option<FuncDef> {
        let is_pub = self.consume(TokenKind::Pub).is_some();
        let decl = self.parse_func_decl()?;
        let body = if self.consume(TokenKind::Semi).is_some() {
            None
        } else {
            Some(self.parse_block()?)
        };
        Some(FuncDef {
            is_pub,
            decl,
            body,
        })
    }

    fn parse_struct_def(&mut self, is_pub: bool) -> Option<StructDef> {
        self.expect(TokenKind::Struct)?;
        let name = self.expect_identifier()?;
        let type_params = self.parse_type_params_opt()?;
        let where_clause = self.parse_where_clause_opt()?;
        self.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            fields.push(self.parse_struct_field()?);
            if self.consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Some(StructDef {
            is_pub,
            name,
            type_params,
            fields,
            where_clause,
        })
    }

    fn parse_struct_field(&mut self) -> Option<StructField> {
        let is_pub = self.consume(TokenKind::Pub).is_some();
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Colon)?;
        let type_annotation = self.parse_type_name()?;
        Some(StructField {
            name,
            type_annotation,
            is_pub,
        })
    }

    fn parse_enum_def(&mut self, is_pub: bool) -> Option<EnumDef> {
        self.expect(TokenKind::Enum)?;
        let name = self.expect_identifier()?;
        let type_params = self.parse_type_params_opt()?;
        let where_clause = self.parse_where_clause_opt()?;
        self.expect(TokenKind::LBrace)?;
        let mut variants = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            variants.push(self.parse_enum_variant()?);
            if self.consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Some(EnumDef {
            is_pub,
            name,
            type_params,
            variants,
            where_clause,
        })
    }

    fn parse_enum_variant(&mut self) -> Option<EnumVariant> {
        let name = self.expect_identifier()?;
        if self.consume(TokenKind::LParen).is_some() {
            let mut types = Vec::new();
            if !self.check(TokenKind::RParen) {
                types.push(self.parse_type_name()?);
                while self.consume(TokenKind::Comma).is_some() {
                    if self.check(TokenKind::RParen) {
                        break;
                    }
                    types.push(self.parse_type_name()?);
                }
            }
            self.expect(TokenKind::RParen)?;
            return Some(EnumVariant::Tuple(name, types));
        }
        if self.consume(TokenKind::LBrace).is_some() {
            let mut fields = Vec::new();
            while !self.check(TokenKind::RBrace) && !self.at_end() {
                fields.push(self.parse_struct_field()?);
                if self.consume(TokenKind::Comma).is_none() {
                    break;
                }
            }
            self.expect(TokenKind::RBrace)?;
            return Some(EnumVariant::Struct(name, fields));
        }
        Some(EnumVariant::Unit(name))
    }

    fn parse_trait_def(&mut self, is_pub: bool) -> Option<TraitDef> {
        self.expect(TokenKind::Trait)?;
        let name = self.expect_identifier()?;
        let type_params = self.parse_type_params_opt()?;
        let where_clause = self.parse_where_clause_opt()?;
        self.expect(TokenKind::LBrace)?;
        let mut assoc_types = Vec::new();
        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            if self.check(TokenKind::Type) {
                self.advance();
                assoc_types.push(self.expect_identifier()?);
                self.expect(TokenKind::Semi)?;
            } else {
                methods.push(self.parse_trait_method()?);
            }
        }
        self.expect(TokenKind::RBrace)?;
        Some(TraitDef {
            is_pub,
            name,
            type_params,
            assoc_types,
            methods,
            where_clause,
        })
    }

    fn parse_impl_or_trait_impl(&mut self, is_pub: bool) -> Option<Item> {
        self.expect(TokenKind::Impl)?;
        let type_params = self.parse_type_params_opt()?;
        let first_type = self.parse_type_name()?;

        if self.consume(TokenKind::For).is_some() {
            let trait_name = first_type;
            let type_name = self.parse_type_name()?;
            let where_clause = self.parse_where_clause_opt()?;
            self.expect(TokenKind::LBrace)?;
            let mut assoc_type_impls = Vec::new();
            let mut methods = Vec::new();
            while !self.check(TokenKind::RBrace) && !self.at_end() {
                if self.check(TokenKind::Type) {
                    self.advance();
                    let name = self.expect_identifier()?;
                    self.expect(TokenKind::Eq)?;
                    let ty = self.parse_type_name()?;
                    self.expect(TokenKind::Semi)?;
                    assoc_type_impls.push((name, ty));
                } else {
                    methods.push(self.parse_impl_method()?);
                }
            }
            self.expect(TokenKind::RBrace)?;
            return Some(Item::TraitImpl(TraitImpl {
                is_pub,
                trait_name,
                type_name,
                type_params,
                assoc_type_impls,
                methods,
                where_clause,
            }));
        }

        let type_name = first_type;
        let where_clause = self.parse_where_clause_opt()?;
        self.expect(TokenKind::LBrace)?;
        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            methods.push(self.parse_impl_method()?);
        }
        self.expect(TokenKind::RBrace)?;
        Some(Item::ImplBlock(ImplBlock {
            is_pub,
            type_name,
            type_params,
            methods,
            where_clause,
        }))
    }

    fn parse_type_alias(&mut self, is_pub: bool) -> Option<TypeAlias> {
        self.expect(TokenKind::Type)?;
        let name = self.expect_identifier()?;
        let type_params = self.parse_type_params_opt()?;
        self.expect(TokenKind::Eq)?;
        let aliased_type = self.parse_type_name()?;
        self.expect(TokenKind::Semi)?;
        Some(TypeAlias {
            is_pub,
            name,
            type_params,
            aliased_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeName;

    fn parse_one_item(source: &str) -> Item {
        let mut parser = Parser::new(source);
        parser.parse_item().expect("item should parse")
    }

    #[test]
    fn func_def_with_generics_and_where() {
        let item = parse_one_item(
            "pub fn max<T>(a: T, b: T): T where T: Ord { a }",
        );
        match item {
            Item::FuncDef(f) => {
                assert!(f.is_pub);
                assert_eq!(f.decl.type_params, vec!["T".to_string()]);
                assert_eq!(f.decl.func_params.len(), 2);
                assert!(f.decl.where_clause.is_some());
                assert!(f.body.is_some());
            }
            other => panic!("expected func def, got {other:?}"),
        }
    }

    #[test]
    fn struct_def_with_pub_fields() {
        let item = parse_one_item("struct Point { pub x: F64, pub y: F64 }");
        match item {
            Item::StructDef(s) => {
                assert_eq!(s.fields.len(), 2);
                assert!(s.fields[0].is_pub);
            }
            other => panic!("expected struct def, got {other:?}"),
        }
    }

    #[test]
    fn enum_def_with_mixed_variant_shapes() {
        let item = parse_one_item(
            "enum Shape { Circle(F64), Rect { w: F64, h: F64 }, Empty }",
        );
        match item {
            Item::EnumDef(e) => {
                assert_eq!(e.variants.len(), 3);
                assert!(matches!(e.variants[0], EnumVariant::Tuple(_, _)));
                assert!(matches!(e.variants[1], EnumVariant::Struct(_, _)));
                assert!(matches!(e.variants[2], EnumVariant::Unit(_)));
            }
            other => panic!("expected enum def, got {other:?}"),
        }
    }

    #[test]
    fn trait_def_with_assoc_type_and_declared_method() {
        let item = parse_one_item("trait Iterator { type Item; fn next(self): Item; }");
        match item {
            Item::TraitDef(t) => {
                assert_eq!(t.assoc_types, vec!["Item".to_string()]);
                assert_eq!(t.methods.len(), 1);
                assert!(t.methods[0].body.is_none());
            }
            other => panic!("expected trait def, got {other:?}"),
        }
    }

    #[test]
    fn plain_impl_block() {
        let item = parse_one_item("impl Point { fn origin(): Point { Point { x: 0, y: 0 } } }");
        assert!(matches!(item, Item::ImplBlock(_)));
    }

    #[test]
    fn trait_impl_requires_for() {
        let item = parse_one_item(
            "impl Eq for Point { fn eq(a: Point, b: Point): Bool { true } }",
        );
        match item {
            Item::TraitImpl(t) => {
                assert!(matches!(t.trait_name, TypeName::Path(_)));
                assert_eq!(t.methods.len(), 1);
            }
            other => panic!("expected trait impl, got {other:?}"),
        }
    }

    #[test]
    fn type_alias() {
        let item = parse_one_item("type IntList<T> = Std.Collections.Vec<T>;");
        assert!(matches!(item, Item::TypeAlias(_)));
    }

    #[test]
    fn module_collects_imports_then_items() {
        let mut parser = Parser::new(
            "import Std.Collections.{Vec, HashMap as Map};\nstruct Foo { x: I32 }\n",
        );
        let module = parser.parse_module().expect("module should parse");
        assert_eq!(module.imports.len(), 1);
        assert_eq!(module.imports[0].module_path, vec!["Std", "Collections"]);
        assert_eq!(module.imports[0].items[1].bound_name(), "Map");
        assert_eq!(module.items.len(), 1);
    }
}
