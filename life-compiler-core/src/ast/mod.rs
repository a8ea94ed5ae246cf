// Abstract syntax tree for the `life` language front end.
//
// The tree is acyclic and owns its nodes by value; variants that would
// otherwise be infinite-sized (expressions, patterns, types nested inside
// themselves) are heap-indirected with `Box`. Every public type derives
// `Serialize`/`Deserialize` so a host driver can emit the tree as JSON
// instead of (or alongside) a Rust-native consumer.

pub mod visitor;

pub use visitor::Visitor;

use serde::{Deserialize, Serialize};

/// A parsed module: the merged imports and items of every `.life` file in
/// one directory (see `module_loader`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Module {
    pub imports: Vec<ImportStatement>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportStatement {
    pub module_path: Vec<String>,
    pub items: Vec<ImportItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportItem {
    pub name: String,
    pub alias: Option<String>,
}

impl ImportItem {
    /// The name this import binds in the importing module: the alias if
    /// one was given, otherwise the imported name itself.
    pub fn bound_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarNameSegment {
    pub name: String,
    pub type_params: Vec<TypeName>,
}

/// A dot-separated value path, e.g. `point.distance` or a single segment
/// like `x`. Non-empty by construction: the parser never produces one
/// with zero segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarName {
    pub segments: Vec<VarNameSegment>,
}

impl VarName {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            segments: vec![VarNameSegment {
                name: name.into(),
                type_params: Vec::new(),
            }],
        }
    }

    /// `true` if this is a single bare identifier with no type arguments,
    /// e.g. the `distance` in a desugared method call.
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1 && self.segments[0].type_params.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeNameSegment {
    pub name: String,
    pub type_params: Vec<TypeName>,
}

/// A dotted, possibly-generic nominal type path, e.g. `Std.Collections.Vec<I32>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathType {
    pub segments: Vec<TypeNameSegment>,
}

impl PathType {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            segments: vec![TypeNameSegment {
                name: name.into(),
                type_params: Vec::new(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeName {
    Path(PathType),
    Function {
        param_types: Vec<TypeName>,
        return_type: Box<TypeName>,
    },
}

impl TypeName {
    pub fn simple(name: impl Into<String>) -> Self {
        TypeName::Path(PathType::simple(name))
    }
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntSuffix {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FloatSuffix {
    F32,
    F64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Integer {
        digits: String,
        suffix: Option<IntSuffix>,
    },
    Float {
        digits: String,
        suffix: Option<FloatSuffix>,
    },
    /// Stored raw, including the surrounding quotes and any escapes.
    String(String),
    /// Stored raw, including the surrounding quotes.
    Char(String),
    Unit,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
    BitNot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldInit {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub result: Expr,
}

/// `{ statements... [trailing_expr] }`. The trailing expression, if
/// present, has no statement-terminating `;` and is the block's value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub trailing_expr: Option<Box<Expr>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Literal(Literal),
    Var(VarName),
    StructLiteral {
        type_name: TypeName,
        fields: Vec<FieldInit>,
    },
    FieldAccess {
        object: Box<Expr>,
        field: String,
    },
    FuncCall {
        name: VarName,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Range {
        start: Box<Expr>,
        end: Box<Expr>,
        inclusive: bool,
    },
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        then_block: Block,
        else_ifs: Vec<(Expr, Block)>,
        else_block: Option<Block>,
    },
    While {
        condition: Box<Expr>,
        body: Block,
    },
    For {
        pattern: Pattern,
        iterator: Box<Expr>,
        body: Block,
    },
    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },
    Block(Block),
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldPattern {
    pub name: String,
    pub pattern: Pattern,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Wildcard,
    Simple(String),
    Literal(Box<Expr>),
    Tuple(Vec<Pattern>),
    Enum {
        type_name: TypeName,
        sub_patterns: Vec<Pattern>,
    },
    Struct {
        type_name: TypeName,
        fields: Vec<FieldPattern>,
    },
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    Let {
        is_mut: bool,
        pattern: Pattern,
        type_annotation: Option<TypeName>,
        value: Expr,
    },
    Return(Option<Expr>),
    Break(Option<Expr>),
    Continue,
    ExprStatement(Expr),
    FuncCallStatement {
        name: VarName,
        args: Vec<Expr>,
    },
    Block(Block),
    /// A local item definition (`fn`, `struct`, etc. nested inside a
    /// function body).
    Item(Box<Item>),
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuncParam {
    pub is_mut: bool,
    pub name: String,
    pub type_annotation: Option<TypeName>,
}

/// A trait bound list attached to a type parameter, e.g. `where T: Eq + Clone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhereBound {
    pub type_param: String,
    pub bounds: Vec<TypeName>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhereClause {
    pub bounds: Vec<WhereBound>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub func_params: Vec<FuncParam>,
    pub return_type: TypeName,
    pub where_clause: Option<WhereClause>,
}

/// A function item; `body` is `None` only for trait method declarations
/// (the body is required for a trait's method *implementation*).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuncDef {
    pub is_pub: bool,
    pub decl: FuncDecl,
    pub body: Option<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub type_annotation: TypeName,
    pub is_pub: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructDef {
    pub is_pub: bool,
    pub name: String,
    pub type_params: Vec<String>,
    pub fields: Vec<StructField>,
    pub where_clause: Option<WhereClause>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumVariant {
    Unit(String),
    Tuple(String, Vec<TypeName>),
    Struct(String, Vec<StructField>),
}

impl EnumVariant {
    pub fn name(&self) -> &str {
        match self {
            EnumVariant::Unit(name) => name,
            EnumVariant::Tuple(name, _) => name,
            EnumVariant::Struct(name, _) => name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDef {
    pub is_pub: bool,
    pub name: String,
    pub type_params: Vec<String>,
    pub variants: Vec<EnumVariant>,
    pub where_clause: Option<WhereClause>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitDef {
    pub is_pub: bool,
    pub name: String,
    pub type_params: Vec<String>,
    pub assoc_types: Vec<String>,
    pub methods: Vec<FuncDef>,
    pub where_clause: Option<WhereClause>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplBlock {
    pub is_pub: bool,
    pub type_name: TypeName,
    pub type_params: Vec<String>,
    pub methods: Vec<FuncDef>,
    pub where_clause: Option<WhereClause>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitImpl {
    pub is_pub: bool,
    pub trait_name: TypeName,
    pub type_name: TypeName,
    pub type_params: Vec<String>,
    pub assoc_type_impls: Vec<(String, TypeName)>,
    pub methods: Vec<FuncDef>,
    pub where_clause: Option<WhereClause>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeAlias {
    pub is_pub: bool,
    pub name: String,
    pub type_params: Vec<String>,
    pub aliased_type: TypeName,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    FuncDef(FuncDef),
    StructDef(StructDef),
    EnumDef(EnumDef),
    TraitDef(TraitDef),
    ImplBlock(ImplBlock),
    TraitImpl(TraitImpl),
    TypeAlias(TypeAlias),
}

impl Item {
    /// The name this item contributes to its module's flat namespace. Impl
    /// blocks and trait impls don't declare a name of their own, they bind
    /// methods onto an existing type, so they return `None` here and are
    /// skipped by the module loader's duplicate-name check.
    pub fn name(&self) -> Option<&str> {
        match self {
            Item::FuncDef(f) => Some(&f.decl.name),
            Item::StructDef(s) => Some(&s.name),
            Item::EnumDef(e) => Some(&e.name),
            Item::TraitDef(t) => Some(&t.name),
            Item::TypeAlias(t) => Some(&t.name),
            Item::ImplBlock(_) | Item::TraitImpl(_) => None,
        }
    }

    pub fn is_pub(&self) -> bool {
        match self {
            Item::FuncDef(f) => f.is_pub,
            Item::StructDef(s) => s.is_pub,
            Item::EnumDef(e) => e.is_pub,
            Item::TraitDef(t) => t.is_pub,
            Item::ImplBlock(i) => i.is_pub,
            Item::TraitImpl(i) => i.is_pub,
            Item::TypeAlias(t) => t.is_pub,
        }
    }
}
