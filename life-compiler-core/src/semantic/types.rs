// Type values for later compiler passes. The parser and module loader never
// construct these, they operate on `TypeName` syntax, but a type checker
// built on top of this crate needs a semantic type representation to
// compare and print, so this crate provides the value type and leaves
// unification/inference to that later pass.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Char,
    String,
}

impl PrimitiveKind {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            PrimitiveKind::I8 => "I8",
            PrimitiveKind::I16 => "I16",
            PrimitiveKind::I32 => "I32",
            PrimitiveKind::I64 => "I64",
            PrimitiveKind::U8 => "U8",
            PrimitiveKind::U16 => "U16",
            PrimitiveKind::U32 => "U32",
            PrimitiveKind::U64 => "U64",
            PrimitiveKind::F32 => "F32",
            PrimitiveKind::F64 => "F64",
            PrimitiveKind::Bool => "Bool",
            PrimitiveKind::Char => "Char",
            PrimitiveKind::String => "String",
        }
    }

    /// Parses a primitive's name, the inverse of `mnemonic`, used when a
    /// type checker resolves a `TypeName` path segment against built-ins
    /// before falling back to `SemanticContext::resolve_type_name`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "I8" => PrimitiveKind::I8,
            "I16" => PrimitiveKind::I16,
            "I32" => PrimitiveKind::I32,
            "I64" => PrimitiveKind::I64,
            "U8" => PrimitiveKind::U8,
            "U16" => PrimitiveKind::U16,
            "U32" => PrimitiveKind::U32,
            "U64" => PrimitiveKind::U64,
            "F32" => PrimitiveKind::F32,
            "F64" => PrimitiveKind::F64,
            "Bool" => PrimitiveKind::Bool,
            "Char" => PrimitiveKind::Char,
            "String" => PrimitiveKind::String,
            _ => return None,
        })
    }
}

/// A struct field or tuple-variant slot's shape. A type checker resolves
/// each field's `TypeName` to a `Type` lazily rather than this crate
/// eagerly converting the whole item graph up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    pub name: String,
    pub ty: Box<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Primitive(PrimitiveKind),
    Unit,
    /// Sentinel for "a type error already occurred here": lets a checker
    /// keep evaluating an expression tree after reporting one diagnostic
    /// without also flagging every type this error propagates through.
    Error,
    Struct {
        name: String,
        type_params: Vec<String>,
        fields: Vec<FieldType>,
    },
    Enum {
        name: String,
        type_params: Vec<String>,
        variants: Vec<String>,
    },
    Function {
        params: Vec<Type>,
        result: Box<Type>,
    },
    Array {
        elem: Box<Type>,
        length: Option<usize>,
    },
    Tuple(Vec<Type>),
    /// An unbound type parameter, e.g. the `T` in `struct Box<T> { value: T }`.
    Generic(String),
}

impl Type {
    pub fn to_display_string(&self) -> String {
        match self {
            Type::Primitive(p) => p.mnemonic().to_string(),
            Type::Unit => "()".to_string(),
            Type::Error => "<error>".to_string(),
            Type::Struct { name, .. } => name.clone(),
            Type::Enum { name, .. } => name.clone(),
            Type::Function { params, result } => {
                let params = params
                    .iter()
                    .map(Type::to_display_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("fn({params}): {}", result.to_display_string())
            }
            Type::Array { elem, length: Some(n) } => {
                format!("[{}; {}]", elem.to_display_string(), n)
            }
            Type::Array { elem, length: None } => format!("[{}]", elem.to_display_string()),
            Type::Tuple(elements) => {
                let inner = elements
                    .iter()
                    .map(Type::to_display_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({inner})")
            }
            Type::Generic(name) => name.clone(),
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}
