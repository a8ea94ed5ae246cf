// Front-end compiler core for the `life` language.
//
// Turns a directory of `.life` source files into a validated,
// cross-referenced tree of declarations suitable for later type-checking
// and code generation. The crate has six components: source map &
// diagnostics (`source`, `diagnostic`), the AST model (`ast`), the
// recursive-descent parser (`parser`), module discovery and loading
// (`semantic::module_loader`), cross-module name resolution
// (`semantic::resolve`), and the symbol table / type representation a
// later pass builds on (`semantic::symbol`, `semantic::types`).

pub mod ast;
pub mod diagnostic;
pub mod error;
pub mod parser;
pub mod semantic;
pub mod source;

pub use ast::Module;
pub use diagnostic::{Diagnostic, DiagnosticEngine, Level};
pub use error::LoadError;
pub use semantic::SemanticContext;
pub use source::{Position, Range, SourceMap};

/// Compiler version, read from this crate's own `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parses one module's worth of source text.
pub fn parse_file(filename: impl Into<String>, source: impl Into<String>) -> Result<Module, DiagnosticEngine> {
    parser::parse_module(filename, source)
}
