// Module discovery/loading, cross-module name resolution, and the symbol
// table / type representation a later type-checking pass builds on.

pub mod module_loader;
pub mod resolve;
pub mod symbol;
pub mod types;

pub use module_loader::{discover_modules, dir_to_module, load_module, ModuleDescriptor};
pub use resolve::SemanticContext;
pub use symbol::{Symbol, SymbolKind, SymbolTable};
pub use types::{FieldType, PrimitiveKind, Type};
