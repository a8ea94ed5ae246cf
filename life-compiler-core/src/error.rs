// I/O-level failures from module discovery: filesystem operations that
// fail before there is any source text to attach a
// `Diagnostic`'s source excerpt to. Once a file's bytes are in hand, parse
// and duplicate-definition failures are reported as `DiagnosticEngine`s
// instead, richer, and able to point at a specific span.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to canonicalize {path}: {source}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
