// Driver for the `life` front-end compiler. Everything beyond argument
// parsing and wiring stdout/stderr lives in `life-compiler-core`: this
// binary reads source text (or a `src/` tree), calls into the core, and
// reports the outcome with the process exit code (0 success, 1 any
// diagnostic error).

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "lifec")]
#[command(about = "life language front-end compiler", long_about = None)]
#[command(version = life_compiler_core::VERSION)]
struct Cli {
    /// A `.life` file, a directory of modules (`src/`), or `-` to read a
    /// single module from standard input.
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Print the parsed AST as JSON on success instead of a bare "ok".
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.path == Path::new("-") {
        return run_stdin(cli.json);
    }

    if cli.path.is_dir() {
        return run_module_tree(&cli.path);
    }

    run_single_file(&cli.path, cli.json)
}

fn run_stdin(json: bool) -> ExitCode {
    let mut source = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut source) {
        eprintln!("failed to read standard input: {e}");
        return ExitCode::FAILURE;
    }
    report_parse("<stdin>", source, json)
}

fn run_single_file(path: &Path, json: bool) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to read {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    report_parse(&path.to_string_lossy(), source, json)
}

fn report_parse(filename: &str, source: String, json: bool) -> ExitCode {
    match life_compiler_core::parse_file(filename.to_string(), source) {
        Ok(module) => {
            if json {
                match serde_json::to_string_pretty(&module) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("failed to serialize AST: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(engine) => {
            let mut stderr = std::io::stderr();
            let _ = engine.print(&mut stderr);
            ExitCode::FAILURE
        }
    }
}

/// `path` is a directory: treat it as a `src/` root, discover and load
/// every module under it, and report success or the first failing
/// module's diagnostics.
fn run_module_tree(path: &Path) -> ExitCode {
    let mut context = life_compiler_core::SemanticContext::new();
    match context.load_modules(path) {
        Ok(()) => {
            for module_path in context.module_paths() {
                println!("{module_path}");
            }
            ExitCode::SUCCESS
        }
        Err(engine) => {
            let mut stderr = std::io::stderr();
            let _ = engine.print(&mut stderr);
            ExitCode::FAILURE
        }
    }
}
