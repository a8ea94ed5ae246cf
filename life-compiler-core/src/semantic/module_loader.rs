// Module discovery and loading from the filesystem.
//
// A module is one directory: every `.life` file directly inside it
// contributes items and imports to that module. The loader never descends
// into a file's contents to find a module declaration; the path is wholly
// derived from directory names relative to the `src/` root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::Module;
use crate::diagnostic::DiagnosticEngine;
use crate::error::LoadError;

/// One discovered module: its dotted path, the directory it lives in, and
/// the `.life` files found directly inside that directory.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    pub path: Vec<String>,
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
}

impl ModuleDescriptor {
    /// Dot-joined path, e.g. `Std.Collections`.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

/// Converts a lowercase `snake_case` directory name to `Camel_Snake_Case`:
/// the first character of each `_`-separated run is uppercased, every other
/// character in the run is lowercased (so mixed-case input like `HTTP_server`
/// folds to `Http_Server` rather than being left alone); runs of
/// underscores are preserved as separators.
pub fn dir_to_module(dir_name: &str) -> String {
    let mut result = String::with_capacity(dir_name.len());
    let mut capitalize_next = true;
    for c in dir_name.chars() {
        if c == '_' {
            result.push('_');
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }
    result
}

/// Derives a module's path components from its directory relative to
/// `src_root`. Returns an empty vector (the "rejected" sentinel) if
/// `module_dir` is itself a symlink, checked before canonicalization since
/// canonicalizing would silently follow it. `src_root` may itself be
/// reached through a symlink; only the module directory's own symlink-ness
/// is rejected.
pub fn derive_module_path(src_root: &Path, module_dir: &Path) -> Result<Vec<String>, LoadError> {
    if fs::symlink_metadata(module_dir)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
    {
        return Ok(Vec::new());
    }

    let canonical_root = fs::canonicalize(src_root).map_err(|source| LoadError::Canonicalize {
        path: src_root.to_path_buf(),
        source,
    })?;
    let canonical_dir = fs::canonicalize(module_dir).map_err(|source| LoadError::Canonicalize {
        path: module_dir.to_path_buf(),
        source,
    })?;

    let relative = match canonical_dir.strip_prefix(&canonical_root) {
        Ok(rel) => rel,
        Err(_) => return Ok(Vec::new()),
    };

    Ok(relative
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(os) => Some(dir_to_module(&os.to_string_lossy())),
            _ => None,
        })
        .collect())
}

/// Recursively enumerates `src_root` for `.life` files, grouping them by
/// immediate parent directory into one `ModuleDescriptor` per directory.
/// Files within a descriptor are sorted by path so duplicate-definition
/// checks are deterministic regardless of the platform's readdir order.
pub fn discover_modules(src_root: &Path) -> Result<Vec<ModuleDescriptor>, LoadError> {
    let canonical_root = fs::canonicalize(src_root).map_err(|source| LoadError::Canonicalize {
        path: src_root.to_path_buf(),
        source,
    })?;

    let mut by_dir: Vec<(PathBuf, Vec<PathBuf>)> = Vec::new();
    walk(&canonical_root, &mut by_dir)?;

    let mut descriptors = Vec::with_capacity(by_dir.len());
    for (dir, mut files) in by_dir {
        files.sort();
        let path = derive_module_path(&canonical_root, &dir)?;
        descriptors.push(ModuleDescriptor {
            path,
            directory: dir,
            files,
        });
    }
    Ok(descriptors)
}

fn walk(dir: &Path, by_dir: &mut Vec<(PathBuf, Vec<PathBuf>)>) -> Result<(), LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| LoadError::ReadDir {
            path: path.clone(),
            source,
        })?;
        if file_type.is_dir() {
            walk(&path, by_dir)?;
        } else if file_type.is_file() && path.extension().map(|e| e == "life").unwrap_or(false) {
            match by_dir.iter_mut().find(|(d, _)| d == dir) {
                Some((_, files)) => files.push(path),
                None => by_dir.push((dir.to_path_buf(), vec![path])),
            }
        }
    }
    Ok(())
}

/// Parses every file in `descriptor` and merges them into one `Module`:
/// imports concatenate, items concatenate, and a duplicate item name across
/// any two files of the module fails the whole load (a single flat
/// namespace per module, categories included). Returns the engine holding
/// the failing diagnostic(s) on the first parse or duplicate-name failure.
pub fn load_module(descriptor: &ModuleDescriptor) -> Result<Module, DiagnosticEngine> {
    let mut merged = Module::default();
    let mut seen_names: Vec<String> = Vec::new();

    for file in &descriptor.files {
        let filename = file.to_string_lossy().into_owned();
        let source = fs::read_to_string(file).map_err(|source_err| {
            let mut engine = DiagnosticEngine::new(filename.clone(), String::new());
            engine.add_error(
                crate::source::Range::default(),
                format!("failed to read {}: {}", filename, source_err),
            );
            engine
        })?;

        let module = crate::parser::parse_module(filename, source)?;

        for item in &module.items {
            if let Some(name) = item.name() {
                if seen_names.iter().any(|n| n == name) {
                    let mut engine = DiagnosticEngine::new(
                        descriptor.directory.to_string_lossy().into_owned(),
                        String::new(),
                    );
                    engine.add_error(
                        crate::source::Range::default(),
                        format!("duplicate definition of '{name}'"),
                    );
                    return Err(engine);
                }
                seen_names.push(name.to_string());
            }
        }

        merged.imports.extend(module.imports);
        merged.items.extend(module.items);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn dir_to_module_folds_case() {
        assert_eq!(dir_to_module("geometry"), "Geometry");
        assert_eq!(dir_to_module("user_profile"), "User_Profile");
        assert_eq!(dir_to_module("HTTP_server"), "Http_Server");
    }

    #[test]
    fn dir_to_module_is_idempotent() {
        assert_eq!(dir_to_module("User_Profile"), "User_Profile");
    }

    #[test]
    fn discover_modules_groups_by_directory() {
        let tmp = std::env::temp_dir().join(format!("life_test_discover_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        write(&tmp.join("src/geometry/point.life"), "");
        write(&tmp.join("src/std/collections/vec.life"), "");

        let descriptors = discover_modules(&tmp.join("src")).unwrap();
        let mut paths: Vec<String> = descriptors.iter().map(|d| d.path_string()).collect();
        paths.sort();
        assert_eq!(paths, vec!["Geometry".to_string(), "Std.Collections".to_string()]);

        fs::remove_dir_all(&tmp).unwrap();
    }

    #[test]
    fn symlinked_module_directory_is_rejected() {
        let tmp = std::env::temp_dir().join(format!("life_test_symlink_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        write(&tmp.join("src/geometry/point.life"), "");
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(tmp.join("src/geometry"), tmp.join("src/geo_link")).unwrap();
            let root = fs::canonicalize(tmp.join("src")).unwrap();
            let path = derive_module_path(&root, &tmp.join("src/geo_link")).unwrap();
            assert!(path.is_empty());
        }
        fs::remove_dir_all(&tmp).unwrap();
    }

    #[test]
    fn load_module_rejects_duplicate_names() {
        let tmp = std::env::temp_dir().join(format!("life_test_dup_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        write(&tmp.join("src/m/a.life"), "pub fn helper(): I32 { return 1; }");
        write(&tmp.join("src/m/b.life"), "pub fn helper(): I32 { return 2; }");

        let root = fs::canonicalize(tmp.join("src")).unwrap();
        let descriptors = discover_modules(&root).unwrap();
        let descriptor = descriptors.into_iter().next().unwrap();
        let err = load_module(&descriptor).unwrap_err();
        assert!(err.as_slice()[0].message.contains("duplicate"));
        assert!(err.as_slice()[0].message.contains("helper"));

        fs::remove_dir_all(&tmp).unwrap();
    }
}
