// Integration tests exercising module discovery, loading, and cross-module
// resolution against a real (temporary) filesystem tree, mirroring the
// original front end's tests/integration/ suite.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use life_compiler_core::semantic::module_loader;
use life_compiler_core::SemanticContext;

static COUNTER: AtomicU64 = AtomicU64::new(0);

struct TempProject {
    src: PathBuf,
}

impl TempProject {
    fn new() -> Self {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("life_lang_test_{}_{n}", std::process::id()));
        let src = dir.join("src");
        fs::create_dir_all(&src).expect("create temp src dir");
        TempProject { src }
    }

    fn write(&self, relative_path: &str, content: &str) {
        let full_path = self.src.join(relative_path);
        fs::create_dir_all(full_path.parent().unwrap()).unwrap();
        fs::write(full_path, content).unwrap();
    }
}

impl Drop for TempProject {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(self.src.parent().unwrap());
    }
}

#[test]
fn discovers_nested_and_snake_case_module_paths() {
    let project = TempProject::new();
    project.write("geometry/shapes.life", "struct Point { x: I32, y: I32 }\n");
    project.write("user_profile/settings/theme.life", "struct Theme { name: String }\n");

    let descriptors = module_loader::discover_modules(&project.src).unwrap();
    let mut paths: Vec<String> = descriptors.iter().map(|d| d.path_string()).collect();
    paths.sort();

    assert_eq!(paths, vec!["Geometry".to_string(), "User_Profile.Settings".to_string()]);
}

#[test]
fn loads_a_module_merged_from_multiple_files() {
    let project = TempProject::new();
    project.write("geometry/point.life", "pub struct Point { x: I32, y: I32 }\n");
    project.write("geometry/vector.life", "pub struct Vector { dx: I32, dy: I32 }\n");

    let descriptors = module_loader::discover_modules(&project.src).unwrap();
    let geometry = descriptors
        .iter()
        .find(|d| d.path_string() == "Geometry")
        .expect("Geometry module discovered");

    let module = module_loader::load_module(geometry).expect("module loads");
    assert_eq!(module.items.len(), 2);
}

#[test]
fn duplicate_symbol_across_files_fails_module_load() {
    let project = TempProject::new();
    project.write("geometry/a.life", "struct Point { x: I32 }\n");
    project.write("geometry/b.life", "struct Point { y: I32 }\n");

    let descriptors = module_loader::discover_modules(&project.src).unwrap();
    let geometry = descriptors
        .iter()
        .find(|d| d.path_string() == "Geometry")
        .unwrap();

    let err = module_loader::load_module(geometry).unwrap_err();
    assert!(err.has_errors());
}

#[test]
fn pub_struct_resolves_across_modules_through_plain_import() {
    let project = TempProject::new();
    project.write("geometry/types.life", "pub struct Point { x: I32, y: I32 }\n");
    project.write(
        "main/app.life",
        "import Geometry.{ Point };\npub fn make_point(): Point { return Point { x: 0, y: 0 }; }\n",
    );

    let mut ctx = SemanticContext::new();
    ctx.load_modules(&project.src).expect("modules load");

    let type_name = life_compiler_core::ast::TypeName::simple("Point");
    let (module_path, item) = ctx
        .resolve_type_name("Main", &type_name)
        .expect("Point resolves via import");
    assert_eq!(module_path, "Geometry");
    assert!(item.is_pub());
}

#[test]
fn aliased_import_resolves_to_original_symbol() {
    let project = TempProject::new();
    project.write("geometry/types.life", "pub struct Circle { radius: F64 }\n");
    project.write(
        "main/app.life",
        "import Geometry.{ Circle as Round };\npub fn area(c: Round): F64 { return 0.0; }\n",
    );

    let mut ctx = SemanticContext::new();
    ctx.load_modules(&project.src).expect("modules load");

    let type_name = life_compiler_core::ast::TypeName::simple("Round");
    let (module_path, _) = ctx
        .resolve_type_name("Main", &type_name)
        .expect("Round resolves via aliased import");
    assert_eq!(module_path, "Geometry");
}

#[test]
fn non_pub_item_does_not_resolve_across_modules() {
    let project = TempProject::new();
    project.write("geometry/types.life", "struct Hidden { x: I32 }\n");
    project.write("main/app.life", "import Geometry.{ Hidden };\n");

    let mut ctx = SemanticContext::new();
    ctx.load_modules(&project.src).expect("modules load");

    let type_name = life_compiler_core::ast::TypeName::simple("Hidden");
    assert!(ctx.resolve_type_name("Main", &type_name).is_none());
}

#[test]
fn symlinked_module_directory_is_skipped_during_discovery() {
    let project = TempProject::new();
    project.write("geometry/types.life", "struct Point { x: I32 }\n");

    let link = project.src.join("geometry_link");
    if std::os::unix::fs::symlink(project.src.join("geometry"), &link).is_ok() {
        let descriptors = module_loader::discover_modules(&project.src).unwrap();
        let linked = descriptors.iter().find(|d| d.directory == link);
        if let Some(d) = linked {
            assert!(d.path.is_empty());
        }
    }
}
