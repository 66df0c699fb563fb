// README-to-rustdoc helper shared by every lingo crate.
// Pulled into build.rs with: include!("../build_common.rs");
//
// The including build.rs must import:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Render the crate README into `OUT_DIR/README_GENERATED.md` for rustdoc.
///
/// Links written for browsing the repository (`src/foo.rs`) are rewritten to
/// module links (`foo`), and links to the workspace README become links to
/// the repository URL declared in the workspace manifest. A crate without a
/// README gets its manifest description instead.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");
    println!("cargo:rerun-if-changed=../../Cargo.toml");

    let readme = fs::read_to_string(Path::new(crate_dir).join("README.md"))
        .unwrap_or_else(|_| env::var("CARGO_PKG_DESCRIPTION").unwrap_or_default());

    let mut rendered = readme.replace("](src/", "](").replace(".rs)", ")");
    if let Some(url) = workspace_repository(crate_dir) {
        rendered = rendered.replace("](../../README.md", &format!("]({url}"));
    }

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    fs::write(Path::new(&out_dir).join("README_GENERATED.md"), rendered)
        .expect("OUT_DIR is writable");
}

/// The `repository = "..."` value from the workspace manifest, if any.
fn workspace_repository(crate_dir: &str) -> Option<String> {
    let manifest = Path::new(crate_dir).parent()?.parent()?.join("Cargo.toml");
    let content = fs::read_to_string(manifest).ok()?;

    content.lines().map(str::trim).find_map(|line| {
        let value = line.strip_prefix("repository")?.trim_start().strip_prefix('=')?;
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}
